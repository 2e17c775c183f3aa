//! Compile-time evaluation of constants, literals and array sizes
//!
//! Constants are evaluated on first use from the scope they are declared in.
//! Each constant's slot moves `Unevaluated -> InProgress -> Done | Failed`;
//! meeting an `InProgress` slot again means the definition is circular.

use super::checker::Checker;
use super::resolve::TypePosition;
use super::scope::{BindingId, BindingKind, ConstSlot, ScopeId};
use super::{SemaError, SemaResult};
use crate::common::{Span, TypeError, TypeErrorKind};
use crate::frontend::ast::{BinOp, ConstDecl, Expr, ExprKind, UnaryOp};
use crate::types::{IntType, TypeId};
use std::fmt;
use tracing::debug;

/// A compile-time value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Int(i64, IntType),
    Bool(bool),
    Char(char),
}

impl ConstValue {
    pub fn ty(&self) -> TypeId {
        match self {
            ConstValue::Int(_, int) => TypeId::of_int(*int),
            ConstValue::Bool(_) => TypeId::BOOL,
            ConstValue::Char(_) => TypeId::CHAR,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstValue::Int(value, _) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(value, int) => write!(f, "{}{}", value, int.name()),
            ConstValue::Bool(value) => write!(f, "{}", value),
            ConstValue::Char(value) => write!(f, "{:?}", value),
        }
    }
}

/// Magnitude of an integer literal: decimal, `0x` hex or `0b` binary, with
/// `_` separators. `None` if malformed or too large to represent.
pub fn parse_int_literal(text: &str) -> Option<i128> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let (radix, body) = if let Some(rest) = digits.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, digits.as_str())
    };

    if body.is_empty() {
        return None;
    }
    i128::from_str_radix(body, radix).ok()
}

/// Whether an expression only gets a type from its context: integer
/// literals, negated literals, and arithmetic over nothing else
pub(super) fn needs_type_context(expr: &Expr) -> bool {
    match &expr.peel_parens().kind {
        ExprKind::IntLiteral(_) => true,
        ExprKind::Unary { op: UnaryOp::Neg, operand } => needs_type_context(operand),
        ExprKind::Binary { op, left, right } if op.is_arithmetic() => {
            needs_type_context(left) && needs_type_context(right)
        }
        _ => false,
    }
}

/// The literal text under a unary minus, if the operand is a plain literal
pub(super) fn negated_literal(operand: &Expr) -> Option<&str> {
    match &operand.peel_parens().kind {
        ExprKind::IntLiteral(text) => Some(text),
        _ => None,
    }
}

/// Apply a binary operator to two operands already known to share a type
fn fold_binary(op: BinOp, left: ConstValue, right: ConstValue) -> Result<ConstValue, TypeErrorKind> {
    use ConstValue::{Bool, Char, Int};

    match (left, right) {
        (Int(a, int), Int(b, _)) => {
            if op.is_comparison() {
                return Ok(Bool(compare(op, a, b)));
            }

            let result = match op {
                BinOp::Add => a.checked_add(b),
                BinOp::Sub => a.checked_sub(b),
                BinOp::Mul => a.checked_mul(b),
                BinOp::Div | BinOp::Rem if b == 0 => return Err(TypeErrorKind::DivisionByZero),
                BinOp::Div => a.checked_div(b),
                BinOp::Rem => a.checked_rem(b),
                _ => None,
            };

            match result {
                Some(value) if int.contains(i128::from(value)) => Ok(Int(value, int)),
                _ => Err(TypeErrorKind::ArithmeticOverflow { ty: int.name().to_string() }),
            }
        }
        (Bool(a), Bool(b)) => match op {
            BinOp::And => Ok(Bool(a && b)),
            BinOp::Or => Ok(Bool(a || b)),
            BinOp::Eq => Ok(Bool(a == b)),
            _ => Ok(Bool(a != b)),
        },
        (Char(a), Char(b)) => Ok(Bool(compare(op, a, b))),
        _ => Err(TypeErrorKind::NotAConstantExpression {
            what: format!("'{}' on mixed operands", op),
        }),
    }
}

fn compare<T: PartialOrd>(op: BinOp, a: T, b: T) -> bool {
    match op {
        BinOp::Eq => a == b,
        BinOp::Ne => a != b,
        BinOp::Lt => a < b,
        BinOp::Le => a <= b,
        BinOp::Gt => a > b,
        _ => a >= b,
    }
}

/// How a non-constant expression is named in diagnostics
fn describe(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::StringLiteral(_) => "a string literal",
        ExprKind::AddressOf(_) => "an address-of expression",
        ExprKind::Deref(_) => "a dereference",
        ExprKind::Index { .. } => "an index expression",
        ExprKind::Call { .. } => "a function call",
        ExprKind::Array(_) => "an array literal",
        ExprKind::Lambda(_) => "a lambda",
        _ => "this expression",
    }
}

impl<'m> Checker<'m> {
    /// Type an integer literal against its expected type and compute its value
    pub(super) fn typed_literal(
        &self,
        text: &str,
        negative: bool,
        expected: Option<TypeId>,
        span: Span,
    ) -> SemaResult<ConstValue> {
        let written = if negative { format!("-{}", text) } else { text.to_string() };

        let Some(expected) = expected else {
            return Err(TypeError::new(TypeErrorKind::AmbiguousLiteralType { literal: written }, span).into());
        };
        if expected == TypeId::ERROR {
            return Err(SemaError::Poisoned);
        }
        let Some(int) = self.types.as_int(expected) else {
            return Err(TypeError::mismatch(self.types.display(expected), "integer literal", span).into());
        };

        let out_of_range = || {
            TypeError::new(
                TypeErrorKind::LiteralOutOfRange {
                    value: written.clone(),
                    ty: int.name().to_string(),
                },
                span,
            )
        };

        let magnitude = parse_int_literal(text).ok_or_else(&out_of_range)?;
        let value = if negative { -magnitude } else { magnitude };
        if !int.contains(value) {
            return Err(out_of_range().into());
        }

        Ok(ConstValue::Int(value as i64, int))
    }

    /// Value of a constant, evaluating it on first use
    ///
    /// A failure is reported once, here, against the constant that failed;
    /// callers only ever see [`SemaError::Poisoned`].
    pub(super) fn evaluate_constant(&mut self, id: BindingId) -> SemaResult<ConstValue> {
        match self.symbols.binding(id).kind {
            BindingKind::Constant { slot: ConstSlot::Done(value), .. } => return Ok(value),
            BindingKind::Constant { slot: ConstSlot::Unevaluated, .. } => {}
            _ => return Err(SemaError::Poisoned),
        }
        let Some(decl) = self.const_decls.get(&id).copied() else {
            return Err(SemaError::Poisoned);
        };

        self.set_const_slot(id, None, ConstSlot::InProgress);
        let scope = self.symbols.binding(id).scope;
        debug!(name = %decl.name, "evaluating constant");

        match self.evaluate_const_decl(scope, decl) {
            Ok(value) => {
                debug!(name = %decl.name, %value, "constant evaluated");
                self.set_const_slot(id, Some(value.ty()), ConstSlot::Done(value));
                self.const_values.insert(decl.id, value);
                Ok(value)
            }
            Err(err) => {
                debug!(name = %decl.name, "constant failed");
                if let SemaError::Report(err) = err {
                    self.errors.push(err);
                }
                self.set_const_slot(id, Some(TypeId::ERROR), ConstSlot::Failed);
                Err(SemaError::Poisoned)
            }
        }
    }

    fn set_const_slot(&mut self, id: BindingId, new_ty: Option<TypeId>, new_slot: ConstSlot) {
        if let BindingKind::Constant { ty, slot } = &mut self.symbols.binding_mut(id).kind {
            if new_ty.is_some() {
                *ty = new_ty;
            }
            *slot = new_slot;
        }
    }

    fn evaluate_const_decl(&mut self, scope: ScopeId, decl: &'m ConstDecl) -> SemaResult<ConstValue> {
        let expected = match &decl.ty {
            Some(annotation) => {
                let ty = self.resolve_type(scope, annotation, TypePosition::Value)?;
                if !self.types.get(ty).is_scalar() {
                    return Err(TypeError::new(
                        TypeErrorKind::NotAConstantExpression {
                            what: format!("a value of type {}", self.types.display(ty)),
                        },
                        annotation.span,
                    )
                    .into());
                }
                Some(ty)
            }
            None => None,
        };

        self.eval_const_expr(scope, &decl.value, expected)
    }

    /// Evaluate a constant expression, resolving names from `scope`
    pub(super) fn eval_const_expr(
        &mut self,
        scope: ScopeId,
        expr: &'m Expr,
        expected: Option<TypeId>,
    ) -> SemaResult<ConstValue> {
        let value = match &expr.kind {
            ExprKind::IntLiteral(text) => self.typed_literal(text, false, expected, expr.span)?,
            ExprKind::BoolLiteral(value) => ConstValue::Bool(*value),
            ExprKind::CharLiteral(value) => ConstValue::Char(*value),
            ExprKind::Paren(inner) => self.eval_const_expr(scope, inner, expected)?,

            ExprKind::Identifier(name) => {
                let id = self.symbols.lookup(scope, name, expr.span)?;
                self.resolutions.insert(expr.id, id);
                match &self.symbols.binding(id).kind {
                    BindingKind::Constant { slot: ConstSlot::InProgress, .. } => {
                        return Err(TypeError::new(
                            TypeErrorKind::CircularConstantDefinition { name: name.clone() },
                            expr.span,
                        )
                        .into());
                    }
                    BindingKind::Constant { .. } => self.evaluate_constant(id)?,
                    other => {
                        return Err(TypeError::new(
                            TypeErrorKind::NotAConstantExpression {
                                what: format!("{} '{}'", other.describe(), name),
                            },
                            expr.span,
                        )
                        .into());
                    }
                }
            }

            ExprKind::Unary { op: UnaryOp::Neg, operand } => match negated_literal(operand) {
                Some(text) => {
                    let value = self.typed_literal(text, true, expected, expr.span)?;
                    self.expr_types.insert(operand.id, value.ty());
                    value
                }
                None => {
                    let value = self.eval_const_expr(scope, operand, expected)?;
                    match value {
                        ConstValue::Int(v, int) if int.signed => match v.checked_neg() {
                            Some(n) if int.contains(i128::from(n)) => ConstValue::Int(n, int),
                            _ => {
                                return Err(TypeError::new(
                                    TypeErrorKind::ArithmeticOverflow { ty: int.name().to_string() },
                                    expr.span,
                                )
                                .into());
                            }
                        },
                        other => {
                            return Err(TypeError::mismatch(
                                "signed integer",
                                self.types.display(other.ty()),
                                operand.span,
                            )
                            .into());
                        }
                    }
                }
            },

            ExprKind::Unary { op: UnaryOp::Not, operand } => {
                match self.eval_const_expr(scope, operand, Some(TypeId::BOOL))? {
                    ConstValue::Bool(b) => ConstValue::Bool(!b),
                    _ => return Err(SemaError::Poisoned),
                }
            }

            ExprKind::Binary { op, left, right } => {
                self.eval_const_binary(scope, *op, left, right, expected, expr.span)?
            }

            other => {
                return Err(TypeError::new(
                    TypeErrorKind::NotAConstantExpression { what: describe(other).to_string() },
                    expr.span,
                )
                .into());
            }
        };

        if let Some(expected) = expected {
            if expected != TypeId::ERROR && value.ty() != expected {
                return Err(TypeError::mismatch(
                    self.types.display(expected),
                    self.types.display(value.ty()),
                    expr.span,
                )
                .into());
            }
        }

        self.expr_types.insert(expr.id, value.ty());
        Ok(value)
    }

    fn eval_const_binary(
        &mut self,
        scope: ScopeId,
        op: BinOp,
        left: &'m Expr,
        right: &'m Expr,
        expected: Option<TypeId>,
        span: Span,
    ) -> SemaResult<ConstValue> {
        let operand_expected = if op.is_arithmetic() {
            expected
        } else if op.is_logical() {
            Some(TypeId::BOOL)
        } else {
            None
        };

        // An untyped literal side takes its type from the other operand
        let (lhs, rhs) = if !needs_type_context(left) {
            let lhs = self.eval_const_expr(scope, left, operand_expected)?;
            let rhs = self.eval_const_expr(scope, right, Some(lhs.ty()))?;
            (lhs, rhs)
        } else if !needs_type_context(right) {
            let rhs = self.eval_const_expr(scope, right, operand_expected)?;
            let lhs = self.eval_const_expr(scope, left, Some(rhs.ty()))?;
            (lhs, rhs)
        } else {
            let lhs = self.eval_const_expr(scope, left, operand_expected)?;
            let rhs = self.eval_const_expr(scope, right, Some(lhs.ty()))?;
            (lhs, rhs)
        };

        let operand_ok = match lhs {
            ConstValue::Int(..) => !op.is_logical(),
            ConstValue::Bool(_) => !op.is_arithmetic() && !op.is_ordering(),
            ConstValue::Char(_) => op.is_comparison(),
        };
        if !operand_ok {
            let wanted = if op.is_logical() { "bool" } else { "integer" };
            return Err(TypeError::mismatch(wanted, self.types.display(lhs.ty()), left.span).into());
        }

        fold_binary(op, lhs, rhs).map_err(|kind| TypeError::new(kind, span).into())
    }

    /// Evaluate the size of an array type
    pub(super) fn eval_array_size(&mut self, scope: ScopeId, expr: &'m Expr) -> SemaResult<u32> {
        let invalid = |reason: String| -> SemaError {
            TypeError::new(TypeErrorKind::InvalidGenericArgument { reason }, expr.span).into()
        };

        let expected = needs_type_context(expr).then_some(TypeId::U32);
        let value = match self.eval_const_expr(scope, expr, expected) {
            Ok(value) => value,
            Err(SemaError::Report(err)) => {
                return Err(match err.kind {
                    TypeErrorKind::CircularConstantDefinition { .. }
                    | TypeErrorKind::UndeclaredIdentifier { .. } => err.into(),
                    kind => invalid(format!("array size: {}", kind)),
                });
            }
            Err(SemaError::Poisoned) => return Err(SemaError::Poisoned),
        };

        match value {
            ConstValue::Int(size, _) if size < 0 => {
                Err(invalid(format!("array size {} is negative", size)))
            }
            ConstValue::Int(size, _) => {
                u32::try_from(size).map_err(|_| invalid(format!("array size {} is too large", size)))
            }
            other => Err(invalid(format!(
                "array size must be an integer, found {}",
                self.types.display(other.ty())
            ))),
        }
    }
}
