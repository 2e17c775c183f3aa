//! Expression typing

use super::checker::Checker;
use super::consteval::{needs_type_context, negated_literal};
use super::resolve::TypePosition;
use super::scope::{BindingId, BindingKind, InitState};
use super::{SemaError, SemaResult};
use crate::common::{Span, TypeError, TypeErrorKind};
use crate::frontend::ast::*;
use crate::types::{Compatibility, Mutability, Type, TypeId};

/// Why a place expression is being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PlaceUse {
    Assign,
    AddressOf,
}

/// Where a place's mutability comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PlaceRoot {
    /// A variable, by name
    Binding(String),
    /// Dereference of a value of this reference type
    Deref(TypeId),
}

/// A storage location
#[derive(Debug, Clone)]
pub(super) struct Place {
    pub ty: TypeId,
    pub mutability: Mutability,
    pub root: PlaceRoot,
}

impl<'m> Checker<'m> {
    /// Type `expr`, using `expected` to infer literals and lambda signatures
    ///
    /// The result is the expression's own type; compatibility with
    /// `expected` is checked by [`Self::check_expr_against`].
    pub(super) fn check_expr(&mut self, expr: &'m Expr, expected: Option<TypeId>) -> SemaResult<TypeId> {
        let ty = self.infer_expr(expr, expected)?;
        self.expr_types.insert(expr.id, ty);
        Ok(ty)
    }

    /// Type `expr` and require it to be usable as `expected`
    pub(super) fn check_expr_against(&mut self, expr: &'m Expr, expected: TypeId) -> SemaResult<TypeId> {
        let found = self.check_expr(expr, Some(expected))?;
        if self.types.compatibility(found, expected).is_ok() {
            Ok(found)
        } else {
            Err(TypeError::mismatch(
                self.types.display(expected),
                self.types.display(found),
                expr.span,
            )
            .into())
        }
    }

    fn infer_expr(&mut self, expr: &'m Expr, expected: Option<TypeId>) -> SemaResult<TypeId> {
        match &expr.kind {
            ExprKind::IntLiteral(text) => {
                self.typed_literal(text, false, expected, expr.span).map(|v| v.ty())
            }
            ExprKind::BoolLiteral(_) => Ok(TypeId::BOOL),
            ExprKind::CharLiteral(_) => Ok(TypeId::CHAR),
            ExprKind::StringLiteral(_) => Ok(TypeId::STRING),

            ExprKind::Identifier(name) => {
                let id = self.resolve_name(expr, name)?;
                self.value_type(id, name, expr.span)
            }

            ExprKind::Binary { op, left, right } => self.check_binary(*op, left, right, expected),

            ExprKind::Unary { op, operand } => self.check_unary(*op, operand, expected, expr.span),

            ExprKind::AddressOf(inner) => {
                let place = self.check_place(inner, PlaceUse::AddressOf)?;
                Ok(self.types.reference(place.ty, place.mutability))
            }

            ExprKind::Deref(inner) => {
                let ty = self.check_expr(inner, None)?;
                match self.types.get(ty) {
                    Type::Reference { target, .. } => Ok(*target),
                    _ => Err(TypeError::mismatch("a reference", self.types.display(ty), inner.span).into()),
                }
            }

            ExprKind::Index { base, index } => {
                let base_ty = self.check_expr(base, None)?;
                self.index_type(base_ty, base.span, index)
            }

            ExprKind::Call { callee, args } => self.check_call(callee, args, expr.span),

            ExprKind::Array(elements) => self.check_array(elements, expected, expr.span),

            ExprKind::Lambda(lambda) => self.check_lambda(lambda, expected, expr.span),

            ExprKind::Paren(inner) => self.check_expr(inner, expected),
        }
    }

    // ==================== Names ====================

    fn resolve_name(&mut self, expr: &'m Expr, name: &str) -> SemaResult<BindingId> {
        let id = self.symbols.lookup(self.symbols.current(), name, expr.span)?;
        self.resolutions.insert(expr.id, id);
        Ok(id)
    }

    /// Type of reading a binding's value
    fn value_type(&mut self, id: BindingId, name: &str, span: Span) -> SemaResult<TypeId> {
        match &self.symbols.binding(id).kind {
            BindingKind::Variable { ty, state, .. } => match state {
                InitState::Initialized => ty.ok_or(SemaError::Poisoned),
                InitState::Failed => Err(SemaError::Poisoned),
                InitState::Unchecked | InitState::CheckingInitializer => Err(TypeError::new(
                    TypeErrorKind::UseBeforeInitialization { name: name.to_string() },
                    span,
                )
                .into()),
            },
            BindingKind::Constant { .. } => self.evaluate_constant(id).map(|value| value.ty()),
            BindingKind::Function { ty, .. } if *ty == TypeId::ERROR => Err(SemaError::Poisoned),
            BindingKind::Function { ty, .. } => Ok(*ty),
        }
    }

    // ==================== Operators ====================

    fn check_binary(
        &mut self,
        op: BinOp,
        left: &'m Expr,
        right: &'m Expr,
        expected: Option<TypeId>,
    ) -> SemaResult<TypeId> {
        let operand_expected = if op.is_arithmetic() {
            expected
        } else if op.is_logical() {
            Some(TypeId::BOOL)
        } else {
            None
        };

        // An untyped literal side takes its type from the other operand
        let (lhs, rhs) = if needs_type_context(left) && !needs_type_context(right) {
            let rhs = self.check_expr(right, operand_expected)?;
            let lhs = self.check_expr(left, Some(rhs))?;
            (lhs, rhs)
        } else {
            let lhs = self.check_expr(left, operand_expected)?;
            let rhs = self.check_expr(right, Some(lhs))?;
            (lhs, rhs)
        };

        let operand_ok = match self.types.get(lhs) {
            Type::Int(_) => !op.is_logical(),
            Type::Bool => !op.is_arithmetic() && !op.is_ordering(),
            Type::Char => op.is_comparison(),
            Type::Error => true,
            _ => false,
        };
        if !operand_ok {
            let wanted = if op.is_logical() {
                "bool"
            } else if op.is_arithmetic() {
                "integer"
            } else {
                "integer, bool or char"
            };
            return Err(TypeError::mismatch(wanted, self.types.display(lhs), left.span).into());
        }
        if self.types.compatibility(rhs, lhs) != Compatibility::Equal {
            return Err(TypeError::mismatch(
                self.types.display(lhs),
                self.types.display(rhs),
                right.span,
            )
            .into());
        }

        if op.is_arithmetic() {
            Ok(lhs)
        } else {
            Ok(TypeId::BOOL)
        }
    }

    fn check_unary(
        &mut self,
        op: UnaryOp,
        operand: &'m Expr,
        expected: Option<TypeId>,
        span: Span,
    ) -> SemaResult<TypeId> {
        match op {
            UnaryOp::Neg => {
                if let Some(text) = negated_literal(operand) {
                    let ty = self.typed_literal(text, true, expected, span)?.ty();
                    self.expr_types.insert(operand.id, ty);
                    return Ok(ty);
                }

                let ty = self.check_expr(operand, expected)?;
                match self.types.as_int(ty) {
                    Some(int) if int.signed => Ok(ty),
                    _ if ty == TypeId::ERROR => Ok(ty),
                    _ => Err(TypeError::mismatch("signed integer", self.types.display(ty), operand.span).into()),
                }
            }
            UnaryOp::Not => {
                self.check_expr_against(operand, TypeId::BOOL)?;
                Ok(TypeId::BOOL)
            }
        }
    }

    fn index_type(&mut self, base_ty: TypeId, base_span: Span, index: &'m Expr) -> SemaResult<TypeId> {
        let element = match self.types.get(base_ty) {
            Type::Array { element, .. } => *element,
            _ => {
                return Err(TypeError::mismatch("an array", self.types.display(base_ty), base_span).into());
            }
        };

        if needs_type_context(index) {
            self.check_expr(index, Some(TypeId::U32))?;
        } else {
            let ty = self.check_expr(index, None)?;
            if !self.types.is_int(ty) {
                return Err(TypeError::mismatch("integer", self.types.display(ty), index.span).into());
            }
        }

        Ok(element)
    }

    // ==================== Places ====================

    /// Check an expression that must denote a storage location
    pub(super) fn check_place(&mut self, expr: &'m Expr, usage: PlaceUse) -> SemaResult<Place> {
        let place = match &expr.kind {
            ExprKind::Paren(inner) => self.check_place(inner, usage)?,

            ExprKind::Identifier(name) => {
                let id = self.resolve_name(expr, name)?;
                let mutability = match &self.symbols.binding(id).kind {
                    BindingKind::Variable { mutability, .. } => *mutability,
                    _ => {
                        let kind = match usage {
                            PlaceUse::Assign => TypeErrorKind::ImmutableAssignment { name: name.clone() },
                            PlaceUse::AddressOf => TypeErrorKind::NotAPlace,
                        };
                        return Err(TypeError::new(kind, expr.span).into());
                    }
                };
                let ty = self.value_type(id, name, expr.span)?;
                Place {
                    ty,
                    mutability,
                    root: PlaceRoot::Binding(name.clone()),
                }
            }

            ExprKind::Deref(inner) => {
                let reference = self.check_expr(inner, None)?;
                match self.types.get(reference) {
                    Type::Reference { target, mutability } => Place {
                        ty: *target,
                        mutability: *mutability,
                        root: PlaceRoot::Deref(reference),
                    },
                    _ => {
                        return Err(TypeError::mismatch("a reference", self.types.display(reference), inner.span).into());
                    }
                }
            }

            ExprKind::Index { base, index } => {
                let base_place = self.check_place(base, usage)?;
                let element = self.index_type(base_place.ty, base.span, index)?;
                Place { ty: element, ..base_place }
            }

            _ => return Err(TypeError::new(TypeErrorKind::NotAPlace, expr.span).into()),
        };

        self.expr_types.insert(expr.id, place.ty);
        Ok(place)
    }

    // ==================== Calls ====================

    fn check_call(&mut self, callee: &'m Expr, args: &'m [Arg], span: Span) -> SemaResult<TypeId> {
        // Calling a declared function by name binds arguments by name
        let target = callee.peel_parens();
        if let ExprKind::Identifier(name) = &target.kind {
            let id = self.resolve_name(target, name)?;
            if matches!(self.symbols.binding(id).kind, BindingKind::Function { .. }) {
                let fn_ty = self.value_type(id, name, target.span)?;
                self.expr_types.insert(target.id, fn_ty);
                self.expr_types.insert(callee.id, fn_ty);
                return self.check_named_call(id, name, args, span);
            }
        }

        let callee_ty = self.check_expr(callee, None)?;
        let (params, ret) = match self.types.get(callee_ty) {
            Type::Function { params, ret } => (params.clone(), *ret),
            _ => {
                return Err(TypeError::mismatch("a function", self.types.display(callee_ty), callee.span).into());
            }
        };

        let function = self.types.display(callee_ty);
        self.check_positional_args(&function, &params, args, span)?;
        Ok(ret)
    }

    /// Bind arguments to a declared function's parameters
    ///
    /// Named arguments match non-anonymous parameters by name; positional
    /// arguments fill the anonymous parameters in declaration order.
    fn check_named_call(
        &mut self,
        id: BindingId,
        function: &str,
        args: &'m [Arg],
        span: Span,
    ) -> SemaResult<TypeId> {
        let (fn_ty, params) = match &self.symbols.binding(id).kind {
            BindingKind::Function { ty, params } => (*ty, params.clone()),
            _ => return Err(SemaError::Poisoned),
        };
        let ret = match self.types.get(fn_ty) {
            Type::Function { ret, .. } => *ret,
            _ => return Err(SemaError::Poisoned),
        };

        let mut bound: Vec<Option<&'m Arg>> = vec![None; params.len()];
        let mut anon_slots = params
            .iter()
            .enumerate()
            .filter(|(_, p)| p.anonymous)
            .map(|(i, _)| i);
        let mut surplus = 0;

        for arg in args {
            match &arg.name {
                Some(name) => {
                    let Some(index) = params.iter().position(|p| !p.anonymous && &p.name == name) else {
                        return Err(TypeError::new(
                            TypeErrorKind::UnknownParameter {
                                function: function.to_string(),
                                name: name.clone(),
                            },
                            arg.span,
                        )
                        .into());
                    };
                    if bound[index].is_some() {
                        return Err(TypeError::new(
                            TypeErrorKind::DuplicateArgument { name: name.clone() },
                            arg.span,
                        )
                        .into());
                    }
                    bound[index] = Some(arg);
                }
                None => match anon_slots.next() {
                    Some(index) => bound[index] = Some(arg),
                    None => surplus += 1,
                },
            }
        }

        if let Some(missing) = bound.iter().position(Option::is_none) {
            return Err(TypeError::new(
                TypeErrorKind::MissingArgument {
                    function: function.to_string(),
                    name: params[missing].name.clone(),
                },
                span,
            )
            .into());
        }
        if surplus > 0 {
            return Err(TypeError::new(
                TypeErrorKind::ArityMismatch {
                    expected: params.len(),
                    found: args.len(),
                },
                span,
            )
            .into());
        }

        for (param, arg) in params.iter().zip(bound) {
            if let Some(arg) = arg {
                self.check_expr_against(&arg.value, param.ty)?;
            }
        }

        Ok(ret)
    }

    /// Calls through a function-typed value: positional only
    fn check_positional_args(
        &mut self,
        function: &str,
        params: &[TypeId],
        args: &'m [Arg],
        span: Span,
    ) -> SemaResult<()> {
        if let Some(arg) = args.iter().find(|arg| arg.name.is_some()) {
            return Err(TypeError::new(
                TypeErrorKind::UnknownParameter {
                    function: function.to_string(),
                    name: arg.name.clone().unwrap_or_default(),
                },
                arg.span,
            )
            .into());
        }
        if args.len() != params.len() {
            return Err(TypeError::new(
                TypeErrorKind::ArityMismatch {
                    expected: params.len(),
                    found: args.len(),
                },
                span,
            )
            .into());
        }

        for (&param, arg) in params.iter().zip(args) {
            self.check_expr_against(&arg.value, param)?;
        }
        Ok(())
    }

    // ==================== Arrays ====================

    fn check_array(
        &mut self,
        elements: &'m [Expr],
        expected: Option<TypeId>,
        span: Span,
    ) -> SemaResult<TypeId> {
        if let Some(expected) = expected {
            match self.types.get(expected) {
                Type::Array { element, size } => {
                    let (element, size) = (*element, *size);
                    if elements.len() != size as usize {
                        return Err(TypeError::new(
                            TypeErrorKind::ArraySizeMismatch {
                                expected: size,
                                found: elements.len(),
                            },
                            span,
                        )
                        .into());
                    }
                    for elem in elements {
                        self.check_expr_against(elem, element)?;
                    }
                    return Ok(expected);
                }
                Type::Error => return Err(SemaError::Poisoned),
                // Typed on its own; the caller reports the mismatch
                _ => {}
            }
        }

        // The first element with a type of its own decides the element type
        let Some(first) = elements
            .iter()
            .find(|elem| !needs_type_context(elem))
            .or_else(|| elements.first())
        else {
            return Err(TypeError::new(
                TypeErrorKind::AmbiguousLiteralType { literal: "[]".to_string() },
                span,
            )
            .into());
        };

        let element = self.check_expr(first, None)?;
        if element == TypeId::VOID {
            return Err(TypeError::new(
                TypeErrorKind::InvalidType {
                    name: "void".to_string(),
                    reason: "arrays cannot hold void values".to_string(),
                },
                first.span,
            )
            .into());
        }
        for elem in elements {
            if elem.id != first.id {
                self.check_expr_against(elem, element)?;
            }
        }

        Ok(self.types.array(element, elements.len() as u32))
    }

    // ==================== Lambdas ====================

    fn check_lambda(
        &mut self,
        lambda: &'m Lambda,
        expected: Option<TypeId>,
        span: Span,
    ) -> SemaResult<TypeId> {
        let scope = self.symbols.current();
        let target = expected.and_then(|ty| match self.types.get(ty) {
            Type::Function { params, ret } => Some((params.clone(), *ret)),
            _ => None,
        });

        let mut param_types = Vec::with_capacity(lambda.params.len());
        match &target {
            Some((target_params, _)) => {
                if target_params.len() != lambda.params.len() {
                    return Err(TypeError::new(
                        TypeErrorKind::ArityMismatch {
                            expected: target_params.len(),
                            found: lambda.params.len(),
                        },
                        span,
                    )
                    .into());
                }
                for (param, &wanted) in lambda.params.iter().zip(target_params) {
                    let ty = match &param.ty {
                        Some(annotation) => {
                            let ty = self.resolve_type(scope, annotation, TypePosition::Value)?;
                            if ty != wanted {
                                return Err(TypeError::mismatch(
                                    self.types.display(wanted),
                                    self.types.display(ty),
                                    annotation.span,
                                )
                                .into());
                            }
                            ty
                        }
                        None => wanted,
                    };
                    param_types.push(ty);
                }
            }
            None => {
                for param in &lambda.params {
                    let Some(annotation) = &param.ty else {
                        return Err(TypeError::new(
                            TypeErrorKind::AmbiguousLambdaSignature { name: param.name.clone() },
                            param.span,
                        )
                        .into());
                    };
                    param_types.push(self.resolve_type(scope, annotation, TypePosition::Value)?);
                }
            }
        }

        let declared_ret = match &lambda.return_type {
            Some(annotation) => {
                let ret = self.resolve_type(scope, annotation, TypePosition::Return)?;
                if let Some((_, wanted)) = &target {
                    if ret != *wanted {
                        return Err(TypeError::mismatch(
                            self.types.display(*wanted),
                            self.types.display(ret),
                            annotation.span,
                        )
                        .into());
                    }
                }
                Some(ret)
            }
            None => target.as_ref().map(|(_, ret)| *ret),
        };

        // Parameters live in their own scope under the enclosing one
        self.symbols.push_scope();
        let result = self.check_lambda_body(lambda, &param_types, declared_ret);
        self.symbols.pop_scope();
        let ret = result?;

        Ok(self.types.function(param_types, ret))
    }

    fn check_lambda_body(
        &mut self,
        lambda: &'m Lambda,
        param_types: &[TypeId],
        declared_ret: Option<TypeId>,
    ) -> SemaResult<TypeId> {
        let scope = self.symbols.current();
        for (param, &ty) in lambda.params.iter().zip(param_types) {
            let kind = BindingKind::initialized(ty, Mutability::Immutable);
            self.symbols.declare(scope, &param.name, param.span, kind)?;
        }

        match &lambda.body {
            LambdaBody::Expr(body) => match declared_ret {
                Some(TypeId::VOID) => {
                    self.check_expr(body, None)?;
                    Ok(TypeId::VOID)
                }
                Some(ret) => {
                    self.check_expr_against(body, ret)?;
                    Ok(ret)
                }
                None => self.check_expr(body, None),
            },
            LambdaBody::Block(block) => {
                let ret = declared_ret.unwrap_or(TypeId::VOID);
                self.return_types.push(ret);
                self.check_stmts(block);
                self.return_types.pop();
                Ok(ret)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::frontend::Parser;
    use crate::sema::{check_module, Analysis};

    fn check(source: &str) -> Analysis {
        let module = Parser::new(source).parse_module().unwrap();
        check_module(&module)
    }

    fn codes(source: &str) -> Vec<&'static str> {
        check(source).error_codes()
    }

    #[test]
    fn test_literal_takes_type_from_other_operand() {
        assert_eq!(
            codes("def main() { let a: u16 = 1; let b = a + 70000; }"),
            vec!["LiteralOutOfRange"]
        );
        assert!(codes("def main() { let a: i8 = 1; let b = 1 - a; }").is_empty());
    }

    #[test]
    fn test_mixed_integer_widths_rejected() {
        assert_eq!(
            codes("def main() { let a: u8 = 1; let b: u16 = 2; let c = a + b; }"),
            vec!["TypeMismatch"]
        );
    }

    #[test]
    fn test_negation_requires_signed() {
        assert_eq!(
            codes("def main() { let a: u8 = 1; let b = -a; let c: i8 = -128; }"),
            vec!["TypeMismatch"]
        );
    }

    #[test]
    fn test_use_before_initialization() {
        assert_eq!(
            codes("def main() { let a: u8 = b; let b: u8 = 1; let c: u8 = c; }"),
            vec!["UseBeforeInitialization", "UseBeforeInitialization"]
        );
    }

    #[test]
    fn test_undeclared_identifier() {
        assert_eq!(codes("def main() { let a: u8 = nope; }"), vec!["UndeclaredIdentifier"]);
    }

    #[test]
    fn test_address_of_takes_place_mutability() {
        let source = "def main() { let mut a: [u8, 2] = [1, 2]; let p: ^mut u8 = &a[0]; let b: u8 = 3; let q: ^mut u8 = &b; }";
        assert_eq!(codes(source), vec!["TypeMismatch"]);
    }

    #[test]
    fn test_address_of_non_place() {
        assert_eq!(
            codes("const N: u8 = 1; def main() { let p: ^u8 = &N; let q: ^u8 = &5; }"),
            vec!["NotAPlace", "NotAPlace"]
        );
    }

    #[test]
    fn test_assignment_targets() {
        let source = "const N: u8 = 1; def f() {} def main() { N = 2; f = f; 1 = 2; }";
        assert_eq!(
            codes(source),
            vec!["ImmutableAssignment", "ImmutableAssignment", "NotAPlace"]
        );
    }

    #[test]
    fn test_element_assignment_needs_mutable_array() {
        assert_eq!(
            codes("def main() { let a: [u8, 2] = [1, 2]; a[0] = 5; let mut b: [u8, 2] = [1, 2]; b[1] = 7; }"),
            vec!["ImmutableAssignment"]
        );
    }

    #[test]
    fn test_indexing() {
        assert_eq!(
            codes("def main() { let a: [bool, 2] = [true, false]; let b: bool = a[1]; let c: u8 = a[0]; let d: u8 = 5; let e = d[0]; }"),
            vec!["TypeMismatch", "TypeMismatch"]
        );
    }

    #[test]
    fn test_array_literal_without_expected_type() {
        assert_eq!(
            codes("const A: i16 = 1; def main() { let a = [1, A, 3]; let b: [i16, 3] = a; let c = [1, 2]; }"),
            vec!["AmbiguousLiteralType"]
        );
    }

    #[test]
    fn test_duplicate_and_unknown_arguments() {
        let source = "def f(x: u8, y: u8) {} def main() { f(x: 1, x: 2, y: 3); f(x: 1, z: 2); }";
        assert_eq!(codes(source), vec!["DuplicateArgument", "UnknownParameter"]);
    }

    #[test]
    fn test_anonymous_parameters_are_positional() {
        let source = "def f(anon a: u8, b: u8, anon c: bool) {} def main() { f(1, b: 2, true); f(b: 2, 1, true); f(a: 1, b: 2, true); }";
        assert_eq!(codes(source), vec!["UnknownParameter"]);
    }

    #[test]
    fn test_surplus_positional_argument() {
        assert_eq!(
            codes("def f(x: u8) {} def main() { f(x: 1, 2); }"),
            vec!["ArityMismatch"]
        );
    }

    #[test]
    fn test_pointer_calls_are_positional() {
        let source = "def f(x: u8) -> u8 { return x; } def main() { let p: def(u8) -> u8 = f; p(1); p(x: 1); p(1, 2); }";
        assert_eq!(codes(source), vec!["UnknownParameter", "ArityMismatch"]);
    }

    #[test]
    fn test_lambda_inference() {
        let source = "def main() { let p: def(u8, u8) -> u8 = (a, b) => a + b; let q = (a: i8) => -a; let r: def(u8) -> i8 = q; }";
        assert_eq!(codes(source), vec!["TypeMismatch"]);
    }

    #[test]
    fn test_lambda_signature_errors() {
        let source = "def main() { let p = (a) => a; let q: def(u8) = (a, b) => { }; let r: def(u8) = (a: u16) => { }; }";
        assert_eq!(
            codes(source),
            vec!["AmbiguousLambdaSignature", "ArityMismatch", "TypeMismatch"]
        );
    }

    #[test]
    fn test_lambda_sees_enclosing_scope() {
        let source = "def main() { let k: u8 = 3; let add: def(u8) -> u8 = (x) => x + k; }";
        assert!(codes(source).is_empty());
    }

    #[test]
    fn test_lambda_block_body_return() {
        let source = "def main() { let f: def(u8) -> bool = (x) => { return x > 1; }; let g = () => { return 1; }; }";
        assert_eq!(codes(source), vec!["AmbiguousLiteralType"]);
    }

    #[test]
    fn test_string_literal_type() {
        assert_eq!(
            codes(r#"def main() { let s: string = "hi"; let t: str = "hi"; let u: u8 = "x"; }"#),
            vec!["InvalidType", "TypeMismatch"]
        );
    }
}
