//! Declaration and statement checking

use super::consteval::ConstValue;
use super::expr::{PlaceRoot, PlaceUse};
use super::resolve::TypePosition;
use super::scope::{BindingId, BindingKind, InitState, ParamInfo, SymbolTable};
use super::{SemaError, SemaResult};
use crate::common::{TypeError, TypeErrorKind};
use crate::frontend::ast::*;
use crate::types::{Mutability, Type, TypeId, TypeTable};
use std::collections::HashMap;
use tracing::debug;

/// Everything the checker learned about a module
#[derive(Debug)]
pub struct Analysis {
    pub types: TypeTable,
    pub symbols: SymbolTable,
    /// Type of every checked expression
    pub expr_types: HashMap<NodeId, TypeId>,
    /// Binding each identifier expression refers to
    pub resolutions: HashMap<NodeId, BindingId>,
    /// Value of each successfully evaluated constant declaration
    pub const_values: HashMap<NodeId, ConstValue>,
    /// Binding introduced by each declaration
    pub decl_bindings: HashMap<NodeId, BindingId>,
    /// Diagnostics in the order they were found
    pub errors: Vec<TypeError>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn type_of(&self, id: NodeId) -> Option<TypeId> {
        self.expr_types.get(&id).copied()
    }

    /// Type of the binding a declaration introduced
    pub fn decl_type(&self, id: NodeId) -> Option<TypeId> {
        let binding = self.decl_bindings.get(&id)?;
        self.symbols.binding(*binding).ty()
    }

    /// Error kind names, for quick assertions
    pub fn error_codes(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.kind.code()).collect()
    }
}

/// Check a complete module
pub fn check_module(module: &Module) -> Analysis {
    Checker::new().check_module(module)
}

/// Opal type checker
pub struct Checker<'m> {
    pub(super) types: TypeTable,
    pub(super) symbols: SymbolTable,
    pub(super) const_decls: HashMap<BindingId, &'m ConstDecl>,
    pub(super) decl_bindings: HashMap<NodeId, BindingId>,
    pub(super) expr_types: HashMap<NodeId, TypeId>,
    pub(super) resolutions: HashMap<NodeId, BindingId>,
    pub(super) const_values: HashMap<NodeId, ConstValue>,
    pub(super) errors: Vec<TypeError>,
    /// Return types of the enclosing functions and lambdas
    pub(super) return_types: Vec<TypeId>,
}

impl<'m> Checker<'m> {
    pub fn new() -> Self {
        Self {
            types: TypeTable::new(),
            symbols: SymbolTable::new(),
            const_decls: HashMap::new(),
            decl_bindings: HashMap::new(),
            expr_types: HashMap::new(),
            resolutions: HashMap::new(),
            const_values: HashMap::new(),
            errors: Vec::new(),
            return_types: Vec::new(),
        }
    }

    /// Analyze a complete module
    pub fn check_module(mut self, module: &'m Module) -> Analysis {
        // First pass: declare everything in the module scope
        self.hoist(&module.items);

        // Second pass: module variables and constants in order, then function
        // bodies, which may read any module variable
        let (defs, data): (Vec<&'m Item>, Vec<&'m Item>) = module
            .items
            .iter()
            .partition(|item| matches!(item.kind, ItemKind::Def(_)));
        for item in data.into_iter().chain(defs) {
            let result = self.check_item(item);
            self.report(result);
        }

        Analysis {
            types: self.types,
            symbols: self.symbols,
            expr_types: self.expr_types,
            resolutions: self.resolutions,
            const_values: self.const_values,
            decl_bindings: self.decl_bindings,
            errors: self.errors,
        }
    }

    pub(super) fn report(&mut self, result: SemaResult<()>) {
        if let Err(SemaError::Report(err)) = result {
            debug!(code = err.kind.code(), span = %err.span, "diagnostic");
            self.errors.push(err);
        }
    }

    // ==================== Hoisting ====================

    /// Declare every item of the current scope before any of them is checked
    pub(super) fn hoist<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'m Item>,
    {
        let scope = self.symbols.current();
        let items: Vec<&'m Item> = items.into_iter().collect();

        for item in &items {
            let (name, span) = item.name();
            let kind = match &item.kind {
                ItemKind::Let(v) => BindingKind::variable(Mutability::from_mut(v.mutable)),
                ItemKind::Const(_) => BindingKind::constant(),
                ItemKind::Def(_) => BindingKind::Function {
                    ty: TypeId::ERROR,
                    params: Vec::new(),
                },
            };

            match self.symbols.declare(scope, name, span, kind) {
                Ok(id) => {
                    self.decl_bindings.insert(item.id(), id);
                    if let ItemKind::Const(c) = &item.kind {
                        self.const_decls.insert(id, c);
                    }
                }
                Err(err) => self.errors.push(err),
            }
        }

        // Signatures may name constants, so they resolve once all names exist
        for item in &items {
            if let ItemKind::Def(f) = &item.kind {
                if let Some(&id) = self.decl_bindings.get(&f.id) {
                    let result = self.resolve_signature(id, f);
                    self.report(result);
                }
            }
        }
    }

    fn resolve_signature(&mut self, id: BindingId, f: &'m FnDecl) -> SemaResult<()> {
        let scope = self.symbols.current();

        let mut params = Vec::with_capacity(f.params.len());
        for param in &f.params {
            let ty = self.resolve_type(scope, &param.ty, TypePosition::Value)?;
            params.push(ParamInfo {
                name: param.name.clone(),
                anonymous: param.anonymous,
                ty,
            });
        }

        let ret = match &f.return_type {
            Some(ret) => self.resolve_type(scope, ret, TypePosition::Return)?,
            None => TypeId::VOID,
        };

        let fn_ty = self.types.function(params.iter().map(|p| p.ty).collect(), ret);
        debug!(name = %f.name, ty = %self.types.display(fn_ty), "function signature");
        self.symbols.binding_mut(id).kind = BindingKind::Function { ty: fn_ty, params };
        Ok(())
    }

    // ==================== Items ====================

    fn check_item(&mut self, item: &'m Item) -> SemaResult<()> {
        // Not in the table: the declaration itself was rejected
        let Some(&id) = self.decl_bindings.get(&item.id()) else {
            return Ok(());
        };

        match &item.kind {
            ItemKind::Let(v) => self.check_var_decl(id, v),
            ItemKind::Const(_) => self.evaluate_constant(id).map(|_| ()),
            ItemKind::Def(f) => self.check_fn_body(id, f),
        }
    }

    fn check_var_decl(&mut self, id: BindingId, v: &'m VarDecl) -> SemaResult<()> {
        self.symbols.set_init_state(id, InitState::CheckingInitializer);

        match self.var_decl_type(v) {
            Ok(ty) => {
                self.set_variable_type(id, ty);
                self.symbols.set_init_state(id, InitState::Initialized);
                Ok(())
            }
            Err(err) => {
                self.set_variable_type(id, TypeId::ERROR);
                self.symbols.set_init_state(id, InitState::Failed);
                Err(err)
            }
        }
    }

    fn var_decl_type(&mut self, v: &'m VarDecl) -> SemaResult<TypeId> {
        let scope = self.symbols.current();

        match &v.ty {
            Some(annotation) => {
                let ty = self.resolve_type(scope, annotation, TypePosition::Value)?;
                self.check_expr_against(&v.init, ty)?;
                Ok(ty)
            }
            None => {
                let ty = self.check_expr(&v.init, None)?;
                if ty == TypeId::VOID {
                    return Err(TypeError::new(
                        TypeErrorKind::InvalidType {
                            name: "void".to_string(),
                            reason: format!("'{}' cannot hold the result of a void call", v.name),
                        },
                        v.init.span,
                    )
                    .into());
                }
                Ok(ty)
            }
        }
    }

    fn set_variable_type(&mut self, id: BindingId, new_ty: TypeId) {
        if let BindingKind::Variable { ty, .. } = &mut self.symbols.binding_mut(id).kind {
            *ty = Some(new_ty);
        }
    }

    fn check_fn_body(&mut self, id: BindingId, f: &'m FnDecl) -> SemaResult<()> {
        let BindingKind::Function { ty, params } = &self.symbols.binding(id).kind else {
            return Ok(());
        };
        let (fn_ty, params) = (*ty, params.clone());

        // Signature failed and was reported
        let ret = match self.types.get(fn_ty) {
            Type::Function { ret, .. } => *ret,
            _ => return Ok(()),
        };

        let scope = self.symbols.push_scope();
        for (param, info) in f.params.iter().zip(&params) {
            let kind = BindingKind::initialized(info.ty, Mutability::from_mut(param.mutable));
            if let Err(err) = self.symbols.declare(scope, &param.name, param.span, kind) {
                self.errors.push(err);
            }
        }

        self.return_types.push(ret);
        self.check_stmts(&f.body);
        self.return_types.pop();
        self.symbols.pop_scope();
        Ok(())
    }

    // ==================== Statements ====================

    /// Check a block in a new scope
    fn check_block(&mut self, block: &'m Block) {
        self.symbols.push_scope();
        self.check_stmts(block);
        self.symbols.pop_scope();
    }

    /// Check the statements of a block in the current scope
    pub(super) fn check_stmts(&mut self, block: &'m Block) {
        self.hoist(block.items());
        for stmt in &block.stmts {
            let result = self.check_stmt(stmt);
            self.report(result);
        }
    }

    fn check_stmt(&mut self, stmt: &'m Stmt) -> SemaResult<()> {
        match &stmt.kind {
            StmtKind::Item(item) => self.check_item(item),

            StmtKind::Assign { target, value } => self.check_assign(target, value),

            StmtKind::Expr(expr) => self.check_expr(expr, None).map(|_| ()),

            StmtKind::Return(value) => {
                let ret = self.return_types.last().copied().unwrap_or(TypeId::VOID);
                match value {
                    Some(value) if ret == TypeId::VOID => {
                        let found = self.check_expr(value, None)?;
                        Err(TypeError::mismatch("void", self.types.display(found), value.span).into())
                    }
                    Some(value) => self.check_expr_against(value, ret).map(|_| ()),
                    None if ret != TypeId::VOID => {
                        Err(TypeError::mismatch(self.types.display(ret), "void", stmt.span).into())
                    }
                    None => Ok(()),
                }
            }

            StmtKind::If { condition, then_block, else_branch } => {
                self.check_expr_against(condition, TypeId::BOOL)?;
                self.check_block(then_block);
                if let Some(else_branch) = else_branch {
                    let result = self.check_stmt(else_branch);
                    self.report(result);
                }
                Ok(())
            }

            StmtKind::While { condition, body } => {
                self.check_expr_against(condition, TypeId::BOOL)?;
                self.check_block(body);
                Ok(())
            }

            StmtKind::Block(block) => {
                self.check_block(block);
                Ok(())
            }
        }
    }

    fn check_assign(&mut self, target: &'m Expr, value: &'m Expr) -> SemaResult<()> {
        let place = self.check_place(target, PlaceUse::Assign)?;

        if !place.mutability.is_mutable() {
            let kind = match place.root {
                PlaceRoot::Binding(name) => TypeErrorKind::ImmutableAssignment { name },
                PlaceRoot::Deref(reference) => TypeErrorKind::ImmutableTargetAssignment {
                    ty: self.types.display(reference),
                },
            };
            return Err(TypeError::new(kind, target.span).into());
        }

        self.check_expr_against(value, place.ty)?;
        Ok(())
    }
}

impl Default for Checker<'_> {
    fn default() -> Self {
        Self::new()
    }
}
