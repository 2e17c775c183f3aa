//! Resolution of written type annotations to interned types

use super::checker::Checker;
use super::scope::ScopeId;
use super::SemaResult;
use crate::common::{TypeError, TypeErrorKind};
use crate::frontend::ast::{TypeExpr, TypeExprKind};
use crate::types::{Mutability, TypeId};

/// Where an annotation appears; `void` is only valid as a return type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TypePosition {
    Value,
    Return,
}

impl<'m> Checker<'m> {
    /// Resolve `ty`, evaluating array sizes in `scope`
    pub(super) fn resolve_type(
        &mut self,
        scope: ScopeId,
        ty: &'m TypeExpr,
        position: TypePosition,
    ) -> SemaResult<TypeId> {
        match &ty.kind {
            TypeExprKind::Named(name) => {
                let id = self
                    .types
                    .named(name)
                    .map_err(|kind| TypeError::new(kind, ty.span))?;
                if id == TypeId::VOID && position == TypePosition::Value {
                    return Err(TypeError::new(
                        TypeErrorKind::InvalidType {
                            name: name.clone(),
                            reason: "void is only allowed as a return type".to_string(),
                        },
                        ty.span,
                    )
                    .into());
                }
                Ok(id)
            }

            TypeExprKind::Array { element, size } => {
                let element = self.resolve_type(scope, element, TypePosition::Value)?;
                let size = self.eval_array_size(scope, size)?;
                Ok(self.types.array(element, size))
            }

            TypeExprKind::Reference { mutable, target } => {
                let target = self.resolve_type(scope, target, TypePosition::Value)?;
                Ok(self.types.reference(target, Mutability::from_mut(*mutable)))
            }

            TypeExprKind::Function { params, ret } => {
                let params = params
                    .iter()
                    .map(|param| self.resolve_type(scope, param, TypePosition::Value))
                    .collect::<SemaResult<Vec<_>>>()?;
                let ret = match ret {
                    Some(ret) => self.resolve_type(scope, ret, TypePosition::Return)?,
                    None => TypeId::VOID,
                };
                Ok(self.types.function(params, ret))
            }
        }
    }
}
