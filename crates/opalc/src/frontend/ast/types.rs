//! Opal type annotations as written in source

use super::Expr;
use crate::common::Span;
use std::fmt;

/// A type annotation
#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of a type annotation
#[derive(Debug, Clone)]
pub enum TypeExprKind {
    /// Primitive or otherwise named type: u8, bool, string
    Named(String),
    /// Array: [T, N]
    Array {
        element: Box<TypeExpr>,
        size: Box<Expr>,
    },
    /// Reference: ^T or ^mut T
    Reference {
        mutable: bool,
        target: Box<TypeExpr>,
    },
    /// Function pointer: def(T, U) -> R
    Function {
        params: Vec<TypeExpr>,
        ret: Option<Box<TypeExpr>>,
    },
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Named(name) => write!(f, "{}", name),
            TypeExprKind::Array { element, .. } => write!(f, "[{}, _]", element),
            TypeExprKind::Reference { mutable, target } => {
                if *mutable {
                    write!(f, "^mut {}", target)
                } else {
                    write!(f, "^{}", target)
                }
            }
            TypeExprKind::Function { params, ret } => {
                write!(f, "def(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ")")?;
                if let Some(ret) = ret {
                    write!(f, " -> {}", ret)?;
                }
                Ok(())
            }
        }
    }
}
