//! Opal declarations: variables, constants and functions

use super::{Block, Expr, NodeId, TypeExpr};
use crate::common::Span;

/// A declaration, at module level or inside a block
#[derive(Debug, Clone)]
pub struct Item {
    pub kind: ItemKind,
    pub span: Span,
}

impl Item {
    pub fn new(kind: ItemKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn id(&self) -> NodeId {
        match &self.kind {
            ItemKind::Let(v) => v.id,
            ItemKind::Const(c) => c.id,
            ItemKind::Def(d) => d.id,
        }
    }

    /// The declared name and the span of the name token
    pub fn name(&self) -> (&str, Span) {
        match &self.kind {
            ItemKind::Let(v) => (&v.name, v.name_span),
            ItemKind::Const(c) => (&c.name, c.name_span),
            ItemKind::Def(d) => (&d.name, d.name_span),
        }
    }
}

/// Declaration kinds
#[derive(Debug, Clone)]
pub enum ItemKind {
    /// Variable: let [mut] x[: T] = init;
    Let(VarDecl),
    /// Constant: const X[: T] = value;
    Const(ConstDecl),
    /// Function: def f(params) [-> T] { body }
    Def(FnDecl),
}

/// Variable declaration
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub id: NodeId,
    pub name: String,
    pub name_span: Span,
    pub mutable: bool,
    pub ty: Option<TypeExpr>,
    pub init: Expr,
    pub span: Span,
}

/// Constant declaration
#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub id: NodeId,
    pub name: String,
    pub name_span: Span,
    pub ty: Option<TypeExpr>,
    pub value: Expr,
    pub span: Span,
}

/// Function declaration
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub id: NodeId,
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Block,
    pub span: Span,
}

/// Function parameter: [anon] [mut] name: T
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub anonymous: bool,
    pub mutable: bool,
    pub ty: TypeExpr,
    pub span: Span,
}
