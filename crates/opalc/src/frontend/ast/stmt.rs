//! Opal statement AST nodes

use super::{Expr, Item};
use crate::common::Span;

/// A block of statements; opens a new scope
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }

    /// Declarations made directly in this block
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.stmts.iter().filter_map(|stmt| match &stmt.kind {
            StmtKind::Item(item) => Some(item),
            _ => None,
        })
    }
}

/// A statement
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Declaration (let, const, def)
    Item(Item),

    /// Assignment: target = value;
    Assign { target: Expr, value: Expr },

    /// Expression statement: f(x);
    Expr(Expr),

    /// Return: return; or return value;
    Return(Option<Expr>),

    /// If statement; the else branch is another If or a Block statement
    If {
        condition: Expr,
        then_block: Block,
        else_branch: Option<Box<Stmt>>,
    },

    /// While loop
    While { condition: Expr, body: Block },

    /// Nested block
    Block(Block),
}
