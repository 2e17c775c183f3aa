//! Opal AST definitions

mod types;
mod expr;
mod stmt;
mod item;

pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use item::*;

use crate::common::Span;

/// Identity of an expression or declaration node
///
/// Allocated by the parser; the checker's annotations are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A complete Opal compilation unit
#[derive(Debug, Clone)]
pub struct Module {
    pub items: Vec<Item>,
    pub span: Span,
}

impl Module {
    pub fn new(items: Vec<Item>, span: Span) -> Self {
        Self { items, span }
    }
}
