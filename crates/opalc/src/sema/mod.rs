//! Opal semantic analysis
//!
//! The [`Checker`] walks a parsed [`Module`](crate::frontend::ast::Module)
//! top-down. Each scope's declarations are hoisted on entry, constants are
//! evaluated lazily on first use, and every expression is assigned an
//! interned type. The result is an [`Analysis`]: the type and symbol tables,
//! side tables keyed by node id, and every diagnostic found.

mod checker;
mod consteval;
mod expr;
mod resolve;
mod scope;

pub use checker::{check_module, Analysis, Checker};
pub use consteval::{parse_int_literal, ConstValue};
pub use scope::{
    Binding, BindingId, BindingKind, ConstSlot, InitState, ParamInfo, ScopeId, SymbolTable,
};

use crate::common::TypeError;

/// Why checking of a statement or declaration stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SemaError {
    /// A new problem, reported against the current statement
    Report(TypeError),
    /// Depends on something that already failed and was reported
    Poisoned,
}

impl From<TypeError> for SemaError {
    fn from(err: TypeError) -> Self {
        SemaError::Report(err)
    }
}

pub(crate) type SemaResult<T> = Result<T, SemaError>;
