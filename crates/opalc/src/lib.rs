//! Opal semantic analysis core
//!
//! This library type-checks programs in Opal, a small statically typed
//! systems language with fixed-width integers, references, fixed-size arrays,
//! function types and lambdas.
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **Frontend** (`frontend/`): Lexer, AST and parser for Opal source text
//! - **Types** (`types/`): Interned type table and the reserved identifier set
//! - **Sema** (`sema/`): Symbol table, constant evaluator and type checker
//! - **Driver** (`driver/`): Pipeline from source text to rendered diagnostics
//! - **Common** (`common/`): Shared infrastructure (errors, spans)

pub mod common;
pub mod types;
pub mod frontend;
pub mod sema;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span, TypeError, TypeErrorKind};
pub use driver::{CheckConfig, Checked, Driver};
pub use sema::{check_module, Analysis};
pub use types::{Type, TypeId, TypeTable};
