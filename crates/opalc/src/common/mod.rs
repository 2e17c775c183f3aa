//! Common infrastructure shared by the front end and the semantic core

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter, ErrorCategory, TypeError, TypeErrorKind};
pub use span::Span;
