//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use super::Span;

/// Front-end error with source location
///
/// These stop compilation of a unit outright. Semantic problems are
/// collected as [`TypeError`]s instead so that a single run reports all of
/// them.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Broad grouping of semantic errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Identifier,
    Compatibility,
    Mutability,
    ConstantEvaluation,
    InitializationOrder,
    CallBinding,
    GenericInstantiation,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Identifier => "identifier",
            ErrorCategory::Compatibility => "type compatibility",
            ErrorCategory::Mutability => "mutability",
            ErrorCategory::ConstantEvaluation => "constant evaluation",
            ErrorCategory::InitializationOrder => "initialization order",
            ErrorCategory::CallBinding => "call binding",
            ErrorCategory::GenericInstantiation => "generic instantiation",
        }
    }
}

/// What went wrong, with the identifier and type names involved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeErrorKind {
    #[error("'{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String },

    #[error("cannot find '{name}' in this scope")]
    UndeclaredIdentifier { name: String },

    #[error("'{name}' is reserved and cannot be used here")]
    ReservedIdentifier { name: String },

    #[error("mismatched types: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("expected an array of {expected} element(s), found {found}")]
    ArraySizeMismatch { expected: u32, found: usize },

    #[error("expected {expected} argument(s), found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("invalid type '{name}': {reason}")]
    InvalidType { name: String, reason: String },

    #[error("expression does not denote a storage location")]
    NotAPlace,

    #[error("cannot infer the type of lambda parameter '{name}'")]
    AmbiguousLambdaSignature { name: String },

    #[error("cannot assign to immutable binding '{name}'")]
    ImmutableAssignment { name: String },

    #[error("cannot assign through '{ty}': the referenced value is immutable")]
    ImmutableTargetAssignment { ty: String },

    #[error("cannot infer a type for integer literal {literal}")]
    AmbiguousLiteralType { literal: String },

    #[error("literal {value} is out of range for {ty}")]
    LiteralOutOfRange { value: String, ty: String },

    #[error("{what} is not a constant expression")]
    NotAConstantExpression { what: String },

    #[error("constant '{name}' depends on its own value")]
    CircularConstantDefinition { name: String },

    #[error("constant arithmetic overflows {ty}")]
    ArithmeticOverflow { ty: String },

    #[error("division by zero in constant expression")]
    DivisionByZero,

    #[error("'{name}' is used before it is initialized")]
    UseBeforeInitialization { name: String },

    #[error("'{function}' has no parameter named '{name}'")]
    UnknownParameter { function: String, name: String },

    #[error("missing argument for parameter '{name}' of '{function}'")]
    MissingArgument { function: String, name: String },

    #[error("parameter '{name}' is supplied more than once")]
    DuplicateArgument { name: String },

    #[error("invalid generic argument: {reason}")]
    InvalidGenericArgument { reason: String },
}

impl TypeErrorKind {
    /// Stable name of the error kind, used as the diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            TypeErrorKind::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            TypeErrorKind::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            TypeErrorKind::ReservedIdentifier { .. } => "ReservedIdentifier",
            TypeErrorKind::TypeMismatch { .. } => "TypeMismatch",
            TypeErrorKind::ArraySizeMismatch { .. } => "ArraySizeMismatch",
            TypeErrorKind::ArityMismatch { .. } => "ArityMismatch",
            TypeErrorKind::InvalidType { .. } => "InvalidType",
            TypeErrorKind::NotAPlace => "NotAPlace",
            TypeErrorKind::AmbiguousLambdaSignature { .. } => "AmbiguousLambdaSignature",
            TypeErrorKind::ImmutableAssignment { .. } => "ImmutableAssignment",
            TypeErrorKind::ImmutableTargetAssignment { .. } => "ImmutableTargetAssignment",
            TypeErrorKind::AmbiguousLiteralType { .. } => "AmbiguousLiteralType",
            TypeErrorKind::LiteralOutOfRange { .. } => "LiteralOutOfRange",
            TypeErrorKind::NotAConstantExpression { .. } => "NotAConstantExpression",
            TypeErrorKind::CircularConstantDefinition { .. } => "CircularConstantDefinition",
            TypeErrorKind::ArithmeticOverflow { .. } => "ArithmeticOverflow",
            TypeErrorKind::DivisionByZero => "DivisionByZero",
            TypeErrorKind::UseBeforeInitialization { .. } => "UseBeforeInitialization",
            TypeErrorKind::UnknownParameter { .. } => "UnknownParameter",
            TypeErrorKind::MissingArgument { .. } => "MissingArgument",
            TypeErrorKind::DuplicateArgument { .. } => "DuplicateArgument",
            TypeErrorKind::InvalidGenericArgument { .. } => "InvalidGenericArgument",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TypeErrorKind::DuplicateDeclaration { .. }
            | TypeErrorKind::UndeclaredIdentifier { .. }
            | TypeErrorKind::ReservedIdentifier { .. } => ErrorCategory::Identifier,

            TypeErrorKind::TypeMismatch { .. }
            | TypeErrorKind::ArraySizeMismatch { .. }
            | TypeErrorKind::ArityMismatch { .. }
            | TypeErrorKind::InvalidType { .. }
            | TypeErrorKind::NotAPlace
            | TypeErrorKind::AmbiguousLambdaSignature { .. } => ErrorCategory::Compatibility,

            TypeErrorKind::ImmutableAssignment { .. }
            | TypeErrorKind::ImmutableTargetAssignment { .. } => ErrorCategory::Mutability,

            TypeErrorKind::AmbiguousLiteralType { .. }
            | TypeErrorKind::LiteralOutOfRange { .. }
            | TypeErrorKind::NotAConstantExpression { .. }
            | TypeErrorKind::CircularConstantDefinition { .. }
            | TypeErrorKind::ArithmeticOverflow { .. }
            | TypeErrorKind::DivisionByZero => ErrorCategory::ConstantEvaluation,

            TypeErrorKind::UseBeforeInitialization { .. } => ErrorCategory::InitializationOrder,

            TypeErrorKind::UnknownParameter { .. }
            | TypeErrorKind::MissingArgument { .. }
            | TypeErrorKind::DuplicateArgument { .. } => ErrorCategory::CallBinding,

            TypeErrorKind::InvalidGenericArgument { .. } => ErrorCategory::GenericInstantiation,
        }
    }
}

/// A semantic diagnostic: an error kind at a source position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self::new(
            TypeErrorKind::TypeMismatch {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::with_color(ColorChoice::Auto)
    }

    pub fn with_color(color: ColorChoice) -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(color),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let diagnostic = match error {
            CompileError::Lexer { message, span } => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Parser { message, span } => Diagnostic::error()
                .with_message("Syntax error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        };

        self.emit(&diagnostic);
    }

    pub fn report_type_error(&self, file_id: usize, error: &TypeError) {
        self.emit(&type_error_diagnostic(file_id, error));
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the codespan diagnostic for a semantic error
pub(crate) fn type_error_diagnostic(file_id: usize, error: &TypeError) -> Diagnostic<usize> {
    Diagnostic::error()
        .with_message(error.kind.to_string())
        .with_code(error.kind.code())
        .with_labels(vec![Label::primary(file_id, error.span.start..error.span.end)])
        .with_notes(vec![format!("{} error", error.kind.category().as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_code_matches_variant() {
        let kind = TypeErrorKind::LiteralOutOfRange {
            value: "256".to_string(),
            ty: "u8".to_string(),
        };
        assert_eq!(kind.code(), "LiteralOutOfRange");
        assert_eq!(kind.category(), ErrorCategory::ConstantEvaluation);
        assert_eq!(kind.to_string(), "literal 256 is out of range for u8");
    }

    #[test]
    fn test_type_error_display_uses_kind() {
        let err = TypeError::mismatch("^u8", "^mut u8", Span::new(4, 9));
        assert_eq!(err.to_string(), "mismatched types: expected ^u8, found ^mut u8");
        assert_eq!(err.kind.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn test_diagnostic_carries_code_and_label() {
        let err = TypeError::new(
            TypeErrorKind::ImmutableAssignment { name: "x".to_string() },
            Span::new(10, 11),
        );
        let diagnostic = type_error_diagnostic(0, &err);
        assert_eq!(diagnostic.code.as_deref(), Some("ImmutableAssignment"));
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 10..11);
    }
}
