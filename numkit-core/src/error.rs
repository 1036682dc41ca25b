//! Structured errors
//!
//! Programmer errors (wrong type, wrong arity, malformed literal or buffer)
//! surface immediately as a `NumkitError`. Mathematical edge cases such as
//! division by zero are values (NaN, Infinity) and never reach this module.

use crate::{LiteralError, WireError};
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_LITERAL: &str = "INVALID_LITERAL";
    pub const UNSUPPORTED_TYPE: &str = "UNSUPPORTED_TYPE";
    pub const ARITY_ERROR: &str = "ARITY_ERROR";
    pub const INVALID_ENCODING: &str = "INVALID_ENCODING";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const UNKNOWN_FUNCTION: &str = "UNKNOWN_FUNCTION";
    pub const ENGINE_ERROR: &str = "ENGINE_ERROR";
}

/// Error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Text does not match the rational/complex grammar
    InvalidLiteral,
    /// Argument of a kind the operation does not recognize
    UnsupportedType,
    /// Wrong argument count for a fixed-arity operation
    ArityError,
    /// Buffer from the compute engine failed validation
    InvalidEncoding,
    /// Parameter outside the range an operation accepts
    DomainError,
    UnknownFunction,
    EngineError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidLiteral => codes::INVALID_LITERAL,
            ErrorKind::UnsupportedType => codes::UNSUPPORTED_TYPE,
            ErrorKind::ArityError => codes::ARITY_ERROR,
            ErrorKind::InvalidEncoding => codes::INVALID_ENCODING,
            ErrorKind::DomainError => codes::DOMAIN_ERROR,
            ErrorKind::UnknownFunction => codes::UNKNOWN_FUNCTION,
            ErrorKind::EngineError => codes::ENGINE_ERROR,
        }
    }
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Function being called
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Argument position (0-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<usize>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumkitError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
}

impl NumkitError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            context: None,
        }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set function context
    pub fn in_function(mut self, function: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.function = Some(function.into());
        self
    }

    /// Builder: set argument position
    pub fn at_argument(mut self, index: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.argument = Some(index);
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_literal(text: &str, details: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidLiteral,
            format!("Invalid literal '{}': {}", text, details.into()),
        )
        .with_suggestion("Use forms like 3/4, -1.2[3], 2.5e3 or 1+2i")
    }

    pub fn unsupported_type(func: &str, expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedType,
            format!("{}() expects {}, got {}", func, expected, got),
        )
    }

    pub fn arity(func: &str, expected: &str, got: usize) -> Self {
        Self::new(
            ErrorKind::ArityError,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn invalid_encoding(details: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidEncoding,
            format!("Invalid encoding: {}", details.into()),
        )
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::DomainError, format!("Domain error: {}", details.into()))
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(ErrorKind::UnknownFunction, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions() to see what is available")
    }

    pub fn engine(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::EngineError, format!("Engine error: {}", details.into()))
    }
}

impl std::fmt::Display for NumkitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for NumkitError {}

impl From<LiteralError> for NumkitError {
    fn from(err: LiteralError) -> Self {
        match err {
            LiteralError::Syntax { text, details } => Self::invalid_literal(&text, details),
            LiteralError::Overflow(text) => {
                Self::invalid_literal(&text, "exponent out of range")
            }
        }
    }
}

impl From<WireError> for NumkitError {
    fn from(err: WireError) -> Self {
        Self::invalid_encoding(err.to_string())
    }
}
