//! Engine failures

use numkit_core::{LiteralError, NumkitError, WireError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// An input buffer could not be decoded
    #[error("malformed input to '{entry}': {source}")]
    Malformed {
        entry: &'static str,
        #[source]
        source: WireError,
    },

    /// Text handed to the parse entry point is not a literal
    #[error(transparent)]
    Literal(#[from] LiteralError),

    /// The engine does not provide this entry point
    #[error("entry point '{0}' is not supported")]
    Unsupported(String),

    #[error("'{entry}' takes {expected} buffers, got {got}")]
    Arity {
        entry: &'static str,
        expected: usize,
        got: usize,
    },

    /// Parameter outside what the kernel accepts
    #[error("'{entry}': {details}")]
    Domain { entry: &'static str, details: String },

    #[error("'{entry}' failed: {details}")]
    Failure { entry: &'static str, details: String },
}

impl EngineError {
    pub fn malformed(entry: &'static str, source: WireError) -> Self {
        EngineError::Malformed { entry, source }
    }

    pub fn domain(entry: &'static str, details: impl Into<String>) -> Self {
        EngineError::Domain {
            entry,
            details: details.into(),
        }
    }

    pub fn failure(entry: &'static str, details: impl Into<String>) -> Self {
        EngineError::Failure {
            entry,
            details: details.into(),
        }
    }
}

impl From<EngineError> for NumkitError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Malformed { source, .. } => NumkitError::from(source),
            EngineError::Literal(err) => NumkitError::from(err),
            EngineError::Domain { entry, details } => {
                NumkitError::domain_error(details).in_function(entry)
            }
            EngineError::Arity {
                entry,
                expected,
                got,
            } => NumkitError::arity(entry, &expected.to_string(), got),
            other => NumkitError::engine(other.to_string()),
        }
    }
}
