//! Error taxonomy for parsing and dispatching commands.
//!
//! Every variant is recovered at the dispatch boundary: it is printed as a
//! single line and control returns to the prompt.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("malformed command '{0}', expected: package:function [args...]")]
    MalformedCommand(String),

    #[error("function not found: {package}:{function}")]
    NotFound { package: String, function: String },

    #[error("wrong number of arguments: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("argument {position}: expected {expected}, got '{value}'")]
    InvalidArgument {
        position: usize,
        expected: &'static str,
        value: String,
    },

    #[error("{0}")]
    Handler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A handler failure that follows output the handler had already produced.
    #[error("{error}")]
    AfterOutput {
        output: Vec<String>,
        #[source]
        error: Box<DispatchError>,
    },
}

/// Raised by a handler that fails part way through, after rendering some
/// lines. The lines are printed before the error.
#[derive(Error, Debug)]
#[error("{error:#}")]
pub struct PartialOutput {
    pub lines: Vec<String>,
    pub error: anyhow::Error,
}

pub type Result<T> = std::result::Result<T, DispatchError>;

impl DispatchError {
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::UnterminatedQuote
            | DispatchError::MalformedCommand(_)
            | DispatchError::InvalidArgument { .. } => "PARSE_ERROR",
            DispatchError::NotFound { .. } => "NOT_FOUND",
            DispatchError::ArityMismatch { .. } => "ARITY_MISMATCH",
            DispatchError::Handler(_) => "HANDLER_ERROR",
            DispatchError::Io(_) => "IO_ERROR",
            DispatchError::AfterOutput { error, .. } => error.code(),
        }
    }

    /// Classify a failure reported by a handler. An I/O root cause keeps its
    /// own category so the user can tell a failed report write from a logic error.
    pub fn from_handler(err: anyhow::Error) -> Self {
        let err = match err.downcast::<PartialOutput>() {
            Ok(partial) => {
                return DispatchError::AfterOutput {
                    output: partial.lines,
                    error: Box::new(Self::from_handler(partial.error)),
                };
            }
            Err(err) => err,
        };
        match err.downcast::<std::io::Error>() {
            Ok(io) => DispatchError::Io(io),
            Err(other) => DispatchError::Handler(format!("{other:#}")),
        }
    }
}
