//! Error type for the symbolic engine.

use thiserror::Error;

/// Result type alias using [`SymbolicError`].
pub type Result<T> = std::result::Result<T, SymbolicError>;

/// Errors produced by the symbolic engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    /// The input string could not be tokenized or parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// An identifier that is neither the bound variable nor a known
    /// function name.
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    /// The equation is outside what the solver handles.
    #[error("cannot solve: {0}")]
    Unsolvable(String),

    /// An operation is not defined for the given expression.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl SymbolicError {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an unsolvable error.
    pub fn unsolvable(message: impl Into<String>) -> Self {
        Self::Unsolvable(message.into())
    }
}
