//! Path-query error types.

use thiserror::Error;

/// Errors raised while parsing a path query. Evaluation itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The query text is empty or whitespace.
    #[error("empty path query")]
    Empty,

    /// The query text does not follow the path grammar.
    #[error("invalid path query at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
}
