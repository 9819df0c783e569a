//! Cross-cutting error types for Trapline.
//!
//! Domain-specific errors (`ApiError`, `PathError`, `QueryError`) are defined
//! in their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Trapline crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record could not be decoded into its typed shape.
    #[error("invalid {collection} record at index {index}: {reason}")]
    InvalidRecord {
        collection: String,
        index: usize,
        reason: String,
    },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
