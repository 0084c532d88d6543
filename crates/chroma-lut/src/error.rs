//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT generation.
#[derive(Debug, Error)]
pub enum LutError {
    /// Invalid cube size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),
}
