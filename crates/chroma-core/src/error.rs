//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur constructing or converting core types.
#[derive(Debug, Error)]
pub enum Error {
    /// Frame dimensions are zero or otherwise unusable.
    #[error("invalid dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),

    /// Supplied buffer does not match the declared dimensions.
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch {
        /// Number of elements required by the dimensions.
        expected: usize,
        /// Number of elements actually supplied.
        actual: usize,
    },

    /// Pixel data arrived in a layout the core cannot consume.
    #[error("unsupported pixel layout: {0}")]
    UnsupportedLayout(String),
}
