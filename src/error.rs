//! Error types for the render task system.
//!
//! Fallible public APIs (construction, backend operations) return [`Error`].
//! Per-frame anomalies inside the task loop are not surfaced as errors; they
//! are reported through `log::error!` and the frame degrades locally, so the
//! next sync can recover from current scene state.

use thiserror::Error;

/// Result type for render task operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the render task system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A backend operation failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
