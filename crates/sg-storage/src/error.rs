//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation errors.
///
/// A backend failure is always distinct from "record not found": absence
/// is reported as `Ok(None)`/`Ok(false)` by the operations themselves.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A record could not be serialized or deserialized.
    #[error("storage serialization error: {0}")]
    Serialization(String),

    /// The operation exceeded the backend's own timeout policy.
    #[error("storage operation timed out")]
    Timeout,

    /// The storage service was misconfigured.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}
