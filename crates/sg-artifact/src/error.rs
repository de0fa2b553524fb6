//! Artifact error types.

use thiserror::Error;

use sg_storage::StorageError;

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Artifact codec and map errors.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// A field or the whole artifact had the wrong length.
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which field failed validation.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Observed length in bytes.
        actual: usize,
    },

    /// The leading type code did not match the decoder's artifact type.
    #[error("artifact type code mismatch: expected {expected:#06x}, got {actual:#06x}")]
    TypeCodeMismatch {
        /// Type code the decoder expects.
        expected: u16,
        /// Type code found in the input.
        actual: u16,
    },

    /// Base64 transport decoding failed.
    #[error("artifact base64 decode error: {0}")]
    Base64(String),

    /// The SAML 1 source location was not valid UTF-8.
    #[error("invalid artifact source location: {0}")]
    InvalidSourceLocation(String),

    /// An artifact string was issued twice.
    #[error("artifact already mapped: {0}")]
    DuplicateArtifact(String),

    /// A stored entry could not be serialized or deserialized.
    #[error("artifact entry serialization error: {0}")]
    Serialization(String),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<base64::DecodeError> for ArtifactError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_error_names_field_and_sizes() {
        let err = ArtifactError::InvalidLength {
            field: "source ID",
            expected: 20,
            actual: 19,
        };
        let text = err.to_string();
        assert!(text.contains("source ID"));
        assert!(text.contains("20"));
        assert!(text.contains("19"));
    }

    #[test]
    fn type_code_error_is_hex() {
        let err = ArtifactError::TypeCodeMismatch {
            expected: 0x0004,
            actual: 0x0005,
        };
        assert!(err.to_string().contains("0x0004"));
        assert!(err.to_string().contains("0x0005"));
    }
}
