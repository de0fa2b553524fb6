//! Pipeline error types.

use thiserror::Error;

use sg_core::EventType;
use sg_replay::ReplayError;
use sg_trust::TrustError;

/// Result type for handler invocations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Error raised by a message signer implementation.
#[derive(Debug, Error)]
#[error("signer error: {0}")]
pub struct SignerError(pub String);

/// Errors a security handler can halt the pipeline with.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The message version was missing, unrecognized, or not expected.
    #[error("unacceptable message version: {actual:?}")]
    VersionMismatch {
        /// The version string found on the message, if any.
        actual: Option<String>,
    },

    /// The message was already seen inside the replay window.
    #[error("message replay detected: {message_id}")]
    Replay {
        /// ID of the replayed message.
        message_id: String,
    },

    /// The signature was evaluated and no engine trusts it.
    #[error("message signature is not trusted")]
    UntrustedSignature,

    /// Trust evaluation was impossible (criteria or engine failure).
    #[error(transparent)]
    TrustEvaluation(#[from] TrustError),

    /// The replay check could not be performed.
    #[error(transparent)]
    ReplayCheck(#[from] ReplayError),

    /// Outbound signing failed.
    #[error(transparent)]
    Signing(#[from] SignerError),

    /// The message context lacks a field the handler requires.
    #[error("message context is missing {0}")]
    MissingField(&'static str),
}

impl HandlerError {
    /// Maps the error to the event type recorded on the rejected context.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::VersionMismatch { .. } => EventType::VersionMismatch,
            Self::Replay { .. } => EventType::ReplayDetected,
            Self::UntrustedSignature => EventType::SignatureUntrusted,
            Self::TrustEvaluation(_)
            | Self::ReplayCheck(_)
            | Self::Signing(_)
            | Self::MissingField(_) => EventType::MessageRejected,
        }
    }
}
