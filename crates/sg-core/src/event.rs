//! Security events recorded while processing a message.
//!
//! Handlers append one event per decision to the message context, so a
//! rejected message carries a record of which check rejected it and why.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type categories for message-security decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Protocol version accepted.
    VersionChecked,
    /// Protocol version rejected.
    VersionMismatch,
    /// Message passed the replay check.
    ReplayChecked,
    /// Replay detected.
    ReplayDetected,
    /// Signature validated by a trust engine.
    SignatureValidated,
    /// Signature present but not trusted by any engine.
    SignatureUntrusted,
    /// Outbound message signed.
    MessageSigned,
    /// Message accepted by the full pipeline.
    MessageAccepted,
    /// Message rejected.
    MessageRejected,
    /// Artifact issued into the artifact map.
    ArtifactIssued,
    /// Artifact resolved from the artifact map.
    ArtifactResolved,
}

/// Outcome of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// The check or operation succeeded.
    Success,
    /// The check or operation failed.
    Failure,
}

/// A security-relevant event tied to one message exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Type of event.
    pub event_type: EventType,
    /// Outcome of the event.
    pub outcome: EventOutcome,
    /// Peer entity ID, when known.
    pub peer_entity_id: Option<String>,
    /// The SAML message ID the event concerns.
    pub message_id: Option<String>,
    /// Error message, for failure events.
    pub error: Option<String>,
}

impl SecurityEvent {
    /// Creates a success event.
    #[must_use]
    pub fn success(event_type: EventType) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            event_type,
            outcome: EventOutcome::Success,
            peer_entity_id: None,
            message_id: None,
            error: None,
        }
    }

    /// Creates a failure event with an error message.
    #[must_use]
    pub fn failure(event_type: EventType, error: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            event_type,
            outcome: EventOutcome::Failure,
            peer_entity_id: None,
            message_id: None,
            error: Some(error.into()),
        }
    }

    /// Sets the peer entity ID.
    #[must_use]
    pub fn peer(mut self, peer_entity_id: impl Into<String>) -> Self {
        self.peer_entity_id = Some(peer_entity_id.into());
        self
    }

    /// Sets the message ID.
    #[must_use]
    pub fn message(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }
}
