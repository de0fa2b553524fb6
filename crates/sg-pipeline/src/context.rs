//! Per-message processing context.

use sg_core::{SamlMessage, SecurityEvent};

use crate::params::SigningParameters;

/// Processing states of a message moving through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// Message delivered, nothing checked yet.
    Received,
    /// Protocol version accepted.
    VersionChecked,
    /// Replay check passed.
    ReplayChecked,
    /// Signature validated (or message was unsigned).
    SignatureValidated,
    /// All checks passed.
    Accepted,
    /// A handler rejected the message.
    Rejected,
}

/// Context for one in-flight message exchange.
///
/// A context is owned by the task processing its message and is never
/// shared across concurrent message processing; handlers receive it by
/// `&mut`. Shared state (replay cache, artifact map) lives behind the
/// handlers instead.
#[derive(Debug)]
pub struct MessageContext {
    message: SamlMessage,
    peer_entity_id: Option<String>,
    state: MessageState,
    signing_parameters: Option<SigningParameters>,
    events: Vec<SecurityEvent>,
}

impl MessageContext {
    /// Creates a context for a freshly delivered message.
    #[must_use]
    pub fn new(message: SamlMessage) -> Self {
        Self {
            message,
            peer_entity_id: None,
            state: MessageState::Received,
            signing_parameters: None,
            events: Vec::new(),
        }
    }

    /// Sets the peer entity ID established by the transport/binding layer.
    #[must_use]
    pub fn with_peer(mut self, peer_entity_id: impl Into<String>) -> Self {
        self.peer_entity_id = Some(peer_entity_id.into());
        self
    }

    /// Attaches signing parameters for outbound signing.
    #[must_use]
    pub fn with_signing_parameters(mut self, parameters: SigningParameters) -> Self {
        self.signing_parameters = Some(parameters);
        self
    }

    /// The message under processing.
    #[must_use]
    pub const fn message(&self) -> &SamlMessage {
        &self.message
    }

    /// Mutable access to the message (used by the signing handler).
    pub fn message_mut(&mut self) -> &mut SamlMessage {
        &mut self.message
    }

    /// The peer entity ID, if the binding layer established one.
    #[must_use]
    pub fn peer_entity_id(&self) -> Option<&str> {
        self.peer_entity_id.as_deref()
    }

    /// The best available peer identity: the transport-established peer,
    /// falling back to the message's own issuer claim.
    #[must_use]
    pub fn effective_peer(&self) -> Option<&str> {
        self.peer_entity_id().or(self.message.issuer.as_deref())
    }

    /// Current processing state.
    #[must_use]
    pub const fn state(&self) -> MessageState {
        self.state
    }

    /// Advances the state ladder.
    pub fn advance(&mut self, state: MessageState) {
        self.state = state;
    }

    /// Signing parameters, when outbound signing is configured.
    #[must_use]
    pub const fn signing_parameters(&self) -> Option<&SigningParameters> {
        self.signing_parameters.as_ref()
    }

    /// Records a security event.
    pub fn record_event(&mut self, event: SecurityEvent) {
        self.events.push(event);
    }

    /// Events recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> &[SecurityEvent] {
        &self.events
    }
}
