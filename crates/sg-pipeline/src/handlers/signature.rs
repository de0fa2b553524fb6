//! Signature trust validation handler.

use std::sync::Arc;

use async_trait::async_trait;

use sg_core::{EventType, SecurityEvent, XmlSignature};
use sg_trust::{
    CriteriaSet, EntityIdCriterion, ProtocolCriterion, TrustEngine, TrustResult, UsageCriterion,
    UsageType,
};

use crate::context::{MessageContext, MessageState};
use crate::error::{HandlerError, HandlerResult};
use crate::handler::SecurityHandler;

/// Builds the evaluation criteria for a message's signature.
///
/// Deployments override this to add their own criterion types (metadata
/// role, endpoint) on top of what the context offers.
pub trait CriteriaBuilder: Send + Sync {
    /// Builds the criteria set for the given context.
    fn build(&self, context: &MessageContext) -> TrustResult<CriteriaSet>;
}

/// Default criteria: candidate peer entity ID, signing usage, and the
/// SAML 2.0 protocol.
pub struct PeerEntityCriteriaBuilder;

impl CriteriaBuilder for PeerEntityCriteriaBuilder {
    fn build(&self, context: &MessageContext) -> TrustResult<CriteriaSet> {
        let peer = context.effective_peer().ok_or_else(|| {
            sg_trust::TrustError::Criteria("no candidate peer entity ID available".to_string())
        })?;

        Ok(CriteriaSet::new()
            .with(EntityIdCriterion(peer.to_string()))
            .with(UsageCriterion(UsageType::Signing))
            .with(ProtocolCriterion(
                "urn:oasis:names:tc:SAML:2.0:protocol".to_string(),
            )))
    }
}

/// Validates the message signature through a trust engine (chain).
///
/// An unsigned message is passed through (signature-requiredness is an
/// upstream policy decision, not this handler's). A `false` verdict is an
/// untrusted-signature rejection; an engine error is a fatal
/// evaluation error. Both are terminal, only the latter is erroneous.
pub struct SignatureTrustHandler {
    engine: Arc<dyn TrustEngine<XmlSignature>>,
    criteria: Arc<dyn CriteriaBuilder>,
}

impl SignatureTrustHandler {
    /// Creates a handler with the default criteria builder.
    #[must_use]
    pub fn new(engine: Arc<dyn TrustEngine<XmlSignature>>) -> Self {
        Self {
            engine,
            criteria: Arc::new(PeerEntityCriteriaBuilder),
        }
    }

    /// Replaces the criteria builder.
    #[must_use]
    pub fn with_criteria_builder(mut self, criteria: Arc<dyn CriteriaBuilder>) -> Self {
        self.criteria = criteria;
        self
    }
}

#[async_trait]
impl SecurityHandler for SignatureTrustHandler {
    fn name(&self) -> &'static str {
        "signature-trust"
    }

    async fn invoke(&self, context: &mut MessageContext) -> HandlerResult<()> {
        let Some(signature) = context.message().signature.clone() else {
            tracing::debug!(
                message_id = %context.message().id,
                "message is unsigned, skipping signature trust evaluation"
            );
            context.advance(MessageState::SignatureValidated);
            return Ok(());
        };

        let criteria = self.criteria.build(context)?;
        let trusted = self.engine.validate(&signature, &criteria).await?;

        if !trusted {
            return Err(HandlerError::UntrustedSignature);
        }

        context.advance(MessageState::SignatureValidated);
        context.record_event(
            SecurityEvent::success(EventType::SignatureValidated)
                .message(context.message().id.clone()),
        );
        Ok(())
    }
}
