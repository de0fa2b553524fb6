//! Security handler trait and pipeline runner.

use std::sync::Arc;

use async_trait::async_trait;

use sg_core::{EventType, SecurityEvent};

use crate::context::{MessageContext, MessageState};
use crate::error::{HandlerError, HandlerResult};

/// One security check over an in-flight message.
///
/// Handlers are independently invokable. A handler must leave the context
/// unmodified on failure; the pipeline records the triggering event on
/// its behalf when it maps the error to a rejection.
#[async_trait]
pub trait SecurityHandler: Send + Sync {
    /// Short name used in logs and rejection outcomes.
    fn name(&self) -> &'static str;

    /// Runs the check against the context.
    async fn invoke(&self, context: &mut MessageContext) -> HandlerResult<()>;
}

/// Terminal outcome of running a message through the pipeline.
#[derive(Debug)]
pub enum ProcessingOutcome {
    /// Every handler passed.
    Accepted,
    /// A handler halted processing.
    Rejected {
        /// Name of the rejecting handler.
        handler: &'static str,
        /// The error it raised.
        error: HandlerError,
    },
}

impl ProcessingOutcome {
    /// Returns true if the message was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Ordered pipeline of security handlers.
///
/// Handlers run strictly in order; the first error halts processing and
/// becomes the message's single labeled rejection. No lock is held while
/// a handler runs, so handlers are free to perform I/O (the trust chain
/// may fetch credentials, the replay cache may call out to its store).
pub struct SecurityPipeline {
    handlers: Vec<Arc<dyn SecurityHandler>>,
}

impl SecurityPipeline {
    /// Creates a pipeline from an ordered handler list.
    #[must_use]
    pub fn new(handlers: Vec<Arc<dyn SecurityHandler>>) -> Self {
        Self { handlers }
    }

    /// Runs the message context through every handler.
    pub async fn process(&self, context: &mut MessageContext) -> ProcessingOutcome {
        for handler in &self.handlers {
            if let Err(error) = handler.invoke(context).await {
                tracing::warn!(
                    handler = handler.name(),
                    %error,
                    message_id = %context.message().id,
                    "message rejected"
                );

                let mut event = SecurityEvent::failure(error.event_type(), error.to_string())
                    .message(context.message().id.clone());
                if let Some(peer) = context.effective_peer() {
                    event = event.peer(peer.to_string());
                }
                context.record_event(event);
                context.advance(MessageState::Rejected);

                return ProcessingOutcome::Rejected {
                    handler: handler.name(),
                    error,
                };
            }
        }

        context.advance(MessageState::Accepted);
        context.record_event(
            SecurityEvent::success(EventType::MessageAccepted).message(context.message().id.clone()),
        );
        ProcessingOutcome::Accepted
    }
}
