//! Replay check handler.

use async_trait::async_trait;

use sg_core::{EventType, SecurityEvent};
use sg_replay::ReplayCache;
use sg_storage::StorageService;

use crate::context::{MessageContext, MessageState};
use crate::error::{HandlerError, HandlerResult};
use crate::handler::SecurityHandler;

/// Peer label used when neither the transport nor the message names one.
///
/// Replay protection still applies to anonymous peers; all anonymous
/// traffic shares one namespace.
const UNKNOWN_PEER: &str = "(unspecified)";

/// Rejects messages whose ID was already seen inside the replay window.
///
/// The check-and-record is atomic inside the cache, so concurrent
/// delivery of the same message accepts exactly one copy. A failing
/// cache backend is a fatal error, never a pass.
pub struct ReplayHandler<S> {
    cache: ReplayCache<S>,
}

impl<S: StorageService> ReplayHandler<S> {
    /// Creates a handler over the given replay cache.
    #[must_use]
    pub fn new(cache: ReplayCache<S>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl<S: StorageService> SecurityHandler for ReplayHandler<S> {
    fn name(&self) -> &'static str {
        "replay-check"
    }

    async fn invoke(&self, context: &mut MessageContext) -> HandlerResult<()> {
        let message = context.message();
        if message.id.is_empty() {
            return Err(HandlerError::MissingField("message ID"));
        }

        let peer = context.effective_peer().unwrap_or(UNKNOWN_PEER).to_string();
        let message_id = message.id.clone();
        let issue_instant = message.issue_instant;

        let replayed = self
            .cache
            .is_replay(&peer, &message_id, Some(issue_instant))
            .await?;

        if replayed {
            return Err(HandlerError::Replay { message_id });
        }

        context.advance(MessageState::ReplayChecked);
        context.record_event(
            SecurityEvent::success(EventType::ReplayChecked)
                .peer(peer)
                .message(message_id),
        );
        Ok(())
    }
}
