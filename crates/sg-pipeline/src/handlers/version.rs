//! Protocol version check handler.

use async_trait::async_trait;

use sg_core::{EventType, SamlVersion, SecurityEvent};

use crate::context::{MessageContext, MessageState};
use crate::error::{HandlerError, HandlerResult};
use crate::handler::SecurityHandler;

/// Validates the message's protocol version against an expected set.
///
/// A missing, unrecognized, or unexpected version rejects the message
/// unless the handler is configured to ignore it, in which case
/// processing continues silently.
pub struct VersionHandler {
    expected: Vec<SamlVersion>,
    ignore_missing_or_unrecognized: bool,
}

impl VersionHandler {
    /// Creates a handler expecting a single version.
    #[must_use]
    pub fn new(expected: SamlVersion) -> Self {
        Self {
            expected: vec![expected],
            ignore_missing_or_unrecognized: false,
        }
    }

    /// Adds another acceptable version.
    #[must_use]
    pub fn also_accept(mut self, version: SamlVersion) -> Self {
        self.expected.push(version);
        self
    }

    /// Configures whether unexpected versions are silently tolerated.
    #[must_use]
    pub const fn ignore_missing_or_unrecognized(mut self, ignore: bool) -> Self {
        self.ignore_missing_or_unrecognized = ignore;
        self
    }
}

#[async_trait]
impl SecurityHandler for VersionHandler {
    fn name(&self) -> &'static str {
        "version-check"
    }

    async fn invoke(&self, context: &mut MessageContext) -> HandlerResult<()> {
        let message = context.message();
        let accepted = message
            .parsed_version()
            .is_some_and(|v| self.expected.contains(&v));

        if !accepted {
            if self.ignore_missing_or_unrecognized {
                tracing::debug!(
                    version = %message.version,
                    "ignoring unexpected message version by configuration"
                );
            } else {
                let actual = if message.version.is_empty() {
                    None
                } else {
                    Some(message.version.clone())
                };
                return Err(HandlerError::VersionMismatch { actual });
            }
        }

        context.advance(MessageState::VersionChecked);
        context.record_event(
            SecurityEvent::success(EventType::VersionChecked)
                .message(context.message().id.clone()),
        );
        Ok(())
    }
}
