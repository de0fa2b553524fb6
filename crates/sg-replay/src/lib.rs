//! # sg-replay
//!
//! Replay detection for SAML protocol messages.
//!
//! A replay cache remembers `(peer entity ID, message ID)` pairs for a
//! bounded window and flags a second sighting of a live pair as a replay.
//! The check and the recording are one atomic storage `create`, so two
//! copies of the same message delivered concurrently resolve to exactly
//! one acceptance.
//!
//! Expiry uses an absolute instant computed once when the pair is first
//! recorded; a later check never recomputes a relative window.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use sg_storage::{StorageError, StorageService};

/// Storage context namespace for replay records.
const STORAGE_CONTEXT: &str = "replay";

/// Result type for replay cache operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Replay cache errors.
///
/// A failing backing store is always fatal to the check: an undecidable
/// replay check must never pass as "not a replay".
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The backing store failed during the check-and-set.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Time-bounded set of seen `(peer, message ID)` pairs.
#[derive(Debug, Clone)]
pub struct ReplayCache<S> {
    storage: Arc<S>,
    window: Duration,
    clock_skew: Duration,
}

impl<S: StorageService> ReplayCache<S> {
    /// Creates a cache with the given expiration window, in seconds.
    #[must_use]
    pub fn new(storage: Arc<S>, window_secs: u64) -> Self {
        Self {
            storage,
            window: Duration::seconds(window_secs as i64),
            clock_skew: Duration::zero(),
        }
    }

    /// Adds a symmetric clock-skew tolerance to the window.
    #[must_use]
    pub fn with_clock_skew(mut self, skew_secs: u64) -> Self {
        self.clock_skew = Duration::seconds(skew_secs as i64);
        self
    }

    /// Checks whether `(issuer, message_id)` has been seen live, and if
    /// not, records it.
    ///
    /// Returns `true` for a replay. The first sighting records the pair
    /// with expiration `base + window + skew`, where `base` is the message
    /// issue instant when supplied (so the window tracks the message's own
    /// timeline) and the current instant otherwise. Check and record are a
    /// single atomic insert; there is no window where two concurrent calls
    /// can both record the same pair.
    pub async fn is_replay(
        &self,
        issuer: &str,
        message_id: &str,
        issue_instant: Option<DateTime<Utc>>,
    ) -> ReplayResult<bool> {
        let base = issue_instant.unwrap_or_else(Utc::now);
        let expiration = base + self.window + self.clock_skew;
        let key = replay_key(issuer, message_id);

        let created = self
            .storage
            .create(STORAGE_CONTEXT, &key, &base.to_rfc3339(), Some(expiration))
            .await?;

        if created {
            Ok(false)
        } else {
            tracing::warn!(issuer, message_id, "replayed message detected");
            Ok(true)
        }
    }
}

/// Composite storage key for a `(peer, message ID)` pair.
///
/// The issuer length prefix keeps distinct pairs distinct even when an
/// entity ID itself contains the separator.
fn replay_key(issuer: &str, message_id: &str) -> String {
    format!("{}!{issuer}!{message_id}", issuer.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_storage::InMemoryStorageService;

    const PEER: &str = "https://sp.example.com";

    fn cache_with_window(window_secs: u64) -> ReplayCache<InMemoryStorageService> {
        ReplayCache::new(Arc::new(InMemoryStorageService::new()), window_secs)
    }

    #[tokio::test]
    async fn first_sighting_is_not_a_replay() {
        let cache = cache_with_window(180);
        assert!(!cache.is_replay(PEER, "abc123", None).await.unwrap());
    }

    #[tokio::test]
    async fn second_sighting_is_a_replay() {
        let cache = cache_with_window(180);
        assert!(!cache.is_replay(PEER, "abc123", None).await.unwrap());
        assert!(cache.is_replay(PEER, "abc123", None).await.unwrap());
    }

    #[tokio::test]
    async fn distinct_ids_do_not_collide() {
        let cache = cache_with_window(180);
        assert!(!cache.is_replay(PEER, "abc123", None).await.unwrap());
        assert!(!cache.is_replay(PEER, "xyz789", None).await.unwrap());
    }

    #[tokio::test]
    async fn same_id_from_distinct_peers_is_not_a_replay() {
        let cache = cache_with_window(180);
        assert!(!cache.is_replay("https://sp-one.example.com", "abc123", None).await.unwrap());
        assert!(!cache.is_replay("https://sp-two.example.com", "abc123", None).await.unwrap());
    }

    #[tokio::test]
    async fn expired_entry_is_accepted_again() {
        let cache = cache_with_window(3);
        assert!(!cache.is_replay(PEER, "abc123", None).await.unwrap());

        tokio::time::sleep(std::time::Duration::from_secs(4)).await;

        assert!(!cache.is_replay(PEER, "abc123", None).await.unwrap());
    }

    #[tokio::test]
    async fn clock_skew_extends_the_window() {
        // Issue instant far enough back that the bare window has lapsed,
        // but inside window + skew.
        let cache = cache_with_window(1).with_clock_skew(120);
        let issued = Utc::now() - Duration::seconds(30);

        assert!(!cache.is_replay(PEER, "skewed", Some(issued)).await.unwrap());
        assert!(cache.is_replay(PEER, "skewed", Some(issued)).await.unwrap());
    }

    #[tokio::test]
    async fn stale_issue_instant_expires_immediately() {
        // With no skew, a message issued before now - window gets an
        // expiration in the past and is never considered live.
        let cache = cache_with_window(5);
        let issued = Utc::now() - Duration::seconds(60);

        assert!(!cache.is_replay(PEER, "stale", Some(issued)).await.unwrap());
        assert!(!cache.is_replay(PEER, "stale", Some(issued)).await.unwrap());
    }

    #[test]
    fn replay_keys_do_not_collide_on_separator() {
        assert_ne!(replay_key("a!b", "c"), replay_key("a", "b!c"));
    }

    #[tokio::test]
    async fn concurrent_duplicates_accept_exactly_one() {
        let cache = Arc::new(cache_with_window(180));
        let mut handles = Vec::new();

        for _ in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.is_replay(PEER, "contested", None).await.unwrap()
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if !handle.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
    }
}
