//! Stored record value.

use chrono::{DateTime, Utc};

/// A stored record: an opaque value plus an optional absolute expiration.
///
/// Expiration is wall-clock based. A record whose expiration has passed is
/// logically absent even before the backend physically evicts it; readers
/// must never observe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRecord {
    /// The stored value.
    pub value: String,
    /// Absolute expiration instant, or `None` for no expiration.
    pub expiration: Option<DateTime<Utc>>,
}

impl StorageRecord {
    /// Creates a record with an expiration.
    #[must_use]
    pub fn new(value: impl Into<String>, expiration: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expiration,
        }
    }

    /// Returns true if the record is expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|exp| exp <= now)
    }
}
