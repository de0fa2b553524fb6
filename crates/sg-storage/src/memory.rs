//! In-memory storage backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::StorageResult;
use crate::provider::StorageService;
use crate::record::StorageRecord;

/// In-memory [`StorageService`] backed by a sharded concurrent map.
///
/// Records are keyed by `(context, key)`. Expiration is lazy: expired
/// records are overwritten on `create`, invisible to `read`, and swept by
/// [`purge_expired`](Self::purge_expired) when a caller wants to reclaim
/// memory proactively. The map's per-key entry locking makes `create` an
/// atomic insert-if-absent-and-not-expired.
#[derive(Debug, Default)]
pub struct InMemoryStorageService {
    records: DashMap<(String, String), StorageRecord>,
}

impl InMemoryStorageService {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records, including not-yet-purged expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes every expired record and returns how many were purged.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired(now));
        let purged = before.saturating_sub(self.records.len());
        if purged > 0 {
            tracing::debug!(purged, "purged expired storage records");
        }
        purged
    }
}

#[async_trait]
impl StorageService for InMemoryStorageService {
    async fn create(
        &self,
        context: &str,
        key: &str,
        value: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> StorageResult<bool> {
        let now = Utc::now();
        match self.records.entry((context.to_string(), key.to_string())) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(StorageRecord::new(value, expiration));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StorageRecord::new(value, expiration));
                Ok(true)
            }
        }
    }

    async fn read(&self, context: &str, key: &str) -> StorageResult<Option<StorageRecord>> {
        let now = Utc::now();
        match self.records.get(&(context.to_string(), key.to_string())) {
            Some(record) if record.is_expired(now) => {
                // Expired-but-unpurged is indistinguishable from absent to
                // callers; the log line keeps the two apart for debugging.
                tracing::debug!(context, "record expired but not yet purged");
                Ok(None)
            }
            Some(record) => Ok(Some(record.clone())),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        context: &str,
        key: &str,
        value: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> StorageResult<bool> {
        let now = Utc::now();
        match self.records.entry((context.to_string(), key.to_string())) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.remove();
                    Ok(false)
                } else {
                    occupied.insert(StorageRecord::new(value, expiration));
                    Ok(true)
                }
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn delete(&self, context: &str, key: &str) -> StorageResult<bool> {
        let now = Utc::now();
        match self.records.entry((context.to_string(), key.to_string())) {
            Entry::Occupied(occupied) => {
                let was_live = !occupied.get().is_expired(now);
                occupied.remove();
                Ok(was_live)
            }
            Entry::Vacant(_) => Ok(false),
        }
    }
}
