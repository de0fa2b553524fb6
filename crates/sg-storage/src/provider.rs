//! Storage service trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageResult;
use crate::record::StorageRecord;

/// Context-scoped expiring key-value storage.
///
/// Implementations must be thread-safe and support concurrent access from
/// independent request tasks. Operations on distinct keys must not block
/// each other. All operations are async so both local and remote backends
/// fit behind the same trait; timeouts and retries are the backend's own
/// concern and surface only as [`StorageError`](crate::StorageError)
/// pass-throughs.
///
/// Expired-but-not-yet-purged records are indistinguishable from purged
/// ones: `read` returns `None`, `create` treats the slot as free, `update`
/// and `delete` report the record as absent.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates a record if no live record exists under `(context, key)`.
    ///
    /// Returns `true` if the record was created, `false` if a live record
    /// already occupies the slot. The check and the write are a single
    /// atomic step; two concurrent creates for the same key resolve to
    /// exactly one winner.
    async fn create(
        &self,
        context: &str,
        key: &str,
        value: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> StorageResult<bool>;

    /// Reads the live record under `(context, key)`.
    ///
    /// Returns `None` if the record never existed or has expired.
    async fn read(&self, context: &str, key: &str) -> StorageResult<Option<StorageRecord>>;

    /// Replaces the live record under `(context, key)`.
    ///
    /// Returns `true` if a live record was replaced, `false` if there was
    /// nothing to update.
    async fn update(
        &self,
        context: &str,
        key: &str,
        value: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> StorageResult<bool>;

    /// Deletes the record under `(context, key)`.
    ///
    /// Returns `true` if a live record was deleted. Deleting an absent or
    /// expired record is not an error.
    async fn delete(&self, context: &str, key: &str) -> StorageResult<bool>;
}
