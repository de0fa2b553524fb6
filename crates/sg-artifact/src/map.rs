//! Artifact-to-message mapping.
//!
//! When a message is issued by reference, the issuer stores it here under
//! the artifact string and hands only the artifact to the relying party.
//! The relying party later dereferences the artifact back to the message.
//! Entries expire on a configured lifetime; an expired entry is absent to
//! every reader even before the store physically evicts it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use sg_core::SamlMessage;
use sg_storage::StorageService;

use crate::error::{ArtifactError, ArtifactResult};

/// Storage context namespace for artifact map records.
const STORAGE_CONTEXT: &str = "artifact-map";

/// One issued artifact and the message it dereferences to.
///
/// The message held here is a serde round-trip copy, detached from any
/// document the original was parsed out of, so retrieval can re-attach it
/// anywhere without ownership ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMapEntry {
    /// The artifact string (primary key).
    pub artifact: String,
    /// Entity ID of the issuer that stored the message.
    pub issuer_id: String,
    /// Entity ID of the relying party the artifact was issued to.
    pub relying_party_id: String,
    /// The stored message.
    pub message: SamlMessage,
    /// Absolute instant after which the entry is absent.
    pub expiration: DateTime<Utc>,
}

/// Expiring map from artifact strings to stored messages.
///
/// All operations are safe under concurrent use from independent request
/// tasks; operations on distinct artifacts do not contend.
#[derive(Debug, Clone)]
pub struct ArtifactMap<S> {
    storage: Arc<S>,
    lifetime: Duration,
}

impl<S: StorageService> ArtifactMap<S> {
    /// Creates a map storing entries for `lifetime_secs` seconds.
    #[must_use]
    pub fn new(storage: Arc<S>, lifetime_secs: u64) -> Self {
        Self {
            storage,
            lifetime: Duration::seconds(lifetime_secs as i64),
        }
    }

    /// Stores a message under an artifact string.
    ///
    /// The entry expires `lifetime` from now. Storing an artifact that
    /// already has a live entry fails: artifact strings carry 20 bytes of
    /// entropy, so a collision means the same artifact was issued twice.
    pub async fn put(
        &self,
        artifact: &str,
        relying_party_id: &str,
        issuer_id: &str,
        message: &SamlMessage,
    ) -> ArtifactResult<()> {
        let expiration = Utc::now() + self.lifetime;
        let entry = ArtifactMapEntry {
            artifact: artifact.to_string(),
            issuer_id: issuer_id.to_string(),
            relying_party_id: relying_party_id.to_string(),
            message: message.clone(),
            expiration,
        };

        let value = serde_json::to_string(&entry)
            .map_err(|e| ArtifactError::Serialization(e.to_string()))?;

        let created = self
            .storage
            .create(STORAGE_CONTEXT, artifact, &value, Some(expiration))
            .await?;

        if !created {
            return Err(ArtifactError::DuplicateArtifact(artifact.to_string()));
        }

        tracing::debug!(issuer = issuer_id, relying_party = relying_party_id, "artifact mapped");
        Ok(())
    }

    /// Retrieves the entry for an artifact.
    ///
    /// Returns `None` if the artifact was never stored or its entry has
    /// expired; the two cases are indistinguishable to callers.
    pub async fn get(&self, artifact: &str) -> ArtifactResult<Option<ArtifactMapEntry>> {
        let Some(record) = self.storage.read(STORAGE_CONTEXT, artifact).await? else {
            return Ok(None);
        };

        let entry: ArtifactMapEntry = serde_json::from_str(&record.value)
            .map_err(|e| ArtifactError::Serialization(e.to_string()))?;
        Ok(Some(entry))
    }

    /// Checks whether a live entry exists, without deserializing it.
    pub async fn contains(&self, artifact: &str) -> ArtifactResult<bool> {
        Ok(self.storage.read(STORAGE_CONTEXT, artifact).await?.is_some())
    }

    /// Removes the entry for an artifact.
    ///
    /// Idempotent: removing an absent or expired artifact is not an error.
    pub async fn remove(&self, artifact: &str) -> ArtifactResult<()> {
        let removed = self.storage.delete(STORAGE_CONTEXT, artifact).await?;
        if !removed {
            tracing::debug!("artifact already absent on remove");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sg_core::SamlVersion;
    use sg_storage::{InMemoryStorageService, StorageError, StorageRecord, StorageResult};

    fn sample_message() -> SamlMessage {
        SamlMessage::new("_response1", SamlVersion::V20, Utc::now())
            .with_issuer("https://idp.example.org")
            .with_payload("<samlp:Response ID=\"_response1\">body</samlp:Response>")
    }

    fn map_with_lifetime(lifetime_secs: u64) -> ArtifactMap<InMemoryStorageService> {
        ArtifactMap::new(Arc::new(InMemoryStorageService::new()), lifetime_secs)
    }

    #[tokio::test]
    async fn put_then_contains_and_get() {
        let map = map_with_lifetime(60);
        let message = sample_message();

        map.put("AAQAA...", "https://sp.example.com", "https://idp.example.org", &message)
            .await
            .unwrap();

        assert!(map.contains("AAQAA...").await.unwrap());

        let entry = map.get("AAQAA...").await.unwrap().unwrap();
        assert_eq!(entry.issuer_id, "https://idp.example.org");
        assert_eq!(entry.relying_party_id, "https://sp.example.com");
        assert_eq!(entry.message, message);
    }

    #[tokio::test]
    async fn stored_message_is_detached_copy() {
        let map = map_with_lifetime(60);
        let mut message = sample_message();

        map.put("artifact-a", "rp", "issuer", &message).await.unwrap();

        // Mutating the original after put must not affect the stored copy.
        message.payload = "<mutated/>".to_string();

        let entry = map.get("artifact-a").await.unwrap().unwrap();
        assert_eq!(entry.message.payload, sample_message().payload);
    }

    #[tokio::test]
    async fn get_of_unknown_artifact_is_none() {
        let map = map_with_lifetime(60);
        assert!(map.get("never-stored").await.unwrap().is_none());
        assert!(!map.contains("never-stored").await.unwrap());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let map = map_with_lifetime(60);
        map.put("artifact-b", "rp", "issuer", &sample_message()).await.unwrap();

        map.remove("artifact-b").await.unwrap();
        assert!(!map.contains("artifact-b").await.unwrap());

        // Second remove, and a remove of something never stored.
        map.remove("artifact-b").await.unwrap();
        map.remove("never-stored").await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_put_is_an_error() {
        let map = map_with_lifetime(60);
        map.put("artifact-c", "rp", "issuer", &sample_message()).await.unwrap();

        let err = map
            .put("artifact-c", "rp", "issuer", &sample_message())
            .await
            .unwrap_err();
        assert!(matches!(err, ArtifactError::DuplicateArtifact(_)));
    }

    #[tokio::test]
    async fn entry_expires_after_lifetime() {
        let map = map_with_lifetime(1);
        map.put("artifact-d", "rp", "issuer", &sample_message()).await.unwrap();
        assert!(map.contains("artifact-d").await.unwrap());

        tokio::time::sleep(std::time::Duration::from_secs(3)).await;

        assert!(map.get("artifact-d").await.unwrap().is_none());
        assert!(!map.contains("artifact-d").await.unwrap());
    }

    /// A store whose every operation fails, for error-path coverage.
    #[derive(Debug)]
    struct BrokenStorage;

    #[async_trait]
    impl StorageService for BrokenStorage {
        async fn create(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: Option<DateTime<Utc>>,
        ) -> StorageResult<bool> {
            Err(StorageError::Backend("disk on fire".to_string()))
        }

        async fn read(&self, _: &str, _: &str) -> StorageResult<Option<StorageRecord>> {
            Err(StorageError::Backend("disk on fire".to_string()))
        }

        async fn update(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: Option<DateTime<Utc>>,
        ) -> StorageResult<bool> {
            Err(StorageError::Backend("disk on fire".to_string()))
        }

        async fn delete(&self, _: &str, _: &str) -> StorageResult<bool> {
            Err(StorageError::Backend("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn storage_failure_is_not_absence() {
        let map = ArtifactMap::new(Arc::new(BrokenStorage), 60);

        let err = map.get("anything").await.unwrap_err();
        assert!(matches!(err, ArtifactError::Storage(_)));

        let err = map.contains("anything").await.unwrap_err();
        assert!(matches!(err, ArtifactError::Storage(_)));
    }
}
