//! # sg-storage
//!
//! Expiring key-value storage for the samlguard security core.
//!
//! Both the artifact map and the replay cache persist through the same
//! narrow interface: records scoped by a context namespace, each carrying
//! an optional absolute expiration. Implementations must be safe under
//! concurrent access from independent request tasks, and `create` must be
//! atomic so callers get a true insert-if-absent-and-not-expired
//! primitive.
//!
//! The in-memory implementation ([`InMemoryStorageService`]) backs tests
//! and single-node deployments; distributed deployments supply their own
//! implementation of [`StorageService`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod memory;
pub mod provider;
pub mod record;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStorageService;
pub use provider::StorageService;
pub use record::StorageRecord;
