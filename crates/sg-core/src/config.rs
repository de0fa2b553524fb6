//! Configuration for the security core.
//!
//! All configuration is carried by explicitly constructed values passed
//! down to the components that need them, so concurrent tests and tenants
//! can run with isolated instances.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the message security core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Artifact map configuration.
    pub artifact_map: ArtifactMapConfig,
    /// Replay cache configuration.
    pub replay_cache: ReplayCacheConfig,
    /// Outbound signing policy.
    pub signing: SigningPolicy,
}

/// Artifact map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMapConfig {
    /// Lifetime of a stored artifact, in seconds.
    pub lifetime_secs: u64,
}

impl Default for ArtifactMapConfig {
    fn default() -> Self {
        // Artifacts are dereferenced within one redirect round trip.
        Self { lifetime_secs: 60 }
    }
}

/// Replay cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayCacheConfig {
    /// How long a seen message ID stays live, in seconds.
    pub window_secs: u64,
    /// Clock skew tolerance added to the window, in seconds.
    pub clock_skew_secs: u64,
}

impl Default for ReplayCacheConfig {
    fn default() -> Self {
        Self {
            window_secs: 180,
            clock_skew_secs: 0,
        }
    }
}

/// Outbound signing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningPolicy {
    /// Whether error responses are signed like any other outbound message.
    pub sign_error_responses: bool,
}

impl Default for SigningPolicy {
    fn default() -> Self {
        Self {
            sign_error_responses: true,
        }
    }
}
