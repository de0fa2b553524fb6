//! # sg-core
//!
//! Shared domain model for the samlguard security core.
//!
//! This crate holds the types every other crate in the workspace speaks:
//!
//! - [`SamlMessage`] - the opaque, detachable SAML message value
//! - [`SamlVersion`] / [`StatusCode`] - protocol version and status types
//! - [`XmlSignature`] - the signature value consumed by trust engines
//! - [`SecurityConfig`] - explicit, passed-down configuration
//! - [`SecurityEvent`] - audit records emitted by the security pipeline
//!
//! The core never parses XML; message payloads are carried as opaque
//! strings produced and consumed by the (external) binding layer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod event;
pub mod message;

pub use config::{ArtifactMapConfig, ReplayCacheConfig, SecurityConfig, SigningPolicy};
pub use event::{EventOutcome, EventType, SecurityEvent};
pub use message::{SamlMessage, SamlVersion, StatusCode, XmlSignature};
