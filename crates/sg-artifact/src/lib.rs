//! # sg-artifact
//!
//! SAML artifact support for the samlguard security core:
//!
//! - [`Saml2Artifact`] - the SAML 2.0 type 0x0004 artifact, a fixed
//!   44-byte binary value
//! - [`Saml1Artifact`] - the SAML 1.x type 0x0002 artifact, a 20-byte
//!   assertion handle plus a source-location URL
//! - [`ArtifactMap`] - the expiring store that maps an issued artifact to
//!   the message it dereferences to
//!
//! Artifacts travel base64-encoded inside transport parameters; the codec
//! rejects undersized, oversized, and wrongly-typed inputs before any
//! field is interpreted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod map;

pub use codec::{source_id_for_entity, Saml1Artifact, Saml2Artifact};
pub use error::{ArtifactError, ArtifactResult};
pub use map::{ArtifactMap, ArtifactMapEntry};
