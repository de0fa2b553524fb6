//! Artifact binary formats.
//!
//! Each artifact type owns its fixed wire layout. Construction validates
//! exact field lengths, and decoding re-runs the same validation on every
//! input, so an artifact value that exists is always well-formed.

mod saml1;
mod saml2;

pub use saml1::Saml1Artifact;
pub use saml2::Saml2Artifact;

use aws_lc_rs::digest;
use rand::Rng;

/// Length of a source ID or message handle, in bytes.
pub const HANDLE_LENGTH: usize = 20;

/// Derives the 20-byte source ID for an issuer entity ID.
///
/// The artifact profile defines the source ID as the SHA-1 digest of the
/// entity ID, which is how relying parties look the issuer up in
/// metadata. SHA-1 is fixed by the profile; it is an identifier here, not
/// an integrity check.
#[must_use]
pub fn source_id_for_entity(entity_id: &str) -> [u8; HANDLE_LENGTH] {
    let digest = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, entity_id.as_bytes());
    let mut source_id = [0u8; HANDLE_LENGTH];
    source_id.copy_from_slice(digest.as_ref());
    source_id
}

/// Generates a fresh 20-byte handle from a cryptographically strong RNG.
pub(crate) fn random_handle() -> [u8; HANDLE_LENGTH] {
    let mut rng = rand::rng();
    let mut handle = [0u8; HANDLE_LENGTH];
    rng.fill(&mut handle[..]);
    handle
}
