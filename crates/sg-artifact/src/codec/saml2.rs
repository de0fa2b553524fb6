//! SAML 2.0 type 0x0004 artifact.

use base64::Engine;

use crate::error::{ArtifactError, ArtifactResult};

use super::{random_handle, HANDLE_LENGTH};

/// Wire type code for the SAML 2.0 artifact format.
pub const TYPE_CODE: u16 = 0x0004;

/// Total encoded length: type code + endpoint index + source ID + handle.
pub const ENCODED_LENGTH: usize = 2 + 2 + HANDLE_LENGTH + HANDLE_LENGTH;

/// A SAML 2.0 type 0x0004 artifact.
///
/// Byte layout: `[0:2]` type code (always `0x0004`), `[2:4]` endpoint
/// index, `[4:24]` source ID, `[24:44]` message handle. The encoded form
/// is exactly 44 bytes; anything else is a decode error. Values are
/// immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Saml2Artifact {
    endpoint_index: [u8; 2],
    source_id: [u8; HANDLE_LENGTH],
    message_handle: [u8; HANDLE_LENGTH],
}

impl Saml2Artifact {
    /// Creates an artifact from raw field slices, validating exact lengths.
    pub fn new(
        endpoint_index: &[u8],
        source_id: &[u8],
        message_handle: &[u8],
    ) -> ArtifactResult<Self> {
        Ok(Self {
            endpoint_index: check_field("endpoint index", endpoint_index)?,
            source_id: check_field("source ID", source_id)?,
            message_handle: check_field("message handle", message_handle)?,
        })
    }

    /// Issues a fresh artifact with a random 20-byte message handle.
    #[must_use]
    pub fn generate(endpoint_index: u16, source_id: [u8; HANDLE_LENGTH]) -> Self {
        Self {
            endpoint_index: endpoint_index.to_be_bytes(),
            source_id,
            message_handle: random_handle(),
        }
    }

    /// Decodes the 44-byte wire form.
    pub fn parse(bytes: &[u8]) -> ArtifactResult<Self> {
        if bytes.len() != ENCODED_LENGTH {
            return Err(ArtifactError::InvalidLength {
                field: "artifact",
                expected: ENCODED_LENGTH,
                actual: bytes.len(),
            });
        }

        let type_code = u16::from_be_bytes([bytes[0], bytes[1]]);
        if type_code != TYPE_CODE {
            return Err(ArtifactError::TypeCodeMismatch {
                expected: TYPE_CODE,
                actual: type_code,
            });
        }

        Self::new(&bytes[2..4], &bytes[4..24], &bytes[24..44])
    }

    /// Decodes an artifact from its base64 transport form.
    pub fn parse_base64(encoded: &str) -> ArtifactResult<Self> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        Self::parse(&bytes)
    }

    /// Encodes the artifact into its 44-byte wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ENCODED_LENGTH] {
        let mut out = [0u8; ENCODED_LENGTH];
        out[0..2].copy_from_slice(&TYPE_CODE.to_be_bytes());
        out[2..4].copy_from_slice(&self.endpoint_index);
        out[4..24].copy_from_slice(&self.source_id);
        out[24..44].copy_from_slice(&self.message_handle);
        out
    }

    /// Encodes the artifact for in-band transmission.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    /// Returns the endpoint index as an integer.
    #[must_use]
    pub const fn endpoint_index(&self) -> u16 {
        u16::from_be_bytes(self.endpoint_index)
    }

    /// Returns the source ID.
    #[must_use]
    pub const fn source_id(&self) -> &[u8; HANDLE_LENGTH] {
        &self.source_id
    }

    /// Returns the message handle.
    #[must_use]
    pub const fn message_handle(&self) -> &[u8; HANDLE_LENGTH] {
        &self.message_handle
    }
}

/// Validates an exact-length field and copies it into a fixed array.
fn check_field<const N: usize>(field: &'static str, bytes: &[u8]) -> ArtifactResult<[u8; N]> {
    if bytes.len() != N {
        return Err(ArtifactError::InvalidLength {
            field,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Saml2Artifact {
        Saml2Artifact::new(&[0x00, 0x07], &[0xAA; 20], &[0xBB; 20]).unwrap()
    }

    #[test]
    fn roundtrip_preserves_fields() {
        let artifact = sample();
        let bytes = artifact.to_bytes();
        assert_eq!(bytes.len(), ENCODED_LENGTH);

        let parsed = Saml2Artifact::parse(&bytes).unwrap();
        assert_eq!(parsed, artifact);
        assert_eq!(parsed.endpoint_index(), 7);
        assert_eq!(parsed.source_id(), &[0xAA; 20]);
        assert_eq!(parsed.message_handle(), &[0xBB; 20]);
    }

    #[test]
    fn base64_roundtrip() {
        let artifact = sample();
        let encoded = artifact.to_base64();
        let parsed = Saml2Artifact::parse_base64(&encoded).unwrap();
        assert_eq!(parsed, artifact);
    }

    #[test]
    fn rejects_wrong_lengths() {
        let bytes = sample().to_bytes();

        let short = &bytes[..43];
        assert!(matches!(
            Saml2Artifact::parse(short),
            Err(ArtifactError::InvalidLength { expected: 44, actual: 43, .. })
        ));

        let mut long = bytes.to_vec();
        long.push(0x00);
        assert!(matches!(
            Saml2Artifact::parse(&long),
            Err(ArtifactError::InvalidLength { expected: 44, actual: 45, .. })
        ));
    }

    #[test]
    fn rejects_wrong_type_code() {
        let mut bytes = sample().to_bytes();
        bytes[1] = 0x05;
        assert!(matches!(
            Saml2Artifact::parse(&bytes),
            Err(ArtifactError::TypeCodeMismatch { expected: 0x0004, actual: 0x0005 })
        ));
    }

    #[test]
    fn field_lengths_are_validated_on_construction() {
        assert!(matches!(
            Saml2Artifact::new(&[0x00], &[0xAA; 20], &[0xBB; 20]),
            Err(ArtifactError::InvalidLength { field: "endpoint index", .. })
        ));
        assert!(matches!(
            Saml2Artifact::new(&[0x00, 0x01], &[0xAA; 19], &[0xBB; 20]),
            Err(ArtifactError::InvalidLength { field: "source ID", .. })
        ));
        assert!(matches!(
            Saml2Artifact::new(&[0x00, 0x01], &[0xAA; 20], &[0xBB; 21]),
            Err(ArtifactError::InvalidLength { field: "message handle", .. })
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            Saml2Artifact::parse_base64("not-base64!!!"),
            Err(ArtifactError::Base64(_))
        ));
    }

    #[test]
    fn generated_artifacts_have_unique_handles() {
        let source_id = [0x11; 20];
        let a = Saml2Artifact::generate(0, source_id);
        let b = Saml2Artifact::generate(0, source_id);
        assert_ne!(a.message_handle(), b.message_handle());
        assert_eq!(a.source_id(), b.source_id());
    }
}
