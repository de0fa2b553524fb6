//! SAML 1.x type 0x0002 artifact.

use base64::Engine;

use crate::error::{ArtifactError, ArtifactResult};

use super::{random_handle, HANDLE_LENGTH};

/// Wire type code for the SAML 1.x type 0x0002 artifact format.
pub const TYPE_CODE: u16 = 0x0002;

/// Minimum encoded length: type code + assertion handle.
pub const MIN_ENCODED_LENGTH: usize = 2 + HANDLE_LENGTH;

/// A SAML 1.x type 0x0002 artifact.
///
/// The encoded form is the 2-byte type code, the 20-byte assertion
/// handle, and the source-location URL as UTF-8 bytes. The source
/// location tells the relying party where to resolve the artifact; it is
/// derived from the issuer's artifact-resolution-service metadata at
/// issuance time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saml1Artifact {
    assertion_handle: [u8; HANDLE_LENGTH],
    source_location: String,
}

impl Saml1Artifact {
    /// Creates an artifact from a raw handle slice, validating its length.
    pub fn new(assertion_handle: &[u8], source_location: impl Into<String>) -> ArtifactResult<Self> {
        if assertion_handle.len() != HANDLE_LENGTH {
            return Err(ArtifactError::InvalidLength {
                field: "assertion handle",
                expected: HANDLE_LENGTH,
                actual: assertion_handle.len(),
            });
        }
        let mut handle = [0u8; HANDLE_LENGTH];
        handle.copy_from_slice(assertion_handle);
        Ok(Self {
            assertion_handle: handle,
            source_location: source_location.into(),
        })
    }

    /// Issues a fresh artifact with a random 20-byte assertion handle.
    ///
    /// `source_location` is the issuer's artifact resolution service URL,
    /// looked up from metadata by the caller.
    #[must_use]
    pub fn generate(source_location: impl Into<String>) -> Self {
        Self {
            assertion_handle: random_handle(),
            source_location: source_location.into(),
        }
    }

    /// Decodes the wire form.
    pub fn parse(bytes: &[u8]) -> ArtifactResult<Self> {
        if bytes.len() < MIN_ENCODED_LENGTH {
            return Err(ArtifactError::InvalidLength {
                field: "artifact",
                expected: MIN_ENCODED_LENGTH,
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

        let source_location = std::str::from_utf8(&bytes[MIN_ENCODED_LENGTH..])
            .map_err(|e| ArtifactError::InvalidSourceLocation(e.to_string()))?;

        Self::new(&bytes[2..MIN_ENCODED_LENGTH], source_location)
    }

    /// Decodes an artifact from its base64 transport form.
    pub fn parse_base64(encoded: &str) -> ArtifactResult<Self> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        Self::parse(&bytes)
    }

    /// Encodes the artifact into its wire form.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_ENCODED_LENGTH + self.source_location.len());
        out.extend_from_slice(&TYPE_CODE.to_be_bytes());
        out.extend_from_slice(&self.assertion_handle);
        out.extend_from_slice(self.source_location.as_bytes());
        out
    }

    /// Encodes the artifact for in-band transmission.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    /// Returns the assertion handle.
    #[must_use]
    pub const fn assertion_handle(&self) -> &[u8; HANDLE_LENGTH] {
        &self.assertion_handle
    }

    /// Returns the source location URL.
    #[must_use]
    pub fn source_location(&self) -> &str {
        &self.source_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARS_URL: &str = "https://idp.example.org/artifact";

    #[test]
    fn roundtrip_preserves_fields() {
        let artifact = Saml1Artifact::new(&[0xCC; 20], ARS_URL).unwrap();
        let parsed = Saml1Artifact::parse(&artifact.to_bytes()).unwrap();
        assert_eq!(parsed, artifact);
        assert_eq!(parsed.source_location(), ARS_URL);
    }

    #[test]
    fn base64_roundtrip() {
        let artifact = Saml1Artifact::generate(ARS_URL);
        let parsed = Saml1Artifact::parse_base64(&artifact.to_base64()).unwrap();
        assert_eq!(parsed, artifact);
    }

    #[test]
    fn rejects_truncated_input() {
        let artifact = Saml1Artifact::generate(ARS_URL);
        let bytes = artifact.to_bytes();
        assert!(matches!(
            Saml1Artifact::parse(&bytes[..21]),
            Err(ArtifactError::InvalidLength { expected: 22, actual: 21, .. })
        ));
    }

    #[test]
    fn rejects_wrong_type_code() {
        let mut bytes = Saml1Artifact::generate(ARS_URL).to_bytes();
        bytes[1] = 0x04;
        assert!(matches!(
            Saml1Artifact::parse(&bytes),
            Err(ArtifactError::TypeCodeMismatch { expected: 0x0002, actual: 0x0004 })
        ));
    }

    #[test]
    fn rejects_invalid_utf8_location() {
        let mut bytes = Saml1Artifact::generate(ARS_URL).to_bytes();
        bytes.truncate(MIN_ENCODED_LENGTH);
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        assert!(matches!(
            Saml1Artifact::parse(&bytes),
            Err(ArtifactError::InvalidSourceLocation(_))
        ));
    }

    #[test]
    fn generated_handles_are_random() {
        let a = Saml1Artifact::generate(ARS_URL);
        let b = Saml1Artifact::generate(ARS_URL);
        assert_ne!(a.assertion_handle(), b.assertion_handle());
    }

    #[test]
    fn empty_source_location_is_allowed_at_decode() {
        // Minimum-length artifact: handle only, empty location.
        let artifact = Saml1Artifact::new(&[0x01; 20], "").unwrap();
        let parsed = Saml1Artifact::parse(&artifact.to_bytes()).unwrap();
        assert_eq!(parsed.source_location(), "");
    }
}
