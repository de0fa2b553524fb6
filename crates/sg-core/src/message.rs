//! The opaque SAML message value and its protocol-level attributes.
//!
//! The security core treats the message body as an opaque payload owned by
//! the binding/XML layer. Only the attributes the security handlers need
//! (id, version, issuer, issue instant, status, signature) are modeled as
//! typed fields. The whole value is `Clone` + serde-serializable, which is
//! what lets the artifact map persist a deep copy detached from whatever
//! document the message was originally parsed out of.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SAML protocol versions understood by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamlVersion {
    /// SAML 1.1.
    V11,
    /// SAML 2.0.
    V20,
}

impl SamlVersion {
    /// Returns the version string as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V11 => "1.1",
            Self::V20 => "2.0",
        }
    }

    /// Parses a wire version string.
    ///
    /// Returns `None` for unrecognized versions; the version handler
    /// decides whether that is fatal.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "1.1" => Some(Self::V11),
            "2.0" => Some(Self::V20),
            _ => None,
        }
    }
}

/// Top-level SAML status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// The request succeeded.
    Success,
    /// The request could not be performed due to an error on the requester.
    Requester,
    /// The request could not be performed due to an error on the responder.
    Responder,
    /// The responder could not process the request version.
    VersionMismatch,
}

impl StatusCode {
    /// Returns the SAML 2.0 status code URI.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Success => "urn:oasis:names:tc:SAML:2.0:status:Success",
            Self::Requester => "urn:oasis:names:tc:SAML:2.0:status:Requester",
            Self::Responder => "urn:oasis:names:tc:SAML:2.0:status:Responder",
            Self::VersionMismatch => "urn:oasis:names:tc:SAML:2.0:status:VersionMismatch",
        }
    }

    /// Parses a status code from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:status:Success" => Some(Self::Success),
            "urn:oasis:names:tc:SAML:2.0:status:Requester" => Some(Self::Requester),
            "urn:oasis:names:tc:SAML:2.0:status:Responder" => Some(Self::Responder),
            "urn:oasis:names:tc:SAML:2.0:status:VersionMismatch" => Some(Self::VersionMismatch),
            _ => None,
        }
    }
}

/// An XML signature detached from its document.
///
/// This is the untrusted token handed to trust engines for validation and
/// the value a signer attaches to an outbound message. The cryptographic
/// transforms themselves live behind the engine/signer traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlSignature {
    /// Signature algorithm URI.
    pub algorithm: String,
    /// The reference URI (typically the ID of the signed element).
    pub reference_uri: String,
    /// The digest value (base64 encoded).
    pub digest_value: String,
    /// The signature value (base64 encoded).
    pub signature_value: String,
    /// Optional X.509 certificate (base64 encoded, DER format).
    pub x509_certificate: Option<String>,
}

/// An in-flight SAML protocol message.
///
/// The `payload` is the serialized message body and is never interpreted
/// by the security core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlMessage {
    /// The message ID attribute.
    pub id: String,
    /// The raw protocol version string from the wire.
    pub version: String,
    /// Issuer entity ID, when the message carried one.
    pub issuer: Option<String>,
    /// Message issue instant.
    pub issue_instant: DateTime<Utc>,
    /// Status code, present on responses only.
    pub status: Option<StatusCode>,
    /// Serialized message body, opaque to the security core.
    pub payload: String,
    /// Signature on the message, if it was signed.
    pub signature: Option<XmlSignature>,
}

impl SamlMessage {
    /// Creates an unsigned message with the given attributes.
    #[must_use]
    pub fn new(id: impl Into<String>, version: SamlVersion, issue_instant: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            version: version.as_str().to_string(),
            issuer: None,
            issue_instant,
            status: None,
            payload: String::new(),
            signature: None,
        }
    }

    /// Sets the issuer entity ID.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the opaque payload.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Sets the signature.
    #[must_use]
    pub fn with_signature(mut self, signature: XmlSignature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Returns the parsed protocol version, or `None` if the wire string
    /// is missing or unrecognized.
    #[must_use]
    pub fn parsed_version(&self) -> Option<SamlVersion> {
        SamlVersion::parse(&self.version)
    }

    /// Returns true if this message is a response reporting an error.
    ///
    /// Requests (no status) are never error responses.
    #[must_use]
    pub fn is_error_response(&self) -> bool {
        self.status.is_some_and(|s| s != StatusCode::Success)
    }

    /// Returns true if the message carries a signature.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}
