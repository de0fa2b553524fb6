//! Trust engine trait.

use async_trait::async_trait;

use crate::criteria::CriteriaSet;
use crate::error::TrustResult;

/// Evaluates whether an untrusted token satisfies trust criteria.
///
/// `T` is the token type; `?Sized` so engines can be written against a
/// token trait object (`TrustEngine<dyn SecurityToken>`) and accept every
/// subtype of it, as well as against concrete token types.
///
/// Evaluation is async because engines routinely perform I/O - fetching
/// credentials from metadata, checking revocation.
#[async_trait]
pub trait TrustEngine<T: ?Sized>: Send + Sync {
    /// Evaluates the token against the criteria.
    ///
    /// Returns `Ok(true)` if trusted, `Ok(false)` if evaluated and found
    /// untrusted, and an error only when evaluation itself was impossible.
    async fn validate(&self, token: &T, criteria: &CriteriaSet) -> TrustResult<bool>;
}
