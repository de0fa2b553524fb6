//! Trust evaluation error types.

use thiserror::Error;

/// Result type for trust operations.
pub type TrustResult<T> = Result<T, TrustError>;

/// Trust evaluation errors.
///
/// These represent an inability to evaluate, not a negative verdict; a
/// token that was evaluated and found untrusted is a clean `Ok(false)`.
#[derive(Debug, Error)]
pub enum TrustError {
    /// A chain was configured with no engines.
    #[error("trust engine chain must contain at least one engine")]
    EmptyChain,

    /// An engine failed while evaluating a token.
    #[error("trust evaluation failed: {0}")]
    Evaluation(String),

    /// The evaluation criteria could not be constructed.
    #[error("criteria construction failed: {0}")]
    Criteria(String),
}
