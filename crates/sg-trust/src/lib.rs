//! # sg-trust
//!
//! Trust evaluation for untrusted security tokens.
//!
//! A [`TrustEngine`] decides whether a token (a signature, a certificate)
//! is trustworthy under a set of [`criteria`](CriteriaSet). Engines are
//! pluggable and ordered; the [`ChainingTrustEngine`] runs them in
//! configured order with first-success-wins semantics, so deployments can
//! layer, say, an explicit-key engine in front of a PKIX engine.
//!
//! A clean `false` means "evaluated, not trusted". An error means "could
//! not evaluate" - the two are never conflated.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chain;
pub mod criteria;
pub mod engine;
pub mod error;

pub use chain::ChainingTrustEngine;
pub use criteria::{
    CriteriaSet, Criterion, EntityIdCriterion, ProtocolCriterion, UsageCriterion, UsageType,
};
pub use engine::TrustEngine;
pub use error::{TrustError, TrustResult};
