//! # sg-pipeline
//!
//! The message security handler pipeline.
//!
//! Every in-flight message runs through an ordered list of
//! [`SecurityHandler`]s - protocol version check, replay check,
//! signature trust validation, outbound signing - each of which may halt
//! processing with an error. The pipeline maps the first fatal error to a
//! single labeled [`ProcessingOutcome`] and records the triggering event
//! on the [`MessageContext`].
//!
//! State machine per message:
//!
//! ```text
//! Received -> VersionChecked -> ReplayChecked -> SignatureValidated -> Accepted
//!        \________________________ Rejected _________________________/
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod params;

pub use context::{MessageContext, MessageState};
pub use error::{HandlerError, HandlerResult, SignerError};
pub use handler::{ProcessingOutcome, SecurityHandler, SecurityPipeline};
pub use handlers::replay::ReplayHandler;
pub use handlers::signature::{CriteriaBuilder, PeerEntityCriteriaBuilder, SignatureTrustHandler};
pub use handlers::signing::{MessageSigner, SigningHandler};
pub use handlers::version::VersionHandler;
pub use params::{
    CanonicalizationAlgorithm, DigestAlgorithm, KeyInfoOptions, SignatureAlgorithm,
    SigningCredential, SigningParameters,
};
