//! Chaining trust engine.

use std::sync::Arc;

use async_trait::async_trait;

use crate::criteria::CriteriaSet;
use crate::engine::TrustEngine;
use crate::error::{TrustError, TrustResult};

/// An ordered chain of trust engines with first-success-wins semantics.
///
/// Engines run strictly in configured order. Empty slots (`None`) are
/// skipped. The first engine returning `true` ends evaluation. An engine
/// error is remembered but does not stop the chain - a later engine must
/// still get its chance to succeed. If the chain exhausts without a
/// success, the last remembered error is surfaced; with no errors the
/// result is a clean `false`.
///
/// The chain itself implements [`TrustEngine`], so chains nest.
pub struct ChainingTrustEngine<T: ?Sized> {
    engines: Vec<Option<Arc<dyn TrustEngine<T>>>>,
}

impl<T: ?Sized> ChainingTrustEngine<T> {
    /// Creates a chain from an ordered engine list.
    ///
    /// `None` slots are tolerated and skipped at evaluation time. An
    /// empty list is a configuration error: a chain that can never
    /// evaluate anything must fail at construction, not at first use.
    pub fn new(engines: Vec<Option<Arc<dyn TrustEngine<T>>>>) -> TrustResult<Self> {
        if engines.is_empty() {
            return Err(TrustError::EmptyChain);
        }
        Ok(Self { engines })
    }

    /// Creates a chain where every slot is occupied.
    pub fn from_engines(engines: Vec<Arc<dyn TrustEngine<T>>>) -> TrustResult<Self> {
        Self::new(engines.into_iter().map(Some).collect())
    }

    /// Returns the number of slots, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns true if the chain has no slots.
    ///
    /// Unreachable through the constructors; kept for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[async_trait]
impl<T: ?Sized + Sync> TrustEngine<T> for ChainingTrustEngine<T> {
    async fn validate(&self, token: &T, criteria: &CriteriaSet) -> TrustResult<bool> {
        let mut last_error: Option<TrustError> = None;

        for (position, slot) in self.engines.iter().enumerate() {
            let Some(engine) = slot else {
                tracing::debug!(position, "skipping empty trust engine slot");
                continue;
            };

            match engine.validate(token, criteria).await {
                Ok(true) => {
                    tracing::debug!(position, "token trusted by chain engine");
                    return Ok(true);
                }
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(position, %error, "trust engine failed, trying next");
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A token standing in for a signature or certificate.
    #[derive(Debug)]
    struct Token;

    /// Engine with a fixed verdict.
    struct FixedEngine(bool);

    #[async_trait]
    impl TrustEngine<Token> for FixedEngine {
        async fn validate(&self, _: &Token, _: &CriteriaSet) -> TrustResult<bool> {
            Ok(self.0)
        }
    }

    /// Engine that always fails to evaluate.
    struct FailingEngine(&'static str);

    #[async_trait]
    impl TrustEngine<Token> for FailingEngine {
        async fn validate(&self, _: &Token, _: &CriteriaSet) -> TrustResult<bool> {
            Err(TrustError::Evaluation(self.0.to_string()))
        }
    }

    fn slot(engine: impl TrustEngine<Token> + 'static) -> Option<Arc<dyn TrustEngine<Token>>> {
        Some(Arc::new(engine))
    }

    #[tokio::test]
    async fn first_success_wins() {
        let chain =
            ChainingTrustEngine::new(vec![slot(FixedEngine(false)), slot(FixedEngine(true))])
                .unwrap();
        assert!(chain.validate(&Token, &CriteriaSet::new()).await.unwrap());
    }

    #[tokio::test]
    async fn all_false_is_clean_false() {
        let chain =
            ChainingTrustEngine::new(vec![slot(FixedEngine(false)), slot(FixedEngine(false))])
                .unwrap();
        assert!(!chain.validate(&Token, &CriteriaSet::new()).await.unwrap());
    }

    #[tokio::test]
    async fn empty_slots_are_skipped() {
        let chain = ChainingTrustEngine::new(vec![
            slot(FixedEngine(false)),
            None,
            slot(FixedEngine(true)),
        ])
        .unwrap();
        assert!(chain.validate(&Token, &CriteriaSet::new()).await.unwrap());
    }

    #[tokio::test]
    async fn error_does_not_mask_later_success() {
        let chain =
            ChainingTrustEngine::new(vec![slot(FailingEngine("boom")), slot(FixedEngine(true))])
                .unwrap();
        assert!(chain.validate(&Token, &CriteriaSet::new()).await.unwrap());
    }

    #[tokio::test]
    async fn exhausted_chain_surfaces_last_error() {
        let chain = ChainingTrustEngine::new(vec![
            slot(FailingEngine("first")),
            slot(FixedEngine(false)),
            slot(FailingEngine("last")),
        ])
        .unwrap();

        let err = chain.validate(&Token, &CriteriaSet::new()).await.unwrap_err();
        assert!(matches!(err, TrustError::Evaluation(ref msg) if msg == "last"));
    }

    #[tokio::test]
    async fn empty_chain_is_a_construction_error() {
        let result = ChainingTrustEngine::<Token>::new(Vec::new());
        assert!(matches!(result, Err(TrustError::EmptyChain)));

        let result = ChainingTrustEngine::<Token>::from_engines(Vec::new());
        assert!(matches!(result, Err(TrustError::EmptyChain)));
    }

    #[tokio::test]
    async fn all_empty_slots_evaluate_to_false() {
        let chain = ChainingTrustEngine::<Token>::new(vec![None, None]).unwrap();
        assert!(!chain.validate(&Token, &CriteriaSet::new()).await.unwrap());
    }

    #[tokio::test]
    async fn chains_nest() {
        let inner = ChainingTrustEngine::new(vec![slot(FixedEngine(false))]).unwrap();
        let outer = ChainingTrustEngine::new(vec![
            Some(Arc::new(inner) as Arc<dyn TrustEngine<Token>>),
            slot(FixedEngine(true)),
        ])
        .unwrap();

        assert!(outer.validate(&Token, &CriteriaSet::new()).await.unwrap());
    }
}
