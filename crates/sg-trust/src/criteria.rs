//! Trust evaluation criteria.
//!
//! Criteria are typed values describing what a token must satisfy - which
//! entity it should belong to, what it may be used for. The set is open:
//! engines downcast the criterion types they understand and ignore the
//! rest, and callers can define their own criterion types outside this
//! crate. The chain passes criteria through without interpreting them.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;

/// A typed criterion value.
///
/// Implemented by any `'static + Send + Sync + Debug` type registered in
/// a [`CriteriaSet`]. One value per concrete type.
pub trait Criterion: Any + Send + Sync + Debug {
    /// Returns the criterion as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync + Debug> Criterion for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An open, extensible set of evaluation criteria, keyed by type.
#[derive(Debug, Default)]
pub struct CriteriaSet {
    criteria: HashMap<TypeId, Box<dyn Criterion>>,
}

impl CriteriaSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a criterion, replacing any previous value of the same type.
    pub fn insert<C: Criterion>(&mut self, criterion: C) {
        self.criteria.insert(TypeId::of::<C>(), Box::new(criterion));
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with<C: Criterion>(mut self, criterion: C) -> Self {
        self.insert(criterion);
        self
    }

    /// Gets the criterion of type `C`, if present.
    #[must_use]
    pub fn get<C: Criterion>(&self) -> Option<&C> {
        self.criteria
            .get(&TypeId::of::<C>())
            .and_then(|c| c.as_any().downcast_ref::<C>())
    }

    /// Returns true if a criterion of type `C` is present.
    #[must_use]
    pub fn contains<C: Criterion>(&self) -> bool {
        self.criteria.contains_key(&TypeId::of::<C>())
    }

    /// Returns the number of criteria in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// The entity ID the token is claimed to belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIdCriterion(pub String);

/// Key usage the token must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageType {
    /// Signing keys.
    Signing,
    /// Encryption keys.
    Encryption,
    /// Either usage is acceptable.
    Unspecified,
}

/// Usage criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageCriterion(pub UsageType);

/// The protocol the message arrived under (a SAML protocol URI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolCriterion(pub String);
