//! Candidate-key search over the subset lattice of a relation's attributes.
//!
//! # Algorithm
//!
//! 1. Attributes that never appear on a right-hand side cannot be derived, so
//!    every key contains them. They seed the search; if every attribute is
//!    derivable the seed falls back to all attributes.
//! 2. The search starts from the singleton sets of the seed and walks the
//!    lattice one level (one attribute) at a time.
//! 3. On each level, a set whose closure covers the relation and that does not
//!    contain an already confirmed key is a new key.
//! 4. The next level extends every set by one attribute. Supersets of
//!    confirmed keys are pruned, since they cannot be minimal.
//!
//! The search stops once a level is empty. The problem is NP-hard in general;
//! seeding and pruning are the only mitigations.

use alloc::collections::btree_set::{self, BTreeSet};
use core::fmt::{Display, Formatter, Result};

use hashbrown::HashSet;

use super::closure::closure;
use crate::schema::{AttributeSet, DependencySet};

/// The candidate keys of a relation, ordered by the [`AttributeSet`] order.
///
/// No key is a superset of another.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateKeys(BTreeSet<AttributeSet>);

impl CandidateKeys {
    /// Returns `true` if `attributes` contains some candidate key.
    #[must_use]
    pub fn is_superkey(&self, attributes: &AttributeSet) -> bool {
        self.0.iter().any(|key| attributes.is_superset(key))
    }

    /// Returns `true` if `attributes` lies within some candidate key without
    /// containing any key.
    #[must_use]
    pub fn is_partial_key(&self, attributes: &AttributeSet) -> bool {
        self.is_prime(attributes) && !self.is_superkey(attributes)
    }

    /// Returns `true` if `attributes` lies entirely within some candidate key.
    #[must_use]
    pub fn is_prime(&self, attributes: &AttributeSet) -> bool {
        self.0.iter().any(|key| attributes.is_subset(key))
    }

    #[must_use]
    pub fn contains(&self, key: &AttributeSet) -> bool {
        self.0.contains(key)
    }

    /// The smallest key under the [`AttributeSet`] order.
    #[must_use]
    pub fn first(&self) -> Option<&AttributeSet> {
        self.0.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, AttributeSet> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CandidateKeys {
    type Item = &'a AttributeSet;
    type IntoIter = btree_set::Iter<'a, AttributeSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `{ ( a, c ), ( b ) }`, or `{ 0 }` without keys.
impl Display for CandidateKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.0.is_empty() {
            return write!(f, "{{ 0 }}");
        }
        write!(f, "{{ ")?;
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "( {key} )")?;
        }
        write!(f, " }}")
    }
}

/// Finds every candidate key of the relation over `attributes` with
/// `dependencies`.
#[must_use]
pub fn candidate_keys(attributes: &AttributeSet, dependencies: &DependencySet) -> CandidateKeys {
    let mut keys = BTreeSet::new();
    if attributes.is_empty() {
        return CandidateKeys(keys);
    }

    let derivable: AttributeSet = dependencies
        .iter()
        .flat_map(|d| d.rhs().iter().cloned())
        .collect();
    let mut seed = attributes.difference(&derivable);
    if seed.is_empty() {
        seed = attributes.clone();
    }

    tracing::debug!(
        attributes = attributes.len(),
        dependencies = dependencies.len(),
        %seed,
        "candidate keys: searching"
    );

    let mut level: HashSet<AttributeSet> = seed
        .iter()
        .map(|attribute| AttributeSet::from([attribute.as_str()]))
        .collect();
    let mut depth = 1usize;

    while !level.is_empty() {
        for candidate in &level {
            if !contains_key(&keys, candidate)
                && closure(candidate, dependencies).is_superset(attributes)
            {
                tracing::trace!(key = %candidate, "candidate keys: key confirmed");
                keys.insert(candidate.clone());
            }
        }

        level = next_level(&level, attributes);
        level.retain(|candidate| !contains_key(&keys, candidate));

        tracing::trace!(
            depth,
            next = level.len(),
            keys = keys.len(),
            "candidate keys: level done"
        );
        depth += 1;
    }

    tracing::debug!(keys = keys.len(), "candidate keys: done");
    CandidateKeys(keys)
}

/// Returns `true` if `candidate` contains one of `keys`.
fn contains_key(keys: &BTreeSet<AttributeSet>, candidate: &AttributeSet) -> bool {
    keys.iter().any(|key| candidate.is_superset(key))
}

/// Every set of `level` extended by one attribute of `attributes`.
fn next_level(level: &HashSet<AttributeSet>, attributes: &AttributeSet) -> HashSet<AttributeSet> {
    let mut next = HashSet::new();
    for candidate in level {
        for attribute in attributes {
            if !candidate.contains(attribute.as_str()) {
                next.insert(candidate.with(attribute));
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Relation;

    fn set(attributes: &str) -> AttributeSet {
        attributes.split_whitespace().collect()
    }

    /// Builds `R` from space-separated attribute lists.
    fn relation(attributes: &str, dependencies: &[(&str, &str)]) -> Relation {
        Relation::with_dependencies(
            "R",
            set(attributes),
            dependencies.iter().map(|(lhs, rhs)| (set(lhs), set(rhs))),
        )
    }

    #[test]
    fn test_single_key() {
        let r = relation("a b c d e f g h", &[("a", "b f"), ("a c", "d g"), ("b c d", "e h")]);
        let keys = candidate_keys(r.attributes(), r.dependencies());
        assert_eq!(keys.len(), 1);
        assert!(keys.contains(&["a", "c"].into()));
    }

    #[test]
    fn test_cyclic_dependencies_have_several_keys() {
        // Every attribute is derivable, so the seed is the full attribute set.
        let r = relation("a b c", &[("a", "b"), ("b", "c"), ("c", "a")]);
        let keys = candidate_keys(r.attributes(), r.dependencies());
        let expected: BTreeSet<AttributeSet> =
            [["a"].into(), ["b"].into(), ["c"].into()].into_iter().collect();
        assert_eq!(keys, CandidateKeys(expected));
    }

    #[test]
    fn test_keys_of_different_sizes() {
        // a, b -> c and c -> b: keys are {a, b} and {a, c}.
        let r = relation("a b c", &[("a b", "c"), ("c", "b")]);
        let keys = candidate_keys(r.attributes(), r.dependencies());
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&["a", "b"].into()));
        assert!(keys.contains(&["a", "c"].into()));
    }

    #[test]
    fn test_keys_are_minimal() {
        let r = relation("a b c d", &[("a", "b"), ("b", "a"), ("c", "d")]);
        let keys = candidate_keys(r.attributes(), r.dependencies());
        for key in &keys {
            assert_eq!(closure(key, r.dependencies()), *r.attributes());
            for other in &keys {
                assert!(key == other || !key.is_superset(other));
            }
        }
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_without_dependencies_the_key_is_everything() {
        let r = relation("a b c", &[]);
        let keys = candidate_keys(r.attributes(), r.dependencies());
        assert_eq!(keys.first(), Some(r.attributes()));
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_empty_relation_has_no_keys() {
        let r = Relation::new("R");
        assert!(candidate_keys(r.attributes(), r.dependencies()).is_empty());
    }

    #[test]
    fn test_key_predicates() {
        let r = relation("a b c d e f g h", &[("a", "b f"), ("a c", "d g"), ("b c d", "e h")]);
        let keys = candidate_keys(r.attributes(), r.dependencies());
        let a = AttributeSet::from(["a"]);
        let ac = AttributeSet::from(["a", "c"]);
        let cd = AttributeSet::from(["c", "d"]);
        let abcd = AttributeSet::from(["a", "b", "c", "d"]);

        assert!(!keys.is_superkey(&a));
        assert!(keys.is_superkey(&ac));
        assert!(!keys.is_superkey(&cd));
        assert!(keys.is_superkey(&abcd));

        assert!(keys.is_partial_key(&a));
        assert!(!keys.is_partial_key(&ac));
        assert!(!keys.is_partial_key(&cd));
        assert!(!keys.is_partial_key(&abcd));

        assert!(keys.is_prime(&a));
        assert!(keys.is_prime(&ac));
        assert!(!keys.is_prime(&cd));
        assert!(!keys.is_prime(&abcd));
    }

    #[test]
    fn test_display() {
        let r = relation("a b", &[("a", "b"), ("b", "a")]);
        assert_eq!(
            candidate_keys(r.attributes(), r.dependencies()).to_string(),
            "{ ( a ), ( b ) }"
        );
        assert_eq!(CandidateKeys::default().to_string(), "{ 0 }");
    }
}
