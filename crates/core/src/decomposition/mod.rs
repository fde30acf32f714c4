//! Decomposition of a relation into sub-relations.
//!
//! - [`decompose_not_preserving`] splits on BCNF violations until every
//!   sub-relation is in BCNF. The result is lossless but may lose
//!   dependencies.
//! - [`decompose_preserving`] synthesizes one sub-relation per left-hand side
//!   of the minimal cover, plus a key relation when needed. The result is
//!   lossless, preserves dependencies and is at least in 3NF.
//!
//! Both return a [`Decomposition`] that also records the steps taken, which
//! the command line renders in verbose mode.

pub mod lossless;
pub mod preserving;

use alloc::vec::Vec;

pub use lossless::decompose_not_preserving;
pub use preserving::decompose_preserving;

use crate::analysis::CandidateKeys;
use crate::schema::{Dependency, DependencySet, Relation};

/// The sub-relations produced by a decomposition and how they came about.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    pub relations: Vec<Relation>,
    pub steps: Vec<Step>,
}

/// One step of a decomposition.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "step", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `relation` was not in BCNF and was split on `on`.
    Split {
        relation: Relation,
        keys: CandidateKeys,
        violations: DependencySet,
        on: Dependency,
    },
    /// `relation` is in BCNF and is part of the result.
    Leaf {
        relation: Relation,
        keys: CandidateKeys,
    },
    /// `relation` was built from a left-hand side group of the minimal cover.
    Group { relation: Relation },
    /// `relation` holds a candidate key so that the decomposition is lossless.
    Key { relation: Relation },
    /// The relation had nothing to decompose and is returned as is.
    Unchanged { relation: Relation },
}

impl Decomposition {
    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Relation> {
        self.relations.iter()
    }

    /// Every dependency carried by some sub-relation.
    #[must_use]
    pub fn dependencies(&self) -> DependencySet {
        self.relations
            .iter()
            .flat_map(|r| r.dependencies().iter().cloned())
            .collect()
    }

    fn push(&mut self, relation: Relation, step: Step) {
        self.steps.push(step);
        self.relations.push(relation);
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Relation;
    type IntoIter = core::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

impl Relation {
    /// Decomposes this relation into BCNF sub-relations.
    #[must_use]
    pub fn decompose_not_preserving(&self) -> Decomposition {
        decompose_not_preserving(self)
    }

    /// Decomposes this relation into dependency-preserving sub-relations.
    #[must_use]
    pub fn decompose_preserving(&self) -> Decomposition {
        decompose_preserving(self)
    }
}
