//! Minimal cover of a dependency set.
//!
//! The reduction runs in three phases, each producing a set equivalent to its
//! input:
//!
//! 1. **Split right-hand sides** into one dependency per attribute.
//! 2. **Shrink left-hand sides**: an attribute is dropped from a left-hand
//!    side when the closure of what remains, under the current working set,
//!    still derives the right-hand side. The shrunk dependency replaces the
//!    original in the working set and shrinking restarts on it.
//! 3. **Drop redundant rules**: each dependency is removed in turn and put
//!    back only if its left-hand side no longer derives its right-hand side
//!    without it.
//!
//! The result is finally merged by left-hand side. When several dependencies
//! are mutually redundant, the iteration order of the dependency set decides
//! which one survives.

use crate::analysis::closure;
use crate::schema::{AttributeSet, Dependency, DependencySet, Relation};

/// The intermediate sets of a minimal-cover computation.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalCover {
    /// Every right-hand side split into single attributes.
    pub reduced_rhs: DependencySet,
    /// After removing extraneous left-hand attributes.
    pub reduced_lhs: DependencySet,
    /// After removing redundant dependencies.
    pub reduced_rules: DependencySet,
    /// `reduced_rules` merged by left-hand side.
    pub cover: DependencySet,
}

/// Computes the minimal cover of `dependencies`, keeping every phase.
#[must_use]
pub fn minimal_cover(dependencies: &DependencySet) -> MinimalCover {
    tracing::debug!(dependencies = dependencies.len(), "minimal cover: start");

    let reduced_rhs = split_rhs(dependencies);
    let reduced_lhs = reduce_lhs(&reduced_rhs);
    let reduced_rules = reduce_rules(&reduced_lhs);
    let cover = Relation::scratch(&reduced_rules).into_dependencies();

    tracing::debug!(
        split = reduced_rhs.len(),
        shrunk = reduced_lhs.len(),
        kept = reduced_rules.len(),
        cover = cover.len(),
        "minimal cover: done"
    );

    MinimalCover {
        reduced_rhs,
        reduced_lhs,
        reduced_rules,
        cover,
    }
}

/// Splits every dependency into dependencies with a single right-hand
/// attribute.
#[must_use]
pub fn split_rhs(dependencies: &DependencySet) -> DependencySet {
    dependencies
        .iter()
        .flat_map(|dependency| {
            dependency.rhs().iter().map(|attribute| {
                Dependency::new(
                    dependency.lhs().clone(),
                    AttributeSet::from([attribute.as_str()]),
                )
            })
        })
        .collect()
}

/// Removes extraneous attributes from every composite left-hand side.
#[must_use]
pub fn reduce_lhs(dependencies: &DependencySet) -> DependencySet {
    let mut working = dependencies.clone();

    for dependency in dependencies.iter().filter(|d| d.lhs().len() > 1) {
        let mut current = dependency.clone();
        while let Some(reduced) = shrink_lhs(&current, &working) {
            tracing::trace!(
                from = %current,
                lhs = %reduced,
                "minimal cover: left-hand side shrunk"
            );
            working.remove(&current);
            let (_, rhs) = current.into_parts();
            current = Dependency::new(reduced, rhs);
            working.insert(current.clone());
        }
    }

    working
}

/// The left-hand side of `dependency` with the first attribute removed whose
/// absence still lets the rest derive the right-hand side under `working`.
fn shrink_lhs(dependency: &Dependency, working: &DependencySet) -> Option<AttributeSet> {
    if dependency.lhs().len() < 2 {
        return None;
    }
    dependency.lhs().iter().find_map(|attribute| {
        let reduced = dependency.lhs().without(attribute);
        closure(&reduced, working)
            .is_superset(dependency.rhs())
            .then_some(reduced)
    })
}

/// Removes every dependency derivable from the others.
#[must_use]
pub fn reduce_rules(dependencies: &DependencySet) -> DependencySet {
    let mut working = dependencies.clone();

    for dependency in dependencies {
        working.remove(dependency);
        if closure(dependency.lhs(), &working).is_superset(dependency.rhs()) {
            tracing::trace!(%dependency, "minimal cover: redundant dependency dropped");
        } else {
            working.insert(dependency.clone());
        }
    }

    working
}

impl Relation {
    /// The minimal cover of this relation's dependencies.
    #[must_use]
    pub fn minimal_cover(&self) -> DependencySet {
        minimal_cover(self.dependencies()).cover
    }

    /// The minimal cover together with the intermediate phases.
    #[must_use]
    pub fn minimal_cover_steps(&self) -> MinimalCover {
        minimal_cover(self.dependencies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(attributes: &str) -> AttributeSet {
        attributes.split_whitespace().collect()
    }

    fn dep(lhs: &str, rhs: &str) -> Dependency {
        Dependency::new(set(lhs), set(rhs))
    }

    fn deps(dependencies: &[(&str, &str)]) -> DependencySet {
        dependencies.iter().map(|(lhs, rhs)| dep(lhs, rhs)).collect()
    }

    #[test]
    fn test_split_rhs() {
        let split = split_rhs(&deps(&[("a", "b f"), ("a c", "d")]));
        assert_eq!(split, deps(&[("a", "b"), ("a", "f"), ("a c", "d")]));
    }

    #[test]
    fn test_reduce_lhs_follows_derived_attributes() {
        // `d -> e` makes `b` and `c` extraneous in `b, c, d -> e`.
        let split = deps(&[("b c d", "e"), ("d", "e"), ("a", "b")]);
        assert_eq!(reduce_lhs(&split), deps(&[("d", "e"), ("a", "b")]));
    }

    #[test]
    fn test_reduce_lhs_keeps_needed_attributes() {
        let split = deps(&[("a c", "d"), ("a", "b")]);
        assert_eq!(reduce_lhs(&split), split);
    }

    #[test]
    fn test_reduce_lhs_through_chain() {
        // `a -> b` lets `a` alone derive what `a, b` does.
        let split = deps(&[("a", "b"), ("a b", "c")]);
        assert_eq!(reduce_lhs(&split), deps(&[("a", "b"), ("a", "c")]));
    }

    #[test]
    fn test_reduce_rules_drops_transitive() {
        let split = deps(&[("a", "b"), ("b", "c"), ("a", "c")]);
        assert_eq!(reduce_rules(&split), deps(&[("a", "b"), ("b", "c")]));
    }

    #[test]
    fn test_reduce_rules_keeps_one_of_mutually_redundant() {
        let split = deps(&[("a", "b"), ("b", "a"), ("a", "c"), ("b", "c")]);
        let kept = reduce_rules(&split);
        assert_eq!(kept.len(), 3);
        for d in &split {
            assert!(closure(d.lhs(), &kept).is_superset(d.rhs()));
        }
    }

    #[test]
    fn test_minimal_cover_merges_by_lhs() {
        let relation = Relation::with_dependencies(
            "R",
            set("a b c d e f g h"),
            [
                (set("a"), set("b f")),
                (set("a c"), set("d g")),
                (set("b c d"), set("e h")),
                (set("d"), set("e h")),
            ],
        );
        let steps = relation.minimal_cover_steps();
        assert_eq!(steps.reduced_rhs.len(), 8);
        assert_eq!(
            steps.cover,
            deps(&[("a", "b f"), ("d", "e h"), ("a c", "d g")])
        );
        assert_eq!(relation.minimal_cover(), steps.cover);
    }

    #[test]
    fn test_minimal_cover_of_empty_set() {
        let steps = minimal_cover(&DependencySet::new());
        assert!(steps.reduced_rhs.is_empty());
        assert!(steps.cover.is_empty());
    }
}
