//! Attribute-set closure under a set of functional dependencies.
//!
//! The closure `X+` of an attribute set `X` is every attribute derivable from
//! `X` by repeatedly applying dependencies whose left-hand side is already
//! derived. The computation is a fixpoint: each pass over the dependency set
//! can only add attributes, and the result is bounded by the attributes the
//! dependencies mention, so the loop terminates.

use crate::schema::{AttributeSet, DependencySet};

/// Computes the closure of `start` under `dependencies`.
#[must_use]
pub fn closure(start: &AttributeSet, dependencies: &DependencySet) -> AttributeSet {
    let mut result = start.clone();

    let mut passes = 0u32;
    loop {
        passes += 1;
        let mut grew = false;
        for dependency in dependencies {
            if dependency.lhs().is_subset(&result) {
                grew |= result.absorb(dependency.rhs());
            }
        }
        if !grew {
            break;
        }
    }

    tracing::trace!(%start, closure = %result, passes, "closure computed");
    result
}
