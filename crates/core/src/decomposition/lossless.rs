use alloc::format;
use alloc::vec;

use super::{Decomposition, Step};
use crate::analysis::NormalForm;
use crate::schema::Relation;

/// Splits `relation` until every sub-relation is in BCNF.
///
/// A relation violating BCNF is split on its smallest violating dependency
/// `X -> Y` into `<name>1` over every attribute but `Y`, and `<name>2` over
/// `X ∪ Y`. Both sides receive the projection of the parent's dependencies.
/// Since `X` is not a superkey, both sides are strictly smaller than the
/// parent and the splitting terminates.
///
/// Sub-relations are emitted depth first, `<name>1` before `<name>2`.
#[must_use]
pub fn decompose_not_preserving(relation: &Relation) -> Decomposition {
    tracing::debug!(relation = relation.name(), "bcnf decomposition: start");

    let mut decomposition = Decomposition::default();
    let mut pending = vec![relation.clone()];

    while let Some(current) = pending.pop() {
        let keys = current.candidate_keys();
        let violations = current.violations(NormalForm::BoyceCodd);

        let Some(on) = violations.first().cloned() else {
            tracing::trace!(relation = %current, "bcnf decomposition: leaf");
            decomposition.push(
                current.clone(),
                Step::Leaf {
                    relation: current,
                    keys,
                },
            );
            continue;
        };

        let left = Relation::project(
            format!("{}1", current.name()),
            current.attributes().difference(on.rhs()),
            current.dependencies(),
        );
        let right = Relation::project(
            format!("{}2", current.name()),
            on.attributes(),
            current.dependencies(),
        );
        tracing::trace!(
            relation = current.name(),
            on = %on,
            left = %left.attributes(),
            right = %right.attributes(),
            "bcnf decomposition: split"
        );

        decomposition.steps.push(Step::Split {
            relation: current,
            keys,
            violations,
            on,
        });
        pending.push(right);
        pending.push(left);
    }

    tracing::debug!(
        relation = relation.name(),
        relations = decomposition.len(),
        "bcnf decomposition: done"
    );
    decomposition
}
