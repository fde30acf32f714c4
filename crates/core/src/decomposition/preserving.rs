use alloc::format;

use super::{Decomposition, Step};
use crate::schema::{AttributeMode, Relation};

/// Synthesizes a dependency-preserving decomposition of `relation`.
///
/// Every dependency of the minimal cover becomes a sub-relation over its own
/// attributes, named `<name>1`, `<name>2`, ... in cover order. If none of them
/// contains a candidate key, a sub-relation over the first candidate key is
/// appended. A relation without dependencies is returned unchanged.
#[must_use]
pub fn decompose_preserving(relation: &Relation) -> Decomposition {
    tracing::debug!(relation = relation.name(), "synthesis: start");

    let mut decomposition = Decomposition::default();
    let cover = relation.minimal_cover();
    if cover.is_empty() {
        decomposition.push(
            relation.clone(),
            Step::Unchanged {
                relation: relation.clone(),
            },
        );
        return decomposition;
    }

    let keys = relation.candidate_keys();
    for (i, dependency) in cover.into_iter().enumerate() {
        let (lhs, rhs) = dependency.into_parts();
        let mut group = Relation::new(format!("{}{}", relation.name(), i + 1));
        group.add_dependency(lhs, rhs, AttributeMode::Extend);
        tracing::trace!(relation = %group, "synthesis: group");
        decomposition.push(group.clone(), Step::Group { relation: group });
    }

    let lossless = decomposition
        .relations
        .iter()
        .any(|r| keys.is_superkey(r.attributes()));
    if !lossless {
        if let Some(key) = keys.first() {
            let name = format!("{}{}", relation.name(), decomposition.len() + 1);
            let keyed = Relation::with_attributes(name, key.clone());
            tracing::trace!(relation = %keyed, "synthesis: key relation");
            decomposition.push(keyed.clone(), Step::Key { relation: keyed });
        }
    }

    tracing::debug!(
        relation = relation.name(),
        relations = decomposition.len(),
        "synthesis: done"
    );
    decomposition
}
