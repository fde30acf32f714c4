use alloc::string::String;
use alloc::vec::Vec;

use super::attribute::AttributeSet;
use super::relation::Relation;

/// Plain-data form of a [`Relation`], used for (de)serialization.
///
/// Converting a record into a relation admits every dependency in
/// [`AttributeMode::Extend`](super::relation::AttributeMode::Extend), so the
/// resulting relation is reduced no matter what the record contained.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationRecord {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: AttributeSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dependencies: Vec<DependencyRecord>,
}

/// Plain-data form of a functional dependency.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRecord {
    pub lhs: AttributeSet,
    pub rhs: AttributeSet,
}

impl From<Relation> for RelationRecord {
    fn from(relation: Relation) -> Self {
        Self {
            name: relation.name().into(),
            attributes: relation.attributes().clone(),
            dependencies: relation
                .dependencies()
                .iter()
                .map(|d| DependencyRecord {
                    lhs: d.lhs().clone(),
                    rhs: d.rhs().clone(),
                })
                .collect(),
        }
    }
}

impl From<RelationRecord> for Relation {
    fn from(record: RelationRecord) -> Self {
        Self::with_dependencies(
            record.name,
            record.attributes,
            record.dependencies.into_iter().map(|d| (d.lhs, d.rhs)),
        )
    }
}
