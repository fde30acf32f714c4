//! Relation schemas: attribute sets, functional dependencies and the
//! [`Relation`] that owns them.

pub mod attribute;
pub mod dependency;
pub mod display;
pub mod record;
pub mod relation;

pub use attribute::AttributeSet;
pub use dependency::Dependency;
pub use display::DependencyList;
pub use record::{DependencyRecord, RelationRecord};
pub use relation::{AttributeMode, DependencySet, Relation};
