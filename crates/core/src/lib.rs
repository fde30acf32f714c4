//! Functional-dependency analysis and schema normalization.
//!
//! `fdnorm_core` models a relation schema as a set of attributes together
//! with the functional dependencies holding over them, and answers the
//! classical design questions about it:
//!
//! 1. **Closure** -- every attribute derivable from a starting set.
//! 2. **Candidate keys** -- the minimal attribute sets whose closure is the
//!    whole relation, found by a pruned search over the subset lattice.
//! 3. **Normal forms** -- whether a dependency violates 2NF, 3NF or BCNF, and
//!    the strongest form a relation satisfies.
//! 4. **Minimal cover** -- an equivalent dependency set with single-attribute
//!    right-hand sides, no extraneous left-hand attributes and no redundant
//!    dependencies.
//! 5. **Decomposition** -- lossless BCNF decomposition, and
//!    dependency-preserving 3NF synthesis.
//!
//! # Entry point
//!
//! Everything hangs off [`Relation`]. Dependencies can only be admitted
//! through it, which keeps its dependency set reduced: no two dependencies
//! share a left-hand side.
//!
//! ```rust
//! use fdnorm_core::{AttributeSet, NormalForm, Relation};
//!
//! let relation = Relation::with_dependencies(
//!     "R",
//!     ["a", "b", "c"].into(),
//!     [(["a"].into(), ["b"].into()), (["b"].into(), ["c"].into())],
//! );
//!
//! assert_eq!(relation.closure(&["a"].into()), AttributeSet::from(["a", "b", "c"]));
//! assert_eq!(relation.highest_normal_form(), Some(NormalForm::Second));
//! assert_eq!(relation.decompose_not_preserving().len(), 2);
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` on the schema types and
//!   `Serialize` on analysis results (`CandidateKeys`, `MinimalCover`,
//!   `Decomposition`).
//! - **`schemars`** -- derives `JsonSchema` for the serialized schema format.
//!
//! This crate is `no_std` compatible (requires `alloc`). Parsing of schema
//! files lives in the separate `fdnorm_parser` crate.

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod analysis;
pub mod cover;
pub mod decomposition;
pub mod schema;

pub use analysis::{CandidateKeys, NormalForm};
pub use cover::MinimalCover;
pub use decomposition::{Decomposition, Step};
pub use schema::{AttributeMode, AttributeSet, Dependency, DependencySet, Relation};
