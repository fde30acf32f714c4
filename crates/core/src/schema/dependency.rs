use core::fmt::{Display, Formatter, Result};

use super::attribute::AttributeSet;

/// A functional dependency `lhs -> rhs`.
///
/// Dependencies are only fabricated by [`Relation`](super::relation::Relation)
/// and the algorithms operating on it, which guarantees neither side is empty
/// and the right-hand side shares no attribute with the left-hand side.
///
/// The derived order compares the left-hand sides first and falls back to
/// the right-hand sides, both under the [`AttributeSet`] order.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dependency {
    lhs: AttributeSet,
    rhs: AttributeSet,
}

impl Dependency {
    pub(crate) const fn new(lhs: AttributeSet, rhs: AttributeSet) -> Self {
        Self { lhs, rhs }
    }

    #[must_use]
    pub const fn lhs(&self) -> &AttributeSet {
        &self.lhs
    }

    #[must_use]
    pub const fn rhs(&self) -> &AttributeSet {
        &self.rhs
    }

    /// Every attribute mentioned on either side.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.lhs.union(&self.rhs)
    }

    #[must_use]
    pub fn is_present(&self, attribute: &str) -> bool {
        self.lhs.contains(attribute) || self.rhs.contains(attribute)
    }

    /// Combines `other` into `self` when both share the same left-hand side.
    ///
    /// Returns `true` if the right-hand side grew.
    pub(crate) fn merge(&mut self, other: &Self) -> bool {
        self.lhs == other.lhs && self.rhs.absorb(&other.rhs)
    }

    pub(crate) fn into_parts(self) -> (AttributeSet, AttributeSet) {
        (self.lhs, self.rhs)
    }

    pub(crate) const fn rhs_mut(&mut self) -> &mut AttributeSet {
        &mut self.rhs
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}
