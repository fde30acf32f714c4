use alloc::collections::btree_set::{self, BTreeSet};
use alloc::string::String;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{Display, Formatter, Result};

/// A set of attribute names.
///
/// Elements are kept in their canonical (lexicographic) order. Sets are
/// totally ordered by cardinality first and then element-wise over that
/// canonical order, so a smaller set always sorts before a larger one. The
/// order is used wherever attribute sets key an ordered container: candidate
/// key collections and dependency sets.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSet(BTreeSet<String>);

impl AttributeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Inserts `attribute`, returning `false` if it was already present.
    pub fn insert(&mut self, attribute: impl Into<String>) -> bool {
        self.0.insert(attribute.into())
    }

    /// Removes `attribute`, returning `false` if it was absent.
    pub fn remove<Q>(&mut self, attribute: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.remove(attribute)
    }

    pub fn contains<Q>(&self, attribute: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.contains(attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `true` if every attribute of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Returns `true` if every attribute of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// A copy of `self` with `attribute` taken out.
    #[must_use]
    pub fn without(&self, attribute: &str) -> Self {
        let mut reduced = self.clone();
        reduced.remove(attribute);
        reduced
    }

    /// A copy of `self` with `attribute` added.
    #[must_use]
    pub fn with(&self, attribute: &str) -> Self {
        let mut extended = self.clone();
        extended.insert(attribute);
        extended
    }

    /// Keeps only the attributes for which `keep` holds.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&String) -> bool,
    {
        self.0.retain(keep);
    }

    /// Adds every attribute of `other`. Returns `true` if the set grew.
    pub fn absorb(&mut self, other: &Self) -> bool {
        let before = self.0.len();
        self.0.extend(other.0.iter().cloned());
        self.0.len() != before
    }
}

impl Ord for AttributeSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.iter().cmp(other.0.iter()))
    }
}

impl PartialOrd for AttributeSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for AttributeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.0.is_empty() {
            return write!(f, "0");
        }
        for (i, attribute) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for AttributeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for AttributeSet {
    fn from(attributes: [S; N]) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<BTreeSet<String>> for AttributeSet {
    fn from(attributes: BTreeSet<String>) -> Self {
        Self(attributes)
    }
}

impl IntoIterator for AttributeSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_smaller_cardinality_sorts_first() {
        let small = AttributeSet::from(["z"]);
        let large = AttributeSet::from(["a", "b"]);
        assert!(small < large);
        assert!(large > small);
    }

    #[test]
    fn test_equal_cardinality_compares_elementwise() {
        let ab = AttributeSet::from(["a", "b"]);
        let ac = AttributeSet::from(["a", "c"]);
        let bc = AttributeSet::from(["c", "b"]);
        assert!(ab < ac);
        assert!(ac < bc);
        assert!(ab < bc);
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let first = AttributeSet::from(["b", "a", "c"]);
        let second = AttributeSet::from(["c", "b", "a"]);
        assert_eq!(first, second);
        assert_eq!(first.cmp(&second), Ordering::Equal);
    }

    #[test]
    fn test_order_deduplicates_in_ordered_containers() {
        let keys: BTreeSet<AttributeSet> = vec![
            AttributeSet::from(["a", "c"]),
            AttributeSet::from(["c", "a"]),
            AttributeSet::from(["b"]),
            AttributeSet::from(["a", "b", "c"]),
        ]
        .into_iter()
        .collect();

        let ordered: Vec<_> = keys.iter().map(|k| format!("{k}")).collect();
        assert_eq!(ordered, vec!["b", "a, c", "a, b, c"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AttributeSet::new()), "0");
        assert_eq!(format!("{}", AttributeSet::from(["b", "a"])), "a, b");
    }

    #[test]
    fn test_subset_and_superset() {
        let abc = AttributeSet::from(["a", "b", "c"]);
        let ab = AttributeSet::from(["a", "b"]);
        assert!(ab.is_subset(&abc));
        assert!(abc.is_superset(&ab));
        assert!(!abc.is_subset(&ab));
        assert!(AttributeSet::new().is_subset(&ab));
    }

    #[test]
    fn test_set_algebra() {
        let abc = AttributeSet::from(["a", "b", "c"]);
        let cd = AttributeSet::from(["c", "d"]);
        assert_eq!(abc.union(&cd), AttributeSet::from(["a", "b", "c", "d"]));
        assert_eq!(abc.difference(&cd), AttributeSet::from(["a", "b"]));
        assert_eq!(abc.intersection(&cd), AttributeSet::from(["c"]));
        assert_eq!(abc.without("b"), AttributeSet::from(["a", "c"]));
        assert_eq!(cd.with("a"), AttributeSet::from(["a", "c", "d"]));
    }

    #[test]
    fn test_absorb_reports_growth() {
        let mut set = AttributeSet::from(["a"]);
        assert!(set.absorb(&AttributeSet::from(["a", "b"])));
        assert!(!set.absorb(&AttributeSet::from(["b"])));
        assert_eq!(set.len(), 2);
    }
}
