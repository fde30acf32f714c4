use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use super::attribute::AttributeSet;
use super::dependency::Dependency;

/// The dependency set of a relation, ordered by the [`Dependency`] order.
pub type DependencySet = BTreeSet<Dependency>;

/// How [`Relation::add_dependency`] treats attributes the relation does not
/// have yet.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum AttributeMode {
    /// Unknown attributes are added to the relation.
    #[default]
    Extend,
    /// A dependency with an unknown left-hand attribute is rejected; unknown
    /// right-hand attributes are dropped, rejecting the dependency if none
    /// remain. This is how a dependency set is projected onto a sub-relation.
    Restrict,
}

/// A relation schema: a name, its attributes and the functional dependencies
/// holding over them.
///
/// The dependency set is always kept *reduced*: no two dependencies share a
/// left-hand side, as dependencies with equal left-hand sides are merged on
/// insertion. Every dependency only mentions attributes of the relation.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "super::record::RelationRecord", into = "super::record::RelationRecord")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    name: String,
    attributes: AttributeSet,
    dependencies: DependencySet,
}

impl Relation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attributes(name, AttributeSet::new())
    }

    /// Builds a relation over `attributes`. Empty names are dropped, as
    /// [`Relation::add_attribute`] does.
    #[must_use]
    pub fn with_attributes(name: impl Into<String>, mut attributes: AttributeSet) -> Self {
        attributes.retain(|attribute| !attribute.is_empty());
        Self {
            name: name.into(),
            attributes,
            dependencies: DependencySet::new(),
        }
    }

    /// Builds a relation and admits `dependencies` in [`AttributeMode::Extend`],
    /// so attributes only mentioned by a dependency join the relation.
    #[must_use]
    pub fn with_dependencies<I>(
        name: impl Into<String>,
        attributes: AttributeSet,
        dependencies: I,
    ) -> Self
    where
        I: IntoIterator<Item = (AttributeSet, AttributeSet)>,
    {
        let mut relation = Self::with_attributes(name, attributes);
        relation.add_dependencies(dependencies, AttributeMode::Extend);
        relation
    }

    /// Projects `dependencies` onto a relation over `attributes`.
    pub(crate) fn project(
        name: impl Into<String>,
        attributes: AttributeSet,
        dependencies: &DependencySet,
    ) -> Self {
        let mut relation = Self::with_attributes(name, attributes);
        relation.add_dependencies(split_all(dependencies), AttributeMode::Restrict);
        relation
    }

    /// A throwaway relation holding `dependencies` in reduced form.
    pub(crate) fn scratch(dependencies: &DependencySet) -> Self {
        let mut relation = Self::new("scratch");
        relation.add_dependencies(split_all(dependencies), AttributeMode::Extend);
        relation
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    #[must_use]
    pub const fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    pub(crate) fn into_dependencies(self) -> DependencySet {
        self.dependencies
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The dependency whose left-hand side is exactly `lhs`, if any.
    #[must_use]
    pub fn find_dependency(&self, lhs: &AttributeSet) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.lhs() == lhs)
    }

    /// Adds a single attribute. Empty names and existing attributes are
    /// rejected.
    pub fn add_attribute(&mut self, attribute: impl Into<String>) -> bool {
        let attribute = attribute.into();
        !attribute.is_empty() && self.attributes.insert(attribute)
    }

    /// Adds every attribute of `attributes`, returning how many were new.
    pub fn add_attributes<I>(&mut self, attributes: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        attributes
            .into_iter()
            .map(|attribute| self.add_attribute(attribute))
            .filter(|added| *added)
            .count()
    }

    /// Removes `attribute` from the relation.
    ///
    /// Dependencies whose left-hand side mentions the attribute are deleted.
    /// Dependencies whose right-hand side mentions it lose that attribute and
    /// are only deleted once their right-hand side becomes empty.
    pub fn remove_attribute(&mut self, attribute: &str) -> bool {
        let affected: Vec<Dependency> = self
            .dependencies
            .iter()
            .filter(|d| d.is_present(attribute))
            .cloned()
            .collect();

        for dependency in affected {
            self.dependencies.remove(&dependency);
            if dependency.lhs().contains(attribute) {
                tracing::trace!(%dependency, attribute, "dropping dependency with removed lhs attribute");
                continue;
            }
            let (lhs, mut rhs) = dependency.into_parts();
            rhs.remove(attribute);
            if !rhs.is_empty() {
                self.insert_merged(Dependency::new(lhs, rhs));
            }
        }

        self.attributes.remove(attribute)
    }

    /// Removes every attribute of `attributes`, returning how many existed.
    pub fn remove_attributes<'a, I>(&mut self, attributes: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        attributes
            .into_iter()
            .map(|attribute| self.remove_attribute(attribute))
            .filter(|removed| *removed)
            .count()
    }

    /// Admits the dependency `lhs -> rhs` and returns the stored dependency it
    /// was merged into.
    ///
    /// Right-hand attributes already on the left-hand side are dropped first.
    /// Returns `None` when nothing was admitted: an empty side, an empty
    /// attribute name, a trivial dependency, or attributes rejected under
    /// [`AttributeMode::Restrict`].
    pub fn add_dependency(
        &mut self,
        lhs: AttributeSet,
        rhs: AttributeSet,
        mode: AttributeMode,
    ) -> Option<&Dependency> {
        if lhs.contains("") || rhs.contains("") {
            return None;
        }
        let mut rhs = rhs.difference(&lhs);
        if lhs.is_empty() || rhs.is_empty() {
            return None;
        }

        if !lhs.is_subset(&self.attributes) || !rhs.is_subset(&self.attributes) {
            match mode {
                AttributeMode::Extend => {
                    self.attributes.absorb(&lhs);
                    self.attributes.absorb(&rhs);
                }
                AttributeMode::Restrict => {
                    if !lhs.is_subset(&self.attributes) {
                        return None;
                    }
                    let known = &self.attributes;
                    rhs.retain(|attribute| known.contains(attribute.as_str()));
                    if rhs.is_empty() {
                        return None;
                    }
                }
            }
        }

        self.insert_merged(Dependency::new(lhs.clone(), rhs));
        self.find_dependency(&lhs)
    }

    /// Admits every `(lhs, rhs)` pair, returning how many were admitted.
    pub fn add_dependencies<I>(&mut self, dependencies: I, mode: AttributeMode) -> usize
    where
        I: IntoIterator<Item = (AttributeSet, AttributeSet)>,
    {
        dependencies
            .into_iter()
            .map(|(lhs, rhs)| self.add_dependency(lhs, rhs, mode).is_some())
            .filter(|admitted| *admitted)
            .count()
    }

    /// Removes `lhs -> rhs`.
    ///
    /// When the stored dependency for `lhs` has a larger right-hand side, only
    /// the attributes of `rhs` are taken out of it. Returns `false` if no
    /// attribute of `rhs` was determined by `lhs`.
    pub fn remove_dependency(&mut self, lhs: &AttributeSet, rhs: &AttributeSet) -> bool {
        let Some(existing) = self.find_dependency(lhs).cloned() else {
            return false;
        };

        let mut reduced = existing.clone();
        let mut changed = false;
        for attribute in rhs {
            changed |= reduced.rhs_mut().remove(attribute.as_str());
        }
        if !changed {
            return false;
        }

        self.dependencies.remove(&existing);
        if !reduced.rhs().is_empty() {
            self.dependencies.insert(reduced);
        }
        true
    }

    /// Removes all attributes, and with them all dependencies.
    pub fn clear_attributes(&mut self) {
        self.dependencies.clear();
        self.attributes.clear();
    }

    pub fn clear_dependencies(&mut self) {
        self.dependencies.clear();
    }

    /// Inserts `dependency`, merging it into the dependency with the same
    /// left-hand side if there is one.
    fn insert_merged(&mut self, dependency: Dependency) {
        let existing = self
            .dependencies
            .iter()
            .find(|d| d.lhs() == dependency.lhs())
            .cloned();

        match existing {
            Some(mut existing) => {
                self.dependencies.remove(&existing);
                existing.merge(&dependency);
                self.dependencies.insert(existing);
            }
            None => {
                self.dependencies.insert(dependency);
            }
        }
    }
}

fn split_all(dependencies: &DependencySet) -> impl Iterator<Item = (AttributeSet, AttributeSet)> + '_ {
    dependencies
        .iter()
        .map(|d| (d.lhs().clone(), d.rhs().clone()))
}
