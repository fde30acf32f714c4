//! Queries over a [`Relation`]: attribute closure, candidate keys and
//! normal-form classification.

pub mod closure;
pub mod keys;
pub mod normal_form;

pub use closure::closure;
pub use keys::{candidate_keys, CandidateKeys};
pub use normal_form::{NormalForm, UnknownNormalForm};

use crate::schema::{AttributeSet, Dependency, DependencySet, Relation};

impl Relation {
    /// The closure of `attributes` under this relation's dependencies.
    #[must_use]
    pub fn closure(&self, attributes: &AttributeSet) -> AttributeSet {
        closure(attributes, self.dependencies())
    }

    #[must_use]
    pub fn candidate_keys(&self) -> CandidateKeys {
        candidate_keys(self.attributes(), self.dependencies())
    }

    #[must_use]
    pub fn is_superkey(&self, attributes: &AttributeSet) -> bool {
        self.candidate_keys().is_superkey(attributes)
    }

    #[must_use]
    pub fn is_partial_key(&self, attributes: &AttributeSet) -> bool {
        self.candidate_keys().is_partial_key(attributes)
    }

    #[must_use]
    pub fn is_prime(&self, attributes: &AttributeSet) -> bool {
        self.candidate_keys().is_prime(attributes)
    }

    /// Returns `true` if `dependency` violates `form` in this relation.
    ///
    /// Computes the candidate keys on every call; use
    /// [`CandidateKeys::violates`] to classify many dependencies.
    #[must_use]
    pub fn violates(&self, form: NormalForm, dependency: &Dependency) -> bool {
        self.candidate_keys().violates(form, dependency)
    }

    /// Every dependency of this relation that violates `form`.
    #[must_use]
    pub fn violations(&self, form: NormalForm) -> DependencySet {
        let keys = self.candidate_keys();
        let violations: DependencySet = self
            .dependencies()
            .iter()
            .filter(|d| keys.violates(form, d))
            .cloned()
            .collect();
        tracing::debug!(
            relation = self.name(),
            form = form.abbreviation(),
            violations = violations.len(),
            "violations computed"
        );
        violations
    }

    #[must_use]
    pub fn is_normal(&self, form: NormalForm) -> bool {
        let keys = self.candidate_keys();
        !self.dependencies().iter().any(|d| keys.violates(form, d))
    }

    /// The strongest normal form this relation is in, or `None` if it is not
    /// even in 2NF.
    #[must_use]
    pub fn highest_normal_form(&self) -> Option<NormalForm> {
        let keys = self.candidate_keys();
        NormalForm::ALL
            .into_iter()
            .take_while(|&form| !self.dependencies().iter().any(|d| keys.violates(form, d)))
            .last()
    }
}
