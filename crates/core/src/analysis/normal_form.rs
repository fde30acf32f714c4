use core::fmt::{Display, Formatter, Result};
use core::str::FromStr;

use super::keys::CandidateKeys;
use crate::schema::Dependency;

/// The normal forms a relation can be checked against, weakest first.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalForm {
    #[cfg_attr(feature = "serde", serde(rename = "2nf"))]
    Second,
    #[cfg_attr(feature = "serde", serde(rename = "3nf"))]
    Third,
    #[cfg_attr(feature = "serde", serde(rename = "bcnf"))]
    BoyceCodd,
}

impl NormalForm {
    pub const ALL: [Self; 3] = [Self::Second, Self::Third, Self::BoyceCodd];

    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
        }
    }
}

impl Display for NormalForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            Self::Second => "Second Normal Form",
            Self::Third => "Third Normal Form",
            Self::BoyceCodd => "Boyce-Codd Normal Form",
        };
        f.write_str(name)
    }
}

/// Error returned when a string names no [`NormalForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNormalForm;

impl Display for UnknownNormalForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("unknown normal form, expected one of 2nf, 3nf, bcnf")
    }
}

impl core::error::Error for UnknownNormalForm {}

impl FromStr for NormalForm {
    type Err = UnknownNormalForm;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|form| form.abbreviation().eq_ignore_ascii_case(s))
            .ok_or(UnknownNormalForm)
    }
}

impl CandidateKeys {
    /// Returns `true` if `dependency` violates `form` in a relation with these
    /// candidate keys.
    ///
    /// - 2NF: the left-hand side is a partial key and the right-hand side is
    ///   not prime.
    /// - 3NF: the left-hand side is not a superkey and the right-hand side is
    ///   not prime.
    /// - BCNF: the left-hand side is not a superkey.
    #[must_use]
    pub fn violates(&self, form: NormalForm, dependency: &Dependency) -> bool {
        let lhs = dependency.lhs();
        match form {
            NormalForm::Second => self.is_partial_key(lhs) && !self.is_prime(dependency.rhs()),
            NormalForm::Third => !self.is_superkey(lhs) && !self.is_prime(dependency.rhs()),
            NormalForm::BoyceCodd => !self.is_superkey(lhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::candidate_keys;
    use crate::schema::{AttributeSet, Relation};

    fn set(attributes: &str) -> AttributeSet {
        attributes.split_whitespace().collect()
    }

    fn relation(attributes: &str, dependencies: &[(&str, &str)]) -> Relation {
        Relation::with_dependencies(
            "R",
            set(attributes),
            dependencies.iter().map(|(lhs, rhs)| (set(lhs), set(rhs))),
        )
    }

    fn keys(relation: &Relation) -> CandidateKeys {
        candidate_keys(relation.attributes(), relation.dependencies())
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2nf".parse(), Ok(NormalForm::Second));
        assert_eq!("3NF".parse(), Ok(NormalForm::Third));
        assert_eq!(" BcNf ".parse(), Ok(NormalForm::BoyceCodd));
        assert_eq!("1nf".parse::<NormalForm>(), Err(UnknownNormalForm));
    }

    #[test]
    fn test_forms_are_ordered_by_strength() {
        assert!(NormalForm::Second < NormalForm::Third);
        assert!(NormalForm::Third < NormalForm::BoyceCodd);
        assert_eq!(NormalForm::BoyceCodd.to_string(), "Boyce-Codd Normal Form");
    }

    /// Verdicts for 2NF, 3NF and BCNF on the dependency stored for `lhs`.
    fn verdicts(relation: &Relation, lhs: &str) -> Option<[bool; 3]> {
        let keys = keys(relation);
        relation
            .find_dependency(&set(lhs))
            .map(|d| NormalForm::ALL.map(|form| keys.violates(form, d)))
    }

    #[test]
    fn test_partial_dependency_violates_everything() {
        let r = relation("a b c d e f g h", &[("a", "b f"), ("a c", "d g"), ("b c d", "e h")]);
        assert_eq!(verdicts(&r, "a"), Some([true, true, true]));
        assert_eq!(verdicts(&r, "a c"), Some([false, false, false]));
        assert_eq!(verdicts(&r, "b c d"), Some([false, true, true]));
    }

    #[test]
    fn test_transitive_dependency_is_2nf_but_not_3nf() {
        let r = relation("a b c", &[("a", "b"), ("b", "c")]);
        assert_eq!(verdicts(&r, "b"), Some([false, true, true]));
        assert_eq!(verdicts(&r, "a"), Some([false, false, false]));
    }

    #[test]
    fn test_prime_rhs_is_3nf_but_not_bcnf() {
        // Keys {a, b} and {a, c}: `c -> b` has a prime right-hand side.
        let r = relation("a b c", &[("a b", "c"), ("c", "b")]);
        assert_eq!(verdicts(&r, "c"), Some([false, false, true]));
    }
}
