use core::fmt::{Display, Formatter, Result};

use super::relation::{DependencySet, Relation};

/// Renders a dependency set as `{ [a -> b], [a, c -> d] }`, or `{ 0 }` when
/// empty.
#[derive(Debug, Clone, Copy)]
pub struct DependencyList<'a>(pub &'a DependencySet);

impl Display for DependencyList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.0.is_empty() {
            return write!(f, "{{ 0 }}");
        }
        write!(f, "{{ ")?;
        for (i, dependency) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{dependency}]")?;
        }
        write!(f, " }}")
    }
}

/// `R(a, b, c)` followed by ` { [a -> b] }` when the relation has
/// dependencies.
impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}({})", self.name(), self.attributes())?;
        if !self.dependencies().is_empty() {
            write!(f, " {}", DependencyList(self.dependencies()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::attribute::AttributeSet;

    #[test]
    fn test_relation_display() {
        let relation = Relation::with_dependencies(
            "R",
            ["a", "b", "c"].into(),
            [
                (["a"].into(), ["b"].into()),
                (["c", "a"].into(), ["b", "c"].into()),
            ],
        );
        assert_eq!(relation.to_string(), "R(a, b, c) { [a -> b], [a, c -> b] }");
    }

    #[test]
    fn test_empty_relation_display() {
        assert_eq!(Relation::new("R").to_string(), "R(0)");
        assert_eq!(
            Relation::with_attributes("S", AttributeSet::from(["x"])).to_string(),
            "S(x)"
        );
    }

    #[test]
    fn test_dependency_list_display() {
        assert_eq!(DependencyList(&DependencySet::new()).to_string(), "{ 0 }");
    }
}
