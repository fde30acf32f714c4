//! Text and JSON reports shared by the one-shot commands and the shell.

use core::fmt::Write as _;

use fdnorm_core::schema::{DependencyList, RelationRecord};
use fdnorm_core::{AttributeSet, Decomposition, NormalForm, Relation, Step};
use serde_json::{json, Value};

/// `R(a, b) { [a -> b] }`
#[must_use]
pub fn relation(relation: &Relation) -> String {
    relation.to_string()
}

#[must_use]
pub fn relation_json(relation: &Relation) -> Value {
    json!(RelationRecord::from(relation.clone()))
}

#[must_use]
pub fn keys(relation: &Relation) -> String {
    format!("Candidate key: {}", relation.candidate_keys())
}

#[must_use]
pub fn keys_json(relation: &Relation) -> Value {
    json!({
        "relation": relation.name(),
        "keys": relation.candidate_keys(),
    })
}

#[must_use]
pub fn closure(relation: &Relation, start: &AttributeSet) -> String {
    format!("( {start} )+ = ( {} )", relation.closure(start))
}

#[must_use]
pub fn closure_json(relation: &Relation, start: &AttributeSet) -> Value {
    json!({
        "of": start,
        "closure": relation.closure(start),
    })
}

/// Test `form`, or report the strongest satisfied form when `form` is `None`.
#[must_use]
pub fn normal(relation: &Relation, form: Option<NormalForm>) -> String {
    let keys = relation.candidate_keys();
    let mut out = format!("Candidate key: {keys}\n");
    let Some(form) = form else {
        let verdict = relation.highest_normal_form().map_or_else(
            || format!("Relation is not in {}", NormalForm::Second),
            |form| format!("Relation is in {form}"),
        );
        out.push_str(&verdict);
        return out;
    };

    _ = writeln!(out, "Testing for {form}");
    let violations = relation.violations(form);
    if violations.is_empty() {
        _ = write!(out, "Relation is in {form}");
    } else {
        _ = write!(
            out,
            "Relation is not in {form}\nDependencies that violate the normal form are: {}",
            DependencyList(&violations)
        );
    }
    out
}

#[must_use]
pub fn normal_json(relation: &Relation, form: Option<NormalForm>) -> Value {
    match form {
        Some(form) => {
            let violations = relation.violations(form);
            json!({
                "relation": relation.name(),
                "form": form,
                "ok": violations.is_empty(),
                "violations": violations,
            })
        }
        None => json!({
            "relation": relation.name(),
            "highest": relation.highest_normal_form(),
        }),
    }
}

#[must_use]
pub fn cover(relation: &Relation, verbose: bool) -> String {
    if relation.dependencies().is_empty() {
        return "The functional dependency set is empty".to_string();
    }
    let steps = relation.minimal_cover_steps();
    let mut out = format!(
        "Original dependencies: {}\n",
        DependencyList(relation.dependencies())
    );
    if verbose {
        _ = writeln!(out, "Reduced RHS - {}", DependencyList(&steps.reduced_rhs));
        _ = writeln!(out, "Reduced LHS - {}", DependencyList(&steps.reduced_lhs));
        _ = writeln!(out, "Reduced Rules - {}", DependencyList(&steps.reduced_rules));
    }
    _ = write!(out, "Minimal cover: {}", DependencyList(&steps.cover));
    out
}

#[must_use]
pub fn cover_json(relation: &Relation, verbose: bool) -> Value {
    let steps = relation.minimal_cover_steps();
    if verbose {
        json!(steps)
    } else {
        json!({ "cover": steps.cover })
    }
}

/// Run the requested decomposition of `relation` and describe it.
#[must_use]
pub fn decomposition(relation: &Relation, preserving: bool, verbose: bool) -> String {
    if relation.attributes().is_empty() {
        return "The attribute set is empty".to_string();
    }
    let (target, result) = decompose(relation, preserving);

    let mut out = String::new();
    if verbose {
        for step in &result.steps {
            _ = writeln!(out, "{}", self::step(step));
        }
    }
    if relation.is_normal(target) {
        _ = write!(
            out,
            "No need to decompose the relation. Already satisfies the normal form requirement\n{relation}"
        );
    } else {
        _ = writeln!(out, "Decomposed relations are");
        for (i, sub) in result.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            _ = write!(out, "{sub}");
        }
    }
    out
}

#[must_use]
pub fn decomposition_json(relation: &Relation, preserving: bool, verbose: bool) -> Value {
    let (target, result) = decompose(relation, preserving);
    let relations: Vec<RelationRecord> =
        result.relations.iter().cloned().map(RelationRecord::from).collect();
    let mut value = json!({
        "relation": relation.name(),
        "target": target,
        "relations": relations,
    });
    if verbose {
        value["steps"] = json!(result.steps);
    }
    value
}

fn decompose(relation: &Relation, preserving: bool) -> (NormalForm, Decomposition) {
    if preserving {
        (NormalForm::Third, relation.decompose_preserving())
    } else {
        (NormalForm::BoyceCodd, relation.decompose_not_preserving())
    }
}

/// One line per decomposition step.
fn step(step: &Step) -> String {
    match step {
        Step::Split {
            relation,
            keys,
            violations,
            on,
        } => format!(
            "Relation is not in BCNF : {relation}\nCandidate key: {keys}\nViolations {}\nSplitting on {on}",
            DependencyList(violations)
        ),
        Step::Leaf { relation, keys } => {
            format!("Relation is in BCNF : {relation}\nCandidate key: {keys}")
        }
        Step::Group { relation } => format!("Sub-Relation Added {relation}"),
        Step::Key { relation } => format!("Key Relation Added {relation}"),
        Step::Unchanged { relation } => format!("No functional dependencies in {relation}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(attributes: &str) -> AttributeSet {
        attributes.split_whitespace().collect()
    }

    fn textbook() -> Relation {
        Relation::with_dependencies(
            "R",
            set("a b c d e f g h"),
            [
                (set("a"), set("b f")),
                (set("a c"), set("d g")),
                (set("b c d"), set("e h")),
            ],
        )
    }

    #[test]
    fn test_keys() {
        assert_eq!(keys(&textbook()), "Candidate key: { ( a, c ) }");
        assert_eq!(keys_json(&textbook())["keys"], json!([["a", "c"]]));
    }

    #[test]
    fn test_closure() {
        assert_eq!(closure(&textbook(), &set("a")), "( a )+ = ( a, b, f )");
    }

    #[test]
    fn test_normal() {
        let report = normal(&textbook(), Some(NormalForm::Second));
        assert!(report.contains("Relation is not in Second Normal Form"));
        assert!(report.ends_with("{ [a -> b, f] }"));

        let value = normal_json(&textbook(), Some(NormalForm::Second));
        assert_eq!(value["ok"], json!(false));
        assert_eq!(value["form"], json!("2nf"));

        let value = normal_json(&textbook(), None);
        assert_eq!(value["highest"], Value::Null);
    }

    #[test]
    fn test_cover() {
        let report = cover(&textbook(), true);
        assert!(report.contains("Reduced RHS - "));
        assert!(report.ends_with("Minimal cover: { [a -> b, f], [a, c -> d, g], [b, c, d -> e, h] }"));
        assert_eq!(
            cover(&Relation::new("E"), false),
            "The functional dependency set is empty"
        );
    }

    #[test]
    fn test_decomposition() {
        let report = decomposition(&textbook(), false, true);
        assert!(report.contains("Relation is not in BCNF : R(a, b, c, d, e, f, g, h)"));
        assert!(report.contains("Decomposed relations are"));

        let value = decomposition_json(&textbook(), true, false);
        assert_eq!(value["target"], json!("3nf"));
        assert_eq!(value["relations"].as_array().map(Vec::len), Some(3));
        assert!(value.get("steps").is_none());
    }

    #[test]
    fn test_normal_relation_is_not_decomposed() {
        let relation = Relation::with_dependencies("S", set("a b"), [(set("a"), set("b"))]);
        let report = decomposition(&relation, false, false);
        assert!(report.starts_with("No need to decompose the relation"));
    }
}
