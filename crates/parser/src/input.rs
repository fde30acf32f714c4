//! Lenient parsing of interactive input.
//!
//! Unlike [`parse_schema`](crate::parse_schema), these functions never fail:
//! invalid fragments are skipped and reported as [`Diagnostic`]s next to
//! whatever could be parsed.
//!
//! - An attribute list is split on `,`; every fragment is trimmed and empty
//!   fragments are dropped silently.
//! - A dependency list is split on `;`; every dependency must contain exactly
//!   one `->` and keep at least one valid attribute on each side.

use fdnorm_core::AttributeSet;

use crate::lexer::is_name;

/// Why a fragment of the input was ignored.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    InvalidName,
    InvalidDependency,
}

/// An ignored fragment of the input.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub fragment: String,
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            DiagnosticKind::InvalidName => write!(
                f,
                "'{}' is not a valid name: names start with a letter or `_` and contain only letters, digits and `_`",
                self.fragment
            ),
            DiagnosticKind::InvalidDependency => {
                write!(f, "'{}' is an invalid functional dependency", self.fragment)
            }
        }
    }
}

/// The accepted part of some input and the diagnostics for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

/// A dependency given as its two sides.
pub type RawDependency = (AttributeSet, AttributeSet);

/// Parse a comma-separated attribute list such as `A, B, Cust_Name`.
#[must_use]
pub fn parse_attribute_list(input: &str) -> Parsed<AttributeSet> {
    let mut value = AttributeSet::new();
    let mut diagnostics = Vec::new();
    for fragment in fragments(input, ",") {
        if is_name(fragment) {
            value.insert(fragment);
        } else {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::InvalidName,
                fragment: fragment.to_string(),
            });
        }
    }
    Parsed { value, diagnostics }
}

/// Parse a single dependency such as `A, B -> C`.
///
/// # Errors
///
/// Returns an [`DiagnosticKind::InvalidDependency`] diagnostic when the input
/// does not hold exactly one `->` or a side has no valid attribute. Invalid
/// names on an otherwise usable side are dropped and reported in the
/// [`Parsed`] diagnostics.
pub fn parse_dependency(input: &str) -> Result<Parsed<RawDependency>, Diagnostic> {
    let fragment = input.trim();
    let invalid = || Diagnostic {
        kind: DiagnosticKind::InvalidDependency,
        fragment: fragment.to_string(),
    };

    let sides: Vec<&str> = fragment.split("->").map(str::trim).collect();
    let [lhs, rhs] = sides[..] else {
        return Err(invalid());
    };

    let lhs = parse_attribute_list(lhs);
    let rhs = parse_attribute_list(rhs);
    if lhs.value.is_empty() || rhs.value.is_empty() {
        return Err(invalid());
    }

    let mut diagnostics = lhs.diagnostics;
    diagnostics.extend(rhs.diagnostics);
    Ok(Parsed {
        value: (lhs.value, rhs.value),
        diagnostics,
    })
}

/// Parse `;`-separated dependencies such as `A, B -> C; Cust_No -> Cust_Name`.
#[must_use]
pub fn parse_dependencies(input: &str) -> Parsed<Vec<RawDependency>> {
    let mut value = Vec::new();
    let mut diagnostics = Vec::new();
    for fragment in fragments(input, ";") {
        match parse_dependency(fragment) {
            Ok(parsed) => {
                value.push(parsed.value);
                diagnostics.extend(parsed.diagnostics);
            }
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    Parsed { value, diagnostics }
}

/// Non-empty trimmed pieces of `input` between occurrences of `separator`.
fn fragments<'a>(input: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    input
        .split(separator)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(attributes: &str) -> AttributeSet {
        attributes.split_whitespace().collect()
    }

    #[test]
    fn test_attribute_list() {
        let parsed = parse_attribute_list(" A,B ,\tCust_Name, PhoneNo1 ,, ");
        assert_eq!(parsed.value, set("A B Cust_Name PhoneNo1"));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_names_are_reported() {
        let parsed = parse_attribute_list("a, 1b, c d, e");
        assert_eq!(parsed.value, set("a e"));
        let fragments: Vec<&str> = parsed
            .diagnostics
            .iter()
            .map(|d| d.fragment.as_str())
            .collect();
        assert_eq!(fragments, ["1b", "c d"]);
        assert!(parsed
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::InvalidName));
    }

    #[test]
    fn test_dependency() {
        let parsed = parse_dependency("A,B -> C").expect("valid dependency");
        assert_eq!(parsed.value, (set("A B"), set("C")));
    }

    #[test]
    fn test_dependency_needs_exactly_one_arrow() {
        for input in ["a b", "a -> b -> c", "a -> -> b", "a ->-> b", "a ->", "-> b", "->"] {
            let err = parse_dependency(input).expect_err(input);
            assert_eq!(err.kind, DiagnosticKind::InvalidDependency);
        }
    }

    #[test]
    fn test_dependency_side_without_valid_names() {
        let err = parse_dependency("1a -> b").expect_err("no valid lhs");
        assert_eq!(err.fragment, "1a -> b");

        let parsed = parse_dependency("a, 2x -> b").expect("lhs keeps a");
        assert_eq!(parsed.value.0, set("a"));
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn test_dependency_list() {
        let parsed = parse_dependencies("A,B -> C; Cust_No -> Cust_Name, Cust_Phn1; bad;");
        assert_eq!(
            parsed.value,
            [
                (set("A B"), set("C")),
                (set("Cust_No"), set("Cust_Name Cust_Phn1")),
            ]
        );
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(
            parsed.diagnostics[0].to_string(),
            "'bad' is an invalid functional dependency"
        );
    }

    #[test]
    fn test_dependency_list_with_doubled_arrow() {
        let parsed = parse_dependencies("a -> -> b; c -> d");
        assert_eq!(parsed.value, [(set("c"), set("d"))]);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].fragment, "a -> -> b");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_diagnostic_json() {
        let parsed = parse_attribute_list("a, 1b");
        let json = serde_json::to_value(&parsed.diagnostics).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!([{ "kind": "InvalidName", "fragment": "1b" }])
        );
    }
}
