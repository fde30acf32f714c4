//! Winnow-based parser for the schema text format.
//!
//! Grammar:
//! ```text
//! schema     = trivia* header (trivia | dep_line)*
//! trivia     = WS? comment? line_end
//! header     = WS? name WS? "(" WS? attributes? ")" WS? comment? line_end
//! dep_line   = WS? dependency (WS? ";" WS? dependency)* WS? ";"? WS? comment? line_end
//! dependency = attributes "->" attributes
//! attributes = WS? name WS? ("," WS? name WS?)*
//! comment    = "//" REST_OF_LINE
//! line_end   = NEWLINE | EOF
//! name       = [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! Dependencies are admitted in [`AttributeMode::Extend`]: an attribute only
//! mentioned by a dependency joins the relation.

use fdnorm_core::{AttributeMode, AttributeSet, Relation};
use winnow::ascii::{line_ending, space0, till_line_ending};
use winnow::combinator::{alt, delimited, eof, opt, preceded, separated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse a schema file into a [`Relation`].
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input does
/// not conform to the grammar.
pub fn parse_schema(input: &str) -> Result<Relation, ParseError> {
    let original = input;
    let mut stream: &str = input;
    match schema_parser.parse_next(&mut stream) {
        Ok(relation) => Ok(relation),
        Err(e) => {
            let consumed = original.len().saturating_sub(stream.len());
            let (line, column) = offset_to_line_col(original, consumed);
            Err(ParseError {
                message: e.to_string(),
                line,
                column,
            })
        }
    }
}

/// Render `relation` in the schema text format.
///
/// The output parses back into an equal relation with [`parse_schema`].
#[must_use]
pub fn format_relation(relation: &Relation) -> String {
    let attributes: Vec<&str> = relation.attributes().iter().map(String::as_str).collect();
    let mut out = format!("{}({})\n", relation.name(), attributes.join(", "));
    for dependency in relation.dependencies() {
        out.push_str(&dependency.to_string());
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let prefix = &input[..offset.min(input.len())];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// A relation or attribute name.
fn name(input: &mut &str) -> ModalResult<String> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .map(String::from)
        .context(StrContext::Expected(StrContextValue::Description(
            "a name starting with a letter or `_`",
        )))
        .parse_next(input)
}

/// `"//" <rest-of-line>`, without the line ending.
fn comment(input: &mut &str) -> ModalResult<()> {
    preceded(literal("//"), till_line_ending)
        .void()
        .parse_next(input)
}

/// Optional trailing whitespace and comment, then a newline or end-of-input.
fn line_end(input: &mut &str) -> ModalResult<()> {
    (space0, opt(comment), alt((line_ending.void(), eof.void())))
        .void()
        .context(StrContext::Expected(StrContextValue::Description(
            "end of line",
        )))
        .parse_next(input)
}

// ---------------------------------------------------------------------------
// Structural parsers
// ---------------------------------------------------------------------------

/// A non-empty, comma-separated attribute list.
fn attributes(input: &mut &str) -> ModalResult<AttributeSet> {
    let names: Vec<String> =
        separated(1.., delimited(space0, name, space0), literal(",")).parse_next(input)?;
    Ok(names.into_iter().collect())
}

/// `attributes "->" attributes`
fn dependency(input: &mut &str) -> ModalResult<(AttributeSet, AttributeSet)> {
    let lhs = attributes.parse_next(input)?;
    literal("->")
        .context(StrContext::Expected(StrContextValue::StringLiteral("->")))
        .parse_next(input)?;
    let rhs = attributes.parse_next(input)?;
    Ok((lhs, rhs))
}

/// One or more `;`-separated dependencies on a line.
fn dependency_line(input: &mut &str) -> ModalResult<Vec<(AttributeSet, AttributeSet)>> {
    let dependencies: Vec<(AttributeSet, AttributeSet)> =
        separated(1.., dependency, (space0, literal(";"))).parse_next(input)?;
    opt((space0, literal(";"))).parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(dependencies)
}

/// `name "(" attributes? ")"`
fn header(input: &mut &str) -> ModalResult<Relation> {
    space0.parse_next(input)?;
    let relation = name
        .context(StrContext::Label("relation name"))
        .parse_next(input)?;
    (space0, literal("("), space0)
        .context(StrContext::Expected(StrContextValue::CharLiteral('(')))
        .parse_next(input)?;
    let attributes = opt(attributes).parse_next(input)?.unwrap_or_default();
    literal(")")
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(Relation::with_attributes(relation, attributes))
}

/// A line holding nothing but whitespace and an optional comment.
fn trivia(input: &mut &str) -> ModalResult<()> {
    line_end.parse_next(input)
}

fn schema_parser(input: &mut &str) -> ModalResult<Relation> {
    while !input.is_empty() && opt(trivia).parse_next(input)?.is_some() {}

    let mut relation = header.parse_next(input)?;

    while !input.is_empty() {
        if opt(trivia).parse_next(input)?.is_some() {
            continue;
        }
        let dependencies = dependency_line
            .context(StrContext::Label("functional dependency"))
            .parse_next(input)?;
        relation.add_dependencies(dependencies, AttributeMode::Extend);
    }

    Ok(relation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
