pub mod input;
pub mod lexer;
pub mod parser;

pub use input::{
    parse_attribute_list, parse_dependencies, parse_dependency, Diagnostic, DiagnosticKind, Parsed,
    RawDependency,
};
pub use lexer::is_name;
pub use parser::{format_relation, parse_schema, ParseError};
