//! fdnorm CLI -- analyse and normalize relation schemas.

pub mod report;
pub mod shell;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use derive_more::From;
use fdnorm_core::schema::RelationRecord;
use fdnorm_core::{NormalForm, Relation};
use fdnorm_parser::{is_name, parse_schema, ParseError};

#[derive(Debug, Parser)]
#[command(
    name = "fdnorm",
    about = "Functional dependency analysis and schema normalization"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a relation
    Show(SchemaArgs),
    /// Print the candidate keys of a relation
    Keys(SchemaArgs),
    /// Print the closure of an attribute set
    Closure(ClosureArgs),
    /// Test a relation against a normal form
    Normal(NormalArgs),
    /// Compute the minimal cover of the functional dependencies
    Cover(CoverArgs),
    /// Decompose a relation into sub-relations
    Decompose(DecomposeArgs),
    /// Format schema (.fd) files
    Fmt(FmtArgs),
    /// Generate random relation schemas
    Generate(GenerateArgs),
    /// Print the JSON Schema for the relation input format to stdout
    Schema,
    /// Edit and query a relation interactively
    Shell(ShellArgs),
}

/// A schema file and the output format.
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Schema file: `.fd` text format, or `.json`
    pub input: PathBuf,
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct ClosureArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Comma-separated attributes to close over
    #[arg(long)]
    pub of: String,
}

#[derive(Debug, Parser)]
pub struct NormalArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Normal form to test; prints the highest satisfied form when omitted
    #[arg(long)]
    pub form: Option<FormArg>,
}

#[derive(Debug, Parser)]
pub struct CoverArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Print every reduction phase
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct DecomposeArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Preserve functional dependencies (3NF synthesis) instead of BCNF splitting
    #[arg(long)]
    pub preserving: bool,
    /// Print every decomposition step
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct FmtArgs {
    /// Schema files or directories to format
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Check formatting without modifying files (exit 1 if unformatted)
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of relations to generate
    #[arg(long)]
    pub n_schema: u64,
    /// Number of attributes per relation
    #[arg(long)]
    pub n_attribute: u64,
    /// Number of dependencies drawn per relation
    #[arg(long)]
    pub n_dependency: u64,
    /// Largest left-hand side drawn
    #[arg(long, default_value_t = 2)]
    pub max_lhs: u64,
    /// Largest right-hand side drawn
    #[arg(long, default_value_t = 2)]
    pub max_rhs: u64,
    /// Output directory for generated schema files
    #[arg(long)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Parser)]
pub struct ShellArgs {
    /// Schema file to start from
    pub input: Option<PathBuf>,
    /// Name of the relation when no input file is given
    #[arg(long, default_value = "R")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormArg {
    #[value(name = "2nf")]
    Second,
    #[value(name = "3nf")]
    Third,
    #[value(name = "bcnf")]
    BoyceCodd,
}

impl From<FormArg> for NormalForm {
    fn from(form: FormArg) -> Self {
        match form {
            FormArg::Second => Self::Second,
            FormArg::Third => Self::Third,
            FormArg::BoyceCodd => Self::BoyceCodd,
        }
    }
}

/// Error returned by the commands.
#[derive(Debug, From)]
pub enum CliError {
    Io(std::io::Error),
    Parse(ParseError),
    Json(serde_json::Error),
    /// Malformed command line input, such as an invalid attribute list.
    Input(String),
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid JSON schema: {e}"),
            Self::Input(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Read a relation from `path`.
///
/// Files with a `.json` extension hold the serde form of a relation; anything
/// else is parsed as the schema text format.
///
/// # Errors
///
/// Returns a [`CliError`] if the file cannot be read or does not parse.
pub fn load_relation(path: &Path) -> Result<Relation, CliError> {
    let text = fs::read_to_string(path)?;
    let relation = if is_json(path) {
        let record: RelationRecord = serde_json::from_str(&text)?;
        check_names(&record)?;
        record.into()
    } else {
        parse_schema(&text)?
    };
    tracing::debug!(path = %path.display(), %relation, "loaded relation");
    Ok(relation)
}

/// Write `relation` to `path`, as JSON or in the schema text format depending
/// on the extension.
///
/// # Errors
///
/// Returns a [`CliError`] if the file cannot be written.
pub fn save_relation(path: &Path, relation: &Relation) -> Result<(), CliError> {
    let text = if is_json(path) {
        let record = RelationRecord::from(relation.clone());
        serde_json::to_string_pretty(&record)?
    } else {
        fdnorm_parser::format_relation(relation)
    };
    fs::write(path, text)?;
    Ok(())
}

/// Reject a record holding names the schema text format cannot express.
fn check_names(record: &RelationRecord) -> Result<(), CliError> {
    let attributes = record
        .dependencies
        .iter()
        .flat_map(|d| d.lhs.iter().chain(&d.rhs))
        .chain(&record.attributes);
    match core::iter::once(&record.name)
        .chain(attributes)
        .find(|name| !is_name(name.as_str()))
    {
        Some(name) => Err(CliError::Input(format!("'{name}' is not a valid name"))),
        None => Ok(()),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
