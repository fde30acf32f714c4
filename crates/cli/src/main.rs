use std::path::{Path, PathBuf};
use std::{fs, io, process};

use clap::Parser;
use fdnorm_cli::shell::Session;
use fdnorm_cli::{load_relation, report, App, CliError, Command, SchemaArgs};
use fdnorm_core::schema::RelationRecord;
use fdnorm_core::Relation;
use fdnorm_parser::{format_relation, is_name, parse_attribute_list, parse_schema};
use fdnorm_testgen::SchemaParams;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let app = App::parse();
    let result = match app.command {
        Command::Show(args) => query(&args, report::relation, report::relation_json),
        Command::Keys(args) => query(&args, report::keys, report::keys_json),
        Command::Closure(args) => closure(&args),
        Command::Normal(args) => {
            let form = args.form.map(Into::into);
            query(
                &args.schema,
                |r| report::normal(r, form),
                |r| report::normal_json(r, form),
            )
        }
        Command::Cover(args) => query(
            &args.schema,
            |r| report::cover(r, args.verbose),
            |r| report::cover_json(r, args.verbose),
        ),
        Command::Decompose(args) => query(
            &args.schema,
            |r| report::decomposition(r, args.preserving, args.verbose),
            |r| report::decomposition_json(r, args.preserving, args.verbose),
        ),
        Command::Fmt(args) => fmt(&args),
        Command::Generate(args) => generate(&args),
        Command::Schema => schema(),
        Command::Shell(args) => shell(args.input.as_deref(), args.name),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Load the relation named by `args` and print one of its reports.
fn query(
    args: &SchemaArgs,
    text: impl FnOnce(&Relation) -> String,
    json: impl FnOnce(&Relation) -> Value,
) -> Result<(), CliError> {
    let relation = load_relation(&args.input)?;
    if args.json {
        println!("{}", serde_json::to_string(&json(&relation))?);
    } else {
        println!("{}", text(&relation));
    }
    Ok(())
}

fn closure(args: &fdnorm_cli::ClosureArgs) -> Result<(), CliError> {
    let parsed = parse_attribute_list(&args.of);
    if let Some(diagnostic) = parsed.diagnostics.first() {
        return Err(CliError::Input(diagnostic.to_string()));
    }
    if parsed.value.is_empty() {
        return Err(CliError::Input("--of needs at least one attribute".into()));
    }
    query(
        &args.schema,
        |r| report::closure(r, &parsed.value),
        |r| report::closure_json(r, &parsed.value),
    )
}

fn fmt(args: &fdnorm_cli::FmtArgs) -> Result<(), CliError> {
    let mut files = Vec::new();
    for path in &args.paths {
        collect_schema_files(path, &mut files)?;
    }
    files.sort();

    let mut unformatted = Vec::new();
    for path in &files {
        let original = fs::read_to_string(path)?;
        let relation = parse_schema(&original)
            .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))?;
        let formatted = format_relation(&relation);
        if formatted == original {
            continue;
        }
        if args.check {
            println!("{}: not formatted", path.display());
            unformatted.push(path);
        } else {
            fs::write(path, formatted)?;
            println!("{}: formatted", path.display());
        }
    }

    if !unformatted.is_empty() {
        process::exit(1);
    }
    Ok(())
}

/// `path` itself if it is a file, or every `.fd` file directly inside it.
fn collect_schema_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<(), CliError> {
    if !path.is_dir() {
        files.push(path.to_path_buf());
        return Ok(());
    }
    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.extension().is_some_and(|ext| ext == "fd") {
            files.push(entry_path);
        }
    }
    Ok(())
}

fn generate(args: &fdnorm_cli::GenerateArgs) -> Result<(), CliError> {
    fs::create_dir_all(&args.output_dir)?;

    let params = SchemaParams::builder()
        .id(0)
        .n_attribute(args.n_attribute)
        .n_dependency(args.n_dependency)
        .max_lhs(args.max_lhs)
        .max_rhs(args.max_rhs)
        .build();
    let schemas = fdnorm_testgen::generate_mult_relations(args.n_schema, &params);

    for schema in &schemas {
        let path = args.output_dir.join(format!("{}.json", schema.get_id()));
        let record = RelationRecord::from(schema.get_relation().clone());
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &record)?;
        tracing::debug!(path = %path.display(), duration = %schema.get_duration(), "wrote schema");
    }

    println!(
        "Generated {} schemas to {}",
        schemas.len(),
        args.output_dir.display()
    );
    Ok(())
}

fn schema() -> Result<(), CliError> {
    let schema = schemars::schema_for!(RelationRecord);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn shell(input: Option<&Path>, name: String) -> Result<(), CliError> {
    let relation = match input {
        Some(path) => load_relation(path)?,
        None if is_name(&name) => Relation::new(name),
        None => return Err(CliError::Input(format!("'{name}' is not a valid relation name"))),
    };
    let mut session = Session::new(relation);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
