//! Interactive editing session over a single relation.
//!
//! Each input line is one command:
//!
//! ```text
//! show | keys | closure <attrs> | normal [2nf|3nf|bcnf] | cover
//! decompose [preserving] | verbose [on|off]
//! add attributes <attrs> | add fds <lhs -> rhs; ...>
//! remove attributes <attrs> | remove fd <lhs -> rhs>
//! rename <name> | clear attributes | clear fds | new <name>
//! save <path> | help | quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use fdnorm_core::schema::DependencyList;
use fdnorm_core::{AttributeMode, NormalForm, Relation};
use fdnorm_parser::{is_name, parse_attribute_list, parse_dependencies, parse_dependency, Diagnostic};

use crate::{report, save_relation};

const HELP: &str = "\
Commands:
  show                       print the relation
  keys                       print the candidate keys
  closure <a, b>             print the closure of an attribute set
  normal [2nf|3nf|bcnf]      test a normal form, or print the highest one
  cover                      compute the minimal cover
  decompose [preserving]     BCNF decomposition, or FD-preserving 3NF synthesis
  verbose [on|off]           print intermediate steps of cover and decompose
  add attributes <a, b>      add attributes
  add fds <a, b -> c; d -> e>
                             add functional dependencies
  remove attributes <a, b>   remove attributes and the dependencies using them
  remove fd <a -> b>         remove a functional dependency
  rename <name>              rename the relation
  clear attributes           remove all attributes and dependencies
  clear fds                  remove all functional dependencies
  new <name>                 start over with an empty relation
  save <path>                write the relation to a .fd or .json file
  help                       print this message
  quit                       leave the shell";

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// The relation being edited and the session options.
#[derive(Debug, Clone)]
pub struct Session {
    relation: Relation,
    verbose: bool,
}

impl Session {
    #[must_use]
    pub const fn new(relation: Relation) -> Self {
        Self {
            relation,
            verbose: false,
        }
    }

    #[must_use]
    pub const fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Read commands from `input` until `quit` or end of input, writing every
    /// reply to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "Relation: {}", self.relation)?;
        writeln!(output, "Type `help` for the list of commands.")?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            match self.execute(&line?) {
                Reply::Quit => return Ok(()),
                Reply::Output(text) if text.is_empty() => {}
                Reply::Output(text) => writeln!(output, "{text}")?,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)
    }

    /// Execute one command line.
    pub fn execute(&mut self, line: &str) -> Reply {
        let (command, rest) = split_word(line);
        tracing::debug!(command, "shell command");
        let text = match command {
            "" => String::new(),
            "quit" | "q" | "exit" => return Reply::Quit,
            "help" | "?" => HELP.to_string(),
            "show" => report::relation(&self.relation),
            "keys" => report::keys(&self.relation),
            "closure" => self.closure(rest),
            "normal" => self.normal(rest),
            "cover" => report::cover(&self.relation, self.verbose),
            "decompose" => self.decompose(rest),
            "verbose" => self.set_verbose(rest),
            "add" => self.add(rest),
            "remove" => self.remove(rest),
            "rename" => self.rename(rest),
            "clear" => self.clear(rest),
            "new" => self.reset(rest),
            "save" => self.save(rest),
            other => format!("Unknown command '{other}'. Type `help` for the list of commands."),
        };
        Reply::Output(text)
    }

    fn closure(&self, rest: &str) -> String {
        let parsed = parse_attribute_list(rest);
        let mut out = diagnostics(&parsed.diagnostics);
        if parsed.value.is_empty() {
            out.push_str("No valid attributes found in the input");
        } else {
            out.push_str(&report::closure(&self.relation, &parsed.value));
        }
        out
    }

    fn normal(&self, rest: &str) -> String {
        if rest.is_empty() {
            return report::normal(&self.relation, None);
        }
        match rest.parse::<NormalForm>() {
            Ok(form) => report::normal(&self.relation, Some(form)),
            Err(e) => format!("{e}, got '{rest}'"),
        }
    }

    fn decompose(&self, rest: &str) -> String {
        match rest {
            "" => report::decomposition(&self.relation, false, self.verbose),
            "preserving" => report::decomposition(&self.relation, true, self.verbose),
            other => format!("Unknown decomposition '{other}', expected nothing or `preserving`"),
        }
    }

    fn set_verbose(&mut self, rest: &str) -> String {
        match rest {
            "" | "on" => self.verbose = true,
            "off" => self.verbose = false,
            other => return format!("Expected `on` or `off`, got '{other}'"),
        }
        format!("Step-by-step output {}", if self.verbose { "on" } else { "off" })
    }

    fn add(&mut self, rest: &str) -> String {
        let (what, rest) = split_word(rest);
        match what {
            "attributes" | "attrs" | "attribute" => self.add_attributes(rest),
            "fds" | "fd" | "dependencies" | "dependency" => self.add_dependencies(rest),
            _ => "Usage: add attributes <a, b> | add fds <a -> b; ...>".to_string(),
        }
    }

    fn add_attributes(&mut self, rest: &str) -> String {
        let parsed = parse_attribute_list(rest);
        let mut out = diagnostics(&parsed.diagnostics);
        if parsed.value.is_empty() {
            out.push_str("No valid attributes found in the input");
            return out;
        }
        if self.relation.add_attributes(parsed.value) > 0 {
            out.push_str("Attribute set updated\n");
        } else {
            out.push_str("No new attribute inserted, attributes already present in the relation\n");
        }
        out.push_str(&format!("Attributes: {}", self.relation.attributes()));
        out
    }

    fn add_dependencies(&mut self, rest: &str) -> String {
        let parsed = parse_dependencies(rest);
        let mut out = diagnostics(&parsed.diagnostics);
        if parsed.value.is_empty() {
            out.push_str("No valid dependencies found in the input");
            return out;
        }

        for (lhs, rhs) in parsed.value {
            let unknown = lhs.union(&rhs).difference(self.relation.attributes());
            let shown = format!("{lhs} -> {rhs}");
            match self.relation.add_dependency(lhs, rhs, AttributeMode::Extend) {
                Some(stored) => out.push_str(&format!("Dependency '{stored}' added to the relation\n")),
                None => out.push_str(&format!("Dependency '{shown}' is trivial and was not added\n")),
            }
            if !unknown.is_empty() {
                out.push_str(&format!("Attributes added to the relation: {unknown}\n"));
            }
        }
        out.push_str(&format!(
            "Functional dependencies: {}",
            DependencyList(self.relation.dependencies())
        ));
        out
    }

    fn remove(&mut self, rest: &str) -> String {
        let (what, rest) = split_word(rest);
        match what {
            "attributes" | "attrs" | "attribute" => self.remove_attributes(rest),
            "fd" | "dependency" => self.remove_dependency(rest),
            _ => "Usage: remove attributes <a, b> | remove fd <a -> b>".to_string(),
        }
    }

    fn remove_attributes(&mut self, rest: &str) -> String {
        if self.relation.attributes().is_empty() {
            return "The attribute set is empty".to_string();
        }
        let parsed = parse_attribute_list(rest);
        let mut out = diagnostics(&parsed.diagnostics);
        let removed = self
            .relation
            .remove_attributes(parsed.value.iter().map(String::as_str));
        if removed > 0 {
            out.push_str(&format!("Attribute removed from the relation\nRelation: {}", self.relation));
        } else {
            out.push_str("Attribute not found in the relation");
        }
        out
    }

    fn remove_dependency(&mut self, rest: &str) -> String {
        if self.relation.dependencies().is_empty() {
            return "The functional dependency set is empty".to_string();
        }
        match parse_dependency(rest) {
            Ok(parsed) => {
                let mut out = diagnostics(&parsed.diagnostics);
                let (lhs, rhs) = parsed.value;
                if self.relation.remove_dependency(&lhs, &rhs) {
                    out.push_str("Dependency removed from the relation");
                } else {
                    out.push_str("Dependency not found in the relation");
                }
                out
            }
            Err(diagnostic) => diagnostic.to_string(),
        }
    }

    fn rename(&mut self, rest: &str) -> String {
        if !is_name(rest) {
            return invalid_name(rest);
        }
        self.relation.rename(rest);
        "Relation name changed".to_string()
    }

    fn clear(&mut self, rest: &str) -> String {
        match rest {
            "attributes" | "attrs" => {
                if self.relation.attributes().is_empty() {
                    return "The attribute set is empty".to_string();
                }
                self.relation.clear_attributes();
                "All attributes and functional dependencies removed".to_string()
            }
            "fds" | "dependencies" => {
                if self.relation.dependencies().is_empty() {
                    return "The functional dependency set is empty".to_string();
                }
                self.relation.clear_dependencies();
                "All functional dependencies removed".to_string()
            }
            _ => "Usage: clear attributes | clear fds".to_string(),
        }
    }

    fn reset(&mut self, rest: &str) -> String {
        if !is_name(rest) {
            return invalid_name(rest);
        }
        self.relation = Relation::new(rest);
        format!("Relation: {}", self.relation)
    }

    fn save(&self, rest: &str) -> String {
        if rest.is_empty() {
            return "Usage: save <path>".to_string();
        }
        match save_relation(Path::new(rest), &self.relation) {
            Ok(()) => format!("Relation saved to {rest}"),
            Err(e) => format!("Failed to save {rest}: {e}"),
        }
    }
}

/// The first word of `line` and the trimmed remainder.
fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim();
    line.split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()))
}

fn diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| format!("Ignored: {diagnostic}\n"))
        .collect()
}

fn invalid_name(name: &str) -> String {
    format!(
        "Error: invalid relation name '{name}'. Relation names must not be empty and must start with a letter or `_`"
    )
}
