//! Subcommand contract, registry, and dispatch.
//!
//! Each operation declares its flags through a `clap::Args` type, builds a
//! typed request from the parsed values, and runs it against the store held
//! by [`Context`]. The [`Registry`] maps dispatch names to those operations
//! and is the only place the CLI learns which subcommands exist.

use clap::{ArgMatches, FromArgMatches};
use log::debug;

use crate::commands::{Add, Complete, Delete, Edit, List, Reopen};
use crate::render::Format;
use crate::store::{Store, StoreError};
use crate::types::{Task, ValidationError};

/// State shared with every subcommand run.
pub struct Context {
    pub store: Store,
}

impl Context {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// What a successful run produced, before it is written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// One task, shown as JSON on stdout, with a status line for stderr.
    Task { message: String, task: Task },
    /// A listing in the requested format.
    Tasks { tasks: Vec<Task>, format: Format },
}

/// One CLI operation.
pub trait Subcommand: Sized {
    /// PascalCase type name; the dispatch name is derived from it.
    const TYPE_NAME: &'static str;

    /// One-line help text.
    const ABOUT: &'static str;

    /// Flags and positionals this subcommand accepts.
    type Args: clap::Args;

    /// Build the typed request from parsed arguments.
    fn from_args(args: Self::Args) -> Result<Self, ValidationError>;

    /// Execute against the store.
    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError>;

    fn into_command(self) -> Command;

    /// Dispatch name, e.g. `Add` -> `add`.
    fn name() -> String {
        kebab_case(Self::TYPE_NAME)
    }
}

/// A parsed, validated request for one of the known subcommands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Add),
    Complete(Complete),
    Delete(Delete),
    Edit(Edit),
    List(List),
    Reopen(Reopen),
}

impl Command {
    pub fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        match self {
            Command::Add(cmd) => cmd.run(ctx),
            Command::Complete(cmd) => cmd.run(ctx),
            Command::Delete(cmd) => cmd.run(ctx),
            Command::Edit(cmd) => cmd.run(ctx),
            Command::List(cmd) => cmd.run(ctx),
            Command::Reopen(cmd) => cmd.run(ctx),
        }
    }
}

/// Errors raised while selecting and building a subcommand.
///
/// All of these happen before the store is opened.
#[derive(Debug)]
pub enum DispatchError {
    /// Arguments did not match the subcommand's declaration.
    Usage(clap::Error),
    /// No subcommand is registered under this name.
    UnknownSubcommand(String),
    /// Arguments parsed but a value failed a domain check.
    Validation(ValidationError),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Usage(e) => write!(f, "{}", e),
            DispatchError::UnknownSubcommand(name) => write!(f, "unknown subcommand: {}", name),
            DispatchError::Validation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Registered subcommand.
pub struct Entry {
    name: String,
    about: &'static str,
    augment: fn(clap::Command) -> clap::Command,
    build: fn(&ArgMatches) -> Result<Command, DispatchError>,
}

impl Entry {
    fn of<S: Subcommand>() -> Self {
        Self {
            name: S::name(),
            about: S::ABOUT,
            augment: augment::<S>,
            build: build::<S>,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn augment<S: Subcommand>(cmd: clap::Command) -> clap::Command {
    <S::Args as clap::Args>::augment_args(cmd)
}

fn build<S: Subcommand>(matches: &ArgMatches) -> Result<Command, DispatchError> {
    let args = S::Args::from_arg_matches(matches).map_err(DispatchError::Usage)?;
    let request = S::from_args(args).map_err(DispatchError::Validation)?;
    Ok(request.into_command())
}

/// Dispatch table, built once at startup and passed down.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in subcommand.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register::<Add>();
        registry.register::<Complete>();
        registry.register::<Delete>();
        registry.register::<Edit>();
        registry.register::<List>();
        registry.register::<Reopen>();
        registry
    }

    pub fn register<S: Subcommand>(&mut self) {
        self.entries.push(Entry::of::<S>());
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Add one clap subcommand per registered entry.
    pub fn augment(&self, mut cmd: clap::Command) -> clap::Command {
        for entry in &self.entries {
            let sub = clap::Command::new(entry.name.clone()).about(entry.about);
            cmd = cmd.subcommand((entry.augment)(sub));
        }
        cmd
    }

    /// Turn the selected subcommand's matches into a typed request.
    pub fn dispatch(&self, name: &str, matches: &ArgMatches) -> Result<Command, DispatchError> {
        let entry = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownSubcommand(name.to_string()))?;
        debug!("Dispatching to '{}'", entry.name);
        (entry.build)(matches)
    }
}

/// Convert PascalCase to kebab-case.
///
/// Every uppercase ASCII letter after the first character becomes `-` plus
/// its lowercase form.
pub fn kebab_case(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out: String = first.to_lowercase().collect();
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, Status};

    fn parse(registry: &Registry, argv: &[&str]) -> Result<Command, DispatchError> {
        let cmd = registry.augment(clap::Command::new("todo").subcommand_required(true));
        let matches = cmd.try_get_matches_from(argv).map_err(DispatchError::Usage)?;
        let (name, sub) = matches.subcommand().expect("subcommand required");
        registry.dispatch(name, sub)
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("Add"), "add");
        assert_eq!(kebab_case("ListAll"), "list-all");
        assert_eq!(kebab_case("MarkAsDone"), "mark-as-done");
        assert_eq!(kebab_case("x"), "x");
        assert_eq!(kebab_case(""), "");
    }

    #[test]
    fn test_standard_registry_names() {
        let registry = Registry::standard();
        let names: Vec<&str> = registry.entries().iter().map(Entry::name).collect();
        assert_eq!(names, vec!["add", "complete", "delete", "edit", "list", "reopen"]);
    }

    #[test]
    fn test_dispatch_add_with_defaults() {
        let registry = Registry::standard();
        let command = parse(&registry, &["todo", "add", "Buy milk"]).unwrap();

        match command {
            Command::Add(add) => {
                assert_eq!(add.title, "Buy milk");
                assert_eq!(add.priority, Priority::Low);
                assert_eq!(add.status, Status::Pending);
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_unknown_name() {
        let registry = Registry::standard();
        let matches = ArgMatches::default();
        assert!(matches!(
            registry.dispatch("archive", &matches),
            Err(DispatchError::UnknownSubcommand(name)) if name == "archive"
        ));
    }

    #[test]
    fn test_missing_positional_is_usage_error() {
        let registry = Registry::standard();
        assert!(matches!(
            parse(&registry, &["todo", "complete"]),
            Err(DispatchError::Usage(_))
        ));
    }

    #[test]
    fn test_bad_choice_is_usage_error() {
        let registry = Registry::standard();
        assert!(matches!(
            parse(&registry, &["todo", "add", "Task", "--priority", "urgent"]),
            Err(DispatchError::Usage(_))
        ));
    }

    #[test]
    fn test_empty_title_is_validation_error() {
        let registry = Registry::standard();
        assert!(matches!(
            parse(&registry, &["todo", "add", ""]),
            Err(DispatchError::Validation(ValidationError::EmptyTitle))
        ));
    }

    #[test]
    fn test_subcommand_runs_through_context() {
        let registry = Registry::standard();
        let mut ctx = Context::new(Store::open_in_memory().unwrap());

        let command = parse(&registry, &["todo", "add", "Write report", "--priority", "high"]).unwrap();
        let outcome = command.run(&mut ctx).unwrap();

        match outcome {
            Outcome::Task { task, .. } => assert_eq!(task.priority, Priority::High),
            other => panic!("expected a task, got {:?}", other),
        }
        assert_eq!(ctx.store.count().unwrap(), 1);
    }
}
