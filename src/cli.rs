//! Command-line front end: global flags, dispatch, output, and exit codes.

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use colored::*;
use eyre::WrapErr;
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::logging::{LOG_ENV, Verbosity, resolve_level, setup_logging};
use crate::render::{Format, render_json, render_table, render_task_json};
use crate::store::{Store, StoreError};
use crate::subcommand::{Context, DispatchError, Outcome, Registry};

/// Database file name inside the data directory.
pub const DB_FILE: &str = "todo.sqlite3";

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Terminated without any errors.
    Success = 0,
    /// Terminated due to an unrecoverable or operation-level error.
    Failure = 1,
    /// Terminated due to invalid command-line arguments.
    Usage = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Global flags. Subcommands are attached from the [`Registry`].
#[derive(Parser, Debug)]
#[command(
    name = "todo",
    about = "Track personal tasks from the command line",
    version,
    after_help = "Set TODO_LOG to OFF, DEBUG, INFO, WARNING, ERROR or CRITICAL to change the default log level."
)]
pub struct Cli {
    /// Use verbose output (or `-vv` for more verbose output)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use quiet output (or `-qq` for silent output)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Path to the task database (default: per-user data directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,
}

/// Full parser: global flags plus one subcommand per registry entry.
pub fn command(registry: &Registry) -> clap::Command {
    registry.augment(Cli::command().subcommand_required(true))
}

/// Default database location: the per-user data directory, falling back to
/// `~/.todo` and finally `./.todo`.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("todo"))
        .or_else(|| dirs::home_dir().map(|home| home.join(".todo")))
        .unwrap_or_else(|| PathBuf::from(".todo"))
        .join(DB_FILE)
}

fn open_store(path: &Path) -> eyre::Result<Store> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    Store::open(path).wrap_err_with(|| format!("Failed to open task database {}", path.display()))
}

/// Write a successful outcome: data to `out`, status line to `err`.
pub fn write_outcome(outcome: &Outcome, out: &mut dyn Write, err: &mut dyn Write) -> eyre::Result<()> {
    match outcome {
        Outcome::Task { message, task } => {
            writeln!(err, "{} {}\n", "✓".green(), message)?;
            writeln!(out, "{}", render_task_json(task)?)?;
        }
        Outcome::Tasks {
            tasks,
            format: Format::Json,
        } => {
            writeln!(out, "{}", render_json(tasks)?)?;
        }
        Outcome::Tasks {
            tasks,
            format: Format::Table,
        } => {
            for line in render_table(tasks) {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// Status markers are written to stderr, so color follows stderr rather than
/// stdout.
pub fn color_for_stderr(stderr_is_terminal: bool) {
    if !stderr_is_terminal {
        colored::control::set_override(false);
    }
}

fn fail(err: &mut dyn Write, message: impl std::fmt::Display) -> ExitCode {
    let _ = writeln!(err, "{} {}", "Error:".red().bold(), message);
    ExitCode::Failure
}

fn usage(out: &mut dyn Write, err: &mut dyn Write, error: clap::Error) -> ExitCode {
    // --help and --version come through here too
    if error.use_stderr() {
        let _ = write!(err, "{}", error.render());
        ExitCode::Usage
    } else {
        let _ = write!(out, "{}", error.render());
        ExitCode::Success
    }
}

/// Parse `args`, run one subcommand, and report the result.
///
/// Nothing touches the database until parsing, logging configuration, and
/// request validation have all succeeded.
pub fn run<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let registry = Registry::standard();
    let mut app = command(&registry);

    let matches = match app.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(e) => return usage(out, err, e),
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => return usage(out, err, e),
    };

    let verbosity = Verbosity::from_counts(cli.verbose, cli.quiet);
    let directive = std::env::var(LOG_ENV).ok();
    let level = match resolve_level(verbosity, directive.as_deref()) {
        Ok(level) => level,
        Err(e) => return fail(err, e),
    };
    setup_logging(level);

    let Some((name, sub_matches)) = matches.subcommand() else {
        let _ = write!(err, "{}", app.render_usage());
        return ExitCode::Usage;
    };
    info!("Subcommand: {}", name);

    let command = match registry.dispatch(name, sub_matches) {
        Ok(command) => command,
        Err(DispatchError::Usage(e)) => return usage(out, err, e),
        Err(DispatchError::UnknownSubcommand(name)) => {
            let _ = writeln!(err, "{} unknown subcommand '{}'", "Error:".red().bold(), name);
            let _ = write!(err, "{}", app.render_usage());
            return ExitCode::Usage;
        }
        Err(DispatchError::Validation(e)) => return fail(err, e),
    };
    debug!("Parsed request: {:?}", command);

    let db_path = cli.db.unwrap_or_else(default_db_path);
    let store = match open_store(&db_path) {
        Ok(store) => store,
        Err(e) => return fail(err, format!("{:#}", e)),
    };
    let mut ctx = Context::new(store);

    match command.run(&mut ctx) {
        Ok(outcome) => match write_outcome(&outcome, out, err) {
            Ok(()) => ExitCode::Success,
            Err(e) => fail(err, format!("{:#}", e)),
        },
        Err(StoreError::NotFound(id)) => {
            let _ = writeln!(err, "{} No task with ID {} found", "✗".red(), id);
            ExitCode::Failure
        }
        Err(e) => fail(err, e),
    }
}
