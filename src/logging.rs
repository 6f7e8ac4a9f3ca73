//! Logger setup driven by `-v`/`-q` counts and the `TODO_LOG` variable.

use chrono::Local;
use log::LevelFilter;
use std::io::Write;

/// Environment variable consulted when neither `-v` nor `-q` is given.
pub const LOG_ENV: &str = "TODO_LOG";

/// Detail level requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Quiet,
    Default,
    Verbose,
    ExtraVerbose,
}

impl Verbosity {
    /// Quiet wins over verbose when both are present.
    pub fn from_counts(verbose: u8, quiet: u8) -> Self {
        match (quiet, verbose) {
            (1, _) => Verbosity::Quiet,
            (2.., _) => Verbosity::Silent,
            (0, 0) => Verbosity::Default,
            (0, 1) => Verbosity::Verbose,
            (0, 2..) => Verbosity::ExtraVerbose,
        }
    }

    pub fn level(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::Off,
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Default => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::ExtraVerbose => LevelFilter::Debug,
        }
    }
}

/// Startup configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDirective(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDirective(value) => write!(
                f,
                "invalid {} value '{}': expected one of OFF, DEBUG, INFO, WARNING, ERROR, CRITICAL",
                LOG_ENV, value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a `TODO_LOG` directive (case-insensitive).
///
/// `log` has nothing above `Error`, so CRITICAL maps there.
pub fn level_from_directive(directive: &str) -> Result<LevelFilter, ConfigError> {
    match directive.to_ascii_uppercase().as_str() {
        "OFF" => Ok(LevelFilter::Off),
        "DEBUG" => Ok(LevelFilter::Debug),
        "INFO" => Ok(LevelFilter::Info),
        "WARNING" | "WARN" => Ok(LevelFilter::Warn),
        "ERROR" => Ok(LevelFilter::Error),
        "CRITICAL" | "FATAL" => Ok(LevelFilter::Error),
        _ => Err(ConfigError::InvalidDirective(directive.to_string())),
    }
}

/// Effective level: explicit flags first, then the directive, then the default.
pub fn resolve_level(verbosity: Verbosity, directive: Option<&str>) -> Result<LevelFilter, ConfigError> {
    match (verbosity, directive) {
        (Verbosity::Default, Some(directive)) => level_from_directive(directive),
        _ => Ok(verbosity.level()),
    }
}

/// Install the stderr logger. A second call in the same process is a no-op.
pub fn setup_logging(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}: {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S%z"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
