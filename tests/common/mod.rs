//! Shared test infrastructure for todo integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;
use todo::cli::{self, ExitCode};
use todo::{ListQuery, Priority, Status, Store, Task};

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: Store,
}

impl TestEnv {
    /// Create a new test environment with an on-disk store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(&temp_dir.path().join("todo.sqlite3")).expect("Failed to open store");
        Self { temp_dir, store }
    }

    /// Create a task with default priority and status.
    pub fn add(&mut self, title: &str) -> Task {
        self.store
            .insert(title, Priority::Low, Status::Pending)
            .expect("Failed to insert task")
    }

    /// Create a task with specified priority.
    pub fn add_with_priority(&mut self, title: &str, priority: Priority) -> Task {
        self.store
            .insert(title, priority, Status::Pending)
            .expect("Failed to insert task")
    }

    /// Default listing view.
    pub fn default_view(&self) -> Vec<Task> {
        self.store.list(&ListQuery::new()).expect("Failed to list tasks")
    }

    /// Listing including completed tasks.
    pub fn everything(&self) -> Vec<Task> {
        self.store
            .list(&ListQuery::new().include_completed(true))
            .expect("Failed to list tasks")
    }

    /// Total rows in the table.
    pub fn total_count(&self) -> usize {
        self.store.count().expect("Failed to count tasks")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured result of one CLI invocation.
pub struct CliOutput {
    pub code: ExitCode,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout is not JSON")
    }
}

/// A database file in a temp directory, driven through the CLI front end.
pub struct CliEnv {
    pub temp_dir: TempDir,
    pub db: PathBuf,
}

impl CliEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = temp_dir.path().join("data").join("todo.sqlite3");
        Self { temp_dir, db }
    }

    /// Run `todo --db <db> <args...>`.
    pub fn run(&self, args: &[&str]) -> CliOutput {
        let mut argv: Vec<String> = vec!["todo".into(), "--db".into(), self.db.display().to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = cli::run(argv, &mut stdout, &mut stderr);

        CliOutput {
            code,
            stdout: String::from_utf8(stdout).expect("stdout is not UTF-8"),
            stderr: String::from_utf8(stderr).expect("stderr is not UTF-8"),
        }
    }

    /// Spawn the `todo` binary against this database with extra environment.
    pub fn spawn(&self, envs: &[(&str, &str)], args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_todo"))
            .env_remove("TODO_LOG")
            .envs(envs.iter().copied())
            .arg("--db")
            .arg(&self.db)
            .args(args)
            .output()
            .expect("Failed to spawn todo")
    }

    /// Open the same database directly.
    pub fn store(&self) -> Store {
        Store::open(&self.db).expect("Failed to open store")
    }
}

impl Default for CliEnv {
    fn default() -> Self {
        Self::new()
    }
}
