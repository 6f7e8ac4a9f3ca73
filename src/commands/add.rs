//! `add`: create a task.

use clap::Args;
use log::info;

use crate::store::StoreError;
use crate::subcommand::{Command, Context, Outcome, Subcommand};
use crate::types::{Priority, Status, ValidationError, validate_title};

/// Create a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Add {
    pub title: String,
    pub priority: Priority,
    pub status: Status,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Description of the task
    pub title: String,

    /// Importance of the task
    #[arg(long, value_enum, default_value = "low")]
    pub priority: Priority,

    /// Current state of the task
    #[arg(long, value_enum, default_value = "pending")]
    pub status: Status,
}

impl Subcommand for Add {
    const TYPE_NAME: &'static str = "Add";
    const ABOUT: &'static str = "Create a new task";

    type Args = AddArgs;

    fn from_args(args: AddArgs) -> Result<Self, ValidationError> {
        validate_title(&args.title)?;
        Ok(Self {
            title: args.title,
            priority: args.priority,
            status: args.status,
        })
    }

    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        let task = ctx.store.insert(&self.title, self.priority, self.status)?;
        info!("Created task {}", task.id);

        Ok(Outcome::Task {
            message: "Task created successfully!".to_string(),
            task,
        })
    }

    fn into_command(self) -> Command {
        Command::Add(self)
    }
}
