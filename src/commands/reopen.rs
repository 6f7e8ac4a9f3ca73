//! `reopen`: move a task back to pending.

use clap::Args;
use log::info;

use crate::store::{StoreError, TaskUpdate};
use crate::subcommand::{Command, Context, Outcome, Subcommand};
use crate::types::{Status, TaskId, ValidationError};

/// Mark a task as incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reopen {
    pub id: TaskId,
}

#[derive(Debug, Args)]
pub struct ReopenArgs {
    /// Unique identifier for the task
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    pub id: TaskId,
}

impl Subcommand for Reopen {
    const TYPE_NAME: &'static str = "Reopen";
    const ABOUT: &'static str = "Mark a task as incomplete";

    type Args = ReopenArgs;

    fn from_args(args: ReopenArgs) -> Result<Self, ValidationError> {
        Ok(Self { id: args.id })
    }

    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        let task = ctx.store.update(self.id, &TaskUpdate::status(Status::Pending))?;
        info!("Reopened task {}", task.id);

        Ok(Outcome::Task {
            message: format!("Reopened task with ID {}", task.id),
            task,
        })
    }

    fn into_command(self) -> Command {
        Command::Reopen(self)
    }
}
