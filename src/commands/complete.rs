//! `complete`: mark a task completed.

use clap::Args;
use log::info;

use crate::store::{StoreError, TaskUpdate};
use crate::subcommand::{Command, Context, Outcome, Subcommand};
use crate::types::{Status, TaskId, ValidationError};

/// Mark a task as complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complete {
    pub id: TaskId,
}

#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// Unique identifier for the task
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    pub id: TaskId,
}

impl Subcommand for Complete {
    const TYPE_NAME: &'static str = "Complete";
    const ABOUT: &'static str = "Mark a task as complete";

    type Args = CompleteArgs;

    fn from_args(args: CompleteArgs) -> Result<Self, ValidationError> {
        Ok(Self { id: args.id })
    }

    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        let task = ctx.store.update(self.id, &TaskUpdate::status(Status::Completed))?;
        info!("Completed task {}", task.id);

        Ok(Outcome::Task {
            message: format!("Completed task with ID {}", task.id),
            task,
        })
    }

    fn into_command(self) -> Command {
        Command::Complete(self)
    }
}
