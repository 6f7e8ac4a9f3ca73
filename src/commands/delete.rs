//! `delete`: remove a task permanently.

use clap::Args;
use log::info;

use crate::store::StoreError;
use crate::subcommand::{Command, Context, Outcome, Subcommand};
use crate::types::{TaskId, ValidationError};

/// Remove a task from the database (permanently).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    pub id: TaskId,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Unique identifier for the task
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    pub id: TaskId,
}

impl Subcommand for Delete {
    const TYPE_NAME: &'static str = "Delete";
    const ABOUT: &'static str = "Remove a task from the database (permanently)";

    type Args = DeleteArgs;

    fn from_args(args: DeleteArgs) -> Result<Self, ValidationError> {
        Ok(Self { id: args.id })
    }

    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        let task = ctx.store.delete(self.id)?;
        info!("Deleted task {}", task.id);

        Ok(Outcome::Task {
            message: format!("Deleted task with ID {}", task.id),
            task,
        })
    }

    fn into_command(self) -> Command {
        Command::Delete(self)
    }
}
