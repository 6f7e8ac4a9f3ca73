//! `edit`: change the title, priority, or status of a task.

use clap::Args;
use log::info;

use crate::store::{StoreError, TaskUpdate};
use crate::subcommand::{Command, Context, Outcome, Subcommand};
use crate::types::{Priority, Status, TaskId, ValidationError, validate_title};

/// Change the title, priority, or status of a task.
///
/// Any status may be set directly; there is no transition table.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub id: TaskId,
    pub changes: TaskUpdate,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Unique identifier for the task
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    pub id: TaskId,

    #[command(flatten)]
    pub fields: EditFields,
}

/// At least one of these must be given.
#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
pub struct EditFields {
    /// New description of the task
    #[arg(long)]
    pub title: Option<String>,

    /// New importance of the task
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// New state of the task
    #[arg(long, value_enum)]
    pub status: Option<Status>,
}

impl Subcommand for Edit {
    const TYPE_NAME: &'static str = "Edit";
    const ABOUT: &'static str = "Change the title, priority, or status of a task";

    type Args = EditArgs;

    fn from_args(args: EditArgs) -> Result<Self, ValidationError> {
        if let Some(title) = &args.fields.title {
            validate_title(title)?;
        }

        Ok(Self {
            id: args.id,
            changes: TaskUpdate {
                title: args.fields.title,
                priority: args.fields.priority,
                status: args.fields.status,
            },
        })
    }

    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        let task = ctx.store.update(self.id, &self.changes)?;
        info!("Edited task {}", task.id);

        Ok(Outcome::Task {
            message: format!("Updated task with ID {}", task.id),
            task,
        })
    }

    fn into_command(self) -> Command {
        Command::Edit(self)
    }
}
