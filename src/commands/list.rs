//! `list`: show tasks as a table or JSON.

use clap::Args;
use log::info;

use crate::query::{ListQuery, SortKey};
use crate::render::Format;
use crate::store::StoreError;
use crate::subcommand::{Command, Context, Outcome, Subcommand};
use crate::types::ValidationError;

/// Show tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub query: ListQuery,
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Column to sort by
    #[arg(long, value_enum, default_value = "priority")]
    pub sort_by: SortKey,

    /// Display output in reverse order
    #[arg(long)]
    pub reverse: bool,

    /// Display output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Include completed tasks
    #[arg(long)]
    pub all: bool,
}

impl Subcommand for List {
    const TYPE_NAME: &'static str = "List";
    const ABOUT: &'static str = "Show tasks";

    type Args = ListArgs;

    fn from_args(args: ListArgs) -> Result<Self, ValidationError> {
        let query = ListQuery::new()
            .sort_by(args.sort_by)
            .reverse(args.reverse)
            .include_completed(args.all);
        let format = if args.json { Format::Json } else { Format::Table };

        Ok(Self { query, format })
    }

    fn run(&self, ctx: &mut Context) -> Result<Outcome, StoreError> {
        let tasks = ctx.store.list(&self.query)?;
        info!("Listing {} task(s)", tasks.len());

        Ok(Outcome::Tasks {
            tasks,
            format: self.format,
        })
    }

    fn into_command(self) -> Command {
        Command::List(self)
    }
}
