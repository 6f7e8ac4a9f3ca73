//! Built-in subcommands.

mod add;
mod complete;
mod delete;
mod edit;
mod list;
mod reopen;

pub use add::{Add, AddArgs};
pub use complete::{Complete, CompleteArgs};
pub use delete::{Delete, DeleteArgs};
pub use edit::{Edit, EditArgs, EditFields};
pub use list::{List, ListArgs};
pub use reopen::{Reopen, ReopenArgs};
