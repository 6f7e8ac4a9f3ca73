//! todo: a personal task tracker backed by SQLite.
//!
//! Tasks carry a title, a [`Priority`], and a [`Status`], and live in a single
//! `task` table owned by the [`Store`]. The command-line front end maps each
//! subcommand (`add`, `complete`, `delete`, `edit`, `list`, `reopen`) to a
//! typed request through the [`Registry`] and runs it against the store.
//!
//! # Example
//!
//! ```no_run
//! use todo::{ListQuery, Priority, Status, Store};
//! use std::path::Path;
//!
//! let mut store = Store::open(Path::new("todo.sqlite3")).unwrap();
//!
//! let task = store.insert("Buy milk", Priority::Low, Status::Pending).unwrap();
//! store.insert("File taxes", Priority::High, Status::Pending).unwrap();
//!
//! // Most important first, completed tasks hidden
//! let open = store.list(&ListQuery::new()).unwrap();
//! assert_eq!(open[0].title, "File taxes");
//!
//! store.delete(task.id).unwrap();
//! ```

mod storage;
mod types;

pub mod cli;
pub mod commands;
pub mod logging;
pub mod query;
pub mod render;
pub mod store;
pub mod subcommand;

// Re-export public API
pub use query::{ListQuery, SortKey};
pub use render::Format;
pub use store::{Store, StoreError, TaskUpdate};
pub use subcommand::{Command, Context, DispatchError, Outcome, Registry, Subcommand};
pub use types::{Priority, RawTask, Status, Task, TaskId, ValidationError, TIMESTAMP_FORMAT};
