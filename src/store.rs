//! High-level store API for tasks.

use crate::query::ListQuery;
use crate::storage::{RawChanges, Storage};
use crate::types::{Priority, RawTask, Status, Task, TaskId, ValidationError, epoch_now, validate_title};
use log::debug;
use std::path::Path;

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// No task with this ID.
    NotFound(TaskId),
    /// A value failed a domain constraint, on the way in or out.
    Validation(ValidationError),
    /// The database is unreachable, locked, or corrupted.
    Storage(rusqlite::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "No task with ID {} found", id),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
            StoreError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::NotFound(_) => None,
            StoreError::Validation(e) => Some(e),
            StoreError::Storage(e) => Some(e),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        StoreError::Validation(e)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e)
    }
}

/// Partial update. Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Owner of the persisted task rows.
pub struct Store {
    storage: Storage,
}

impl Store {
    /// Open the database at `path`, creating the table on first use.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        debug!("Opening task database at {}", path.display());
        let storage = Storage::open(path)?;
        Ok(Self { storage })
    }

    /// Store backed by a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let storage = Storage::open_in_memory()?;
        Ok(Self { storage })
    }

    /// Create a task. `created_at` and `updated_at` are both set to now.
    pub fn insert(&mut self, title: &str, priority: Priority, status: Status) -> Result<Task, StoreError> {
        validate_title(title)?;

        let raw = self
            .storage
            .insert(title, priority.index(), status.index(), epoch_now())?;
        let task = Task::try_from(raw)?;

        debug!("Inserted task {} ({} / {})", task.id, task.priority, task.status);
        Ok(task)
    }

    /// Point lookup. A missing row is `Ok(None)`, not an error.
    pub fn fetch(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        self.storage.get(id)?.map(Self::checked).transpose()
    }

    /// Apply a partial update and refresh `updated_at`.
    pub fn update(&mut self, id: TaskId, changes: &TaskUpdate) -> Result<Task, StoreError> {
        if let Some(title) = &changes.title {
            validate_title(title)?;
        }

        let raw_changes = RawChanges {
            title: changes.title.as_deref(),
            priority: changes.priority.map(Priority::index),
            status: changes.status.map(Status::index),
        };

        let raw = self
            .storage
            .update(id, raw_changes, epoch_now())?
            .ok_or(StoreError::NotFound(id))?;

        debug!("Updated task {}: {:?}", id, changes);
        Self::checked(raw)
    }

    /// Hard-delete a task, returning it as it was just before removal.
    pub fn delete(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let raw = self.storage.delete(id)?.ok_or(StoreError::NotFound(id))?;

        debug!("Deleted task {}", id);
        Self::checked(raw)
    }

    /// Snapshot of the tasks matching `query`, in its order.
    pub fn list(&self, query: &ListQuery) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .storage
            .list(query)?
            .into_iter()
            .map(Self::checked)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Listed {} task(s) with {:?}", tasks.len(), query);
        Ok(tasks)
    }

    /// Total number of stored tasks, completed ones included.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.storage.count()?)
    }

    fn checked(raw: RawTask) -> Result<Task, StoreError> {
        Ok(Task::try_from(raw)?)
    }
}
