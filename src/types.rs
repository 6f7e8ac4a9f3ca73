//! Core data types for the task list.

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use serde::{Serialize, Serializer};

/// Row identifier assigned by the store.
pub type TaskId = i64;

/// Display format for timestamps: ISO-8601 with a numeric UTC offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// One unit of trackable work.
///
/// Values handed out by the store are snapshots; changing a field here does
/// nothing to the persisted row until it is written back through
/// [`Store::update`](crate::Store::update).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Auto-increment identifier, never reused
    pub id: TaskId,

    /// Short description of the work
    pub title: String,

    /// How important the task is
    pub priority: Priority,

    /// Where the task is in its lifecycle
    pub status: Status,

    /// When the row was inserted
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Local>,

    /// Last modification
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Local>,
}

/// Task importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Task lifecycle state.
///
/// Any state may move to any other; the subcommands decide which target to
/// write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
pub enum Status {
    Pending,
    Active,
    Completed,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Decode the integer stored in the `priority` column.
    pub fn from_index(value: i64) -> Result<Self, ValidationError> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            other => Err(ValidationError::InvalidPriority(other)),
        }
    }

    /// Integer written to the `priority` column.
    pub fn index(self) -> i64 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::Active, Status::Completed];

    /// Decode the integer stored in the `status` column.
    pub fn from_index(value: i64) -> Result<Self, ValidationError> {
        match value {
            0 => Ok(Status::Pending),
            1 => Ok(Status::Active),
            2 => Ok(Status::Completed),
            other => Err(ValidationError::InvalidStatus(other)),
        }
    }

    /// Integer written to the `status` column.
    pub fn index(self) -> i64 {
        match self {
            Status::Pending => 0,
            Status::Active => 1,
            Status::Completed => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Active => "Active",
            Status::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A task row exactly as it comes out of SQLite, before any checks.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTask {
    pub id: TaskId,
    pub title: String,
    pub priority: i64,
    pub status: i64,
    pub created_at: f64,
    pub updated_at: f64,
}

impl TryFrom<RawTask> for Task {
    type Error = ValidationError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let task = Task {
            id: raw.id,
            title: raw.title,
            priority: Priority::from_index(raw.priority)?,
            status: Status::from_index(raw.status)?,
            created_at: timestamp_from_epoch(raw.created_at)?,
            updated_at: timestamp_from_epoch(raw.updated_at)?,
        };

        if task.updated_at < task.created_at {
            return Err(ValidationError::TimestampOrder);
        }

        Ok(task)
    }
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// `created_at` in the fixed display format.
    pub fn created_at_display(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `updated_at` in the fixed display format.
    pub fn updated_at_display(&self) -> String {
        self.updated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

/// Current time as fractional epoch seconds (microsecond precision).
pub fn epoch_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Interpret stored epoch seconds as an instant in the local timezone.
pub fn timestamp_from_epoch(seconds: f64) -> Result<DateTime<Local>, ValidationError> {
    if !seconds.is_finite() {
        return Err(ValidationError::InvalidTimestamp(seconds));
    }
    let micros = (seconds * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_micros(micros)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or(ValidationError::InvalidTimestamp(seconds))
}

/// Validation errors for task fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    InvalidPriority(i64),
    InvalidStatus(i64),
    InvalidTimestamp(f64),
    TimestampOrder,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::InvalidPriority(value) => {
                write!(f, "priority must be 0-2, got {}", value)
            }
            ValidationError::InvalidStatus(value) => write!(f, "status must be 0-2, got {}", value),
            ValidationError::InvalidTimestamp(value) => write!(f, "invalid timestamp: {}", value),
            ValidationError::TimestampOrder => write!(f, "updated_at cannot be before created_at"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a title before it reaches the store. Any non-empty text is valid.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
