//! Listing filter and sort policy.

use clap::ValueEnum;

use crate::types::{Priority, Status};

/// Column a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    Id,
    #[default]
    Priority,
    Status,
    #[value(name = "created_at")]
    CreatedAt,
}

impl SortKey {
    fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Priority => "priority",
            SortKey::Status => "status",
            SortKey::CreatedAt => "created_at",
        }
    }
}

/// What a listing returns and in which order.
///
/// Sorting by priority inverts the requested direction so HIGH reads first;
/// `--reverse` flips it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    sort_by: SortKey,
    reverse: bool,
    include_completed: bool,
}

impl ListQuery {
    /// Default view: pending and active tasks, most important first.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = key;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Include COMPLETED tasks.
    pub fn include_completed(mut self, include: bool) -> Self {
        self.include_completed = include;
        self
    }

    pub fn key(&self) -> SortKey {
        self.sort_by
    }

    pub fn includes_completed(&self) -> bool {
        self.include_completed
    }

    /// Effective direction after the priority inversion.
    pub fn is_descending(&self) -> bool {
        self.reverse != (self.sort_by == SortKey::Priority)
    }

    /// `WHERE` clause for the status filter, empty when everything is shown.
    pub(crate) fn where_sql(&self) -> String {
        if self.include_completed {
            String::new()
        } else {
            format!("WHERE status != {}", Status::Completed.index())
        }
    }

    /// `ORDER BY` clause.
    ///
    /// The rank term puts HIGH open tasks first and COMPLETED ones last
    /// regardless of direction; `id` makes the order total.
    pub(crate) fn order_sql(&self) -> String {
        let dir = if self.is_descending() { "DESC" } else { "ASC" };
        let completed = Status::Completed.index();
        let high = Priority::High.index();

        format!(
            "ORDER BY {column} {dir}, \
             CASE WHEN status = {completed} THEN 3 WHEN priority = {high} THEN 1 ELSE 2 END ASC, \
             priority {dir}, status {dir}, id ASC",
            column = self.sort_by.column(),
        )
    }
}
