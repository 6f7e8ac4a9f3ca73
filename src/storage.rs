//! Storage layer: the SQLite `task` table.

use crate::query::ListQuery;
use crate::types::{RawTask, TaskId};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

/// Columns selected for every task read, in `RawTask` field order.
const TASK_COLUMNS: &str = "id, title, priority, status, created_at, updated_at";

/// Fields an update may touch. `None` leaves the column as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawChanges<'a> {
    pub title: Option<&'a str>,
    pub priority: Option<i64>,
    pub status: Option<i64>,
}

/// Single SQLite connection, opened once per process.
pub struct Storage {
    db: Connection,
}

impl Storage {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let db = Connection::open(path)?;
        let storage = Self { db };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let db = Connection::open_in_memory()?;
        let storage = Self { db };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize SQLite schema.
    fn init_schema(&self) -> rusqlite::Result<()> {
        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS task (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                -- 0 = low, 1 = medium, 2 = high
                priority INTEGER NOT NULL DEFAULT 1 CHECK (priority BETWEEN 0 AND 2),
                -- 0 = pending, 1 = active, 2 = completed
                status INTEGER NOT NULL DEFAULT 0 CHECK (status BETWEEN 0 AND 2),
                created_at NUMERIC NOT NULL,
                updated_at NUMERIC NOT NULL,
                CHECK (updated_at >= created_at)
            );
            "#,
        )
    }

    /// Insert a row; both timestamps are set to `now`.
    pub fn insert(&self, title: &str, priority: i64, status: i64, now: f64) -> rusqlite::Result<RawTask> {
        let sql = format!(
            "INSERT INTO task (title, priority, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) RETURNING {TASK_COLUMNS}"
        );
        self.db
            .query_row(&sql, params![title, priority, status, now], Self::row_to_raw)
    }

    /// Get a row by ID.
    pub fn get(&self, id: TaskId) -> rusqlite::Result<Option<RawTask>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM task WHERE id = ?1");
        self.db.query_row(&sql, params![id], Self::row_to_raw).optional()
    }

    /// Apply `changes` and refresh `updated_at`, which never moves backwards.
    pub fn update(&self, id: TaskId, changes: RawChanges<'_>, now: f64) -> rusqlite::Result<Option<RawTask>> {
        let sql = format!(
            "UPDATE task SET \
                title = COALESCE(?2, title), \
                priority = COALESCE(?3, priority), \
                status = COALESCE(?4, status), \
                updated_at = MAX(?5, updated_at) \
             WHERE id = ?1 RETURNING {TASK_COLUMNS}"
        );
        self.db
            .query_row(
                &sql,
                params![id, changes.title, changes.priority, changes.status, now],
                Self::row_to_raw,
            )
            .optional()
    }

    /// Remove a row, returning it as it was just before removal.
    pub fn delete(&self, id: TaskId) -> rusqlite::Result<Option<RawTask>> {
        let sql = format!("DELETE FROM task WHERE id = ?1 RETURNING {TASK_COLUMNS}");
        self.db.query_row(&sql, params![id], Self::row_to_raw).optional()
    }

    /// Rows matching the query's filter, in its order.
    pub fn list(&self, query: &ListQuery) -> rusqlite::Result<Vec<RawTask>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM task {} {}",
            query.where_sql(),
            query.order_sql()
        );
        let mut stmt = self.db.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_raw)?;
        rows.collect()
    }

    /// Total number of rows.
    pub fn count(&self) -> rusqlite::Result<usize> {
        let count: i64 = self
            .db
            .query_row("SELECT COUNT(*) FROM task", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.db
    }

    fn row_to_raw(row: &Row) -> rusqlite::Result<RawTask> {
        Ok(RawTask {
            id: row.get(0)?,
            title: row.get(1)?,
            priority: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}
