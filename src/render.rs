//! Table and JSON rendering of task collections.

use crate::types::Task;

/// Column labels, in display order.
pub const HEADERS: [&str; 6] = ["ID", "Title", "Priority", "Status", "Created at", "Updated at"];

/// How a listing is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Json,
}

type Cells = [String; 6];

fn cells(task: &Task) -> Cells {
    [
        task.id.to_string(),
        task.title.clone(),
        task.priority.name().to_string(),
        task.status.name().to_string(),
        task.created_at_display(),
        task.updated_at_display(),
    ]
}

/// Width of each column: the longest of its header and every cell, in chars.
fn column_widths(rows: &[Cells]) -> [usize; 6] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn border(widths: &[usize; 6], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    let mid = mid.to_string();
    format!("{left}{}{right}", segments.join(mid.as_str()))
}

fn line<S: AsRef<str>>(widths: &[usize; 6], values: &[S; 6]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .zip(values)
        .enumerate()
        .map(|(column, (&width, value))| {
            let value = value.as_ref();
            if column == 0 {
                format!("{value:^width$}")
            } else {
                format!("{value:<width$}")
            }
        })
        .collect();
    format!("│ {} │", padded.join(" │ "))
}

/// Bordered fixed-width table, one string per output line.
///
/// Widths are recomputed on every call; with no rows the header labels set
/// them.
pub fn render_table(tasks: &[Task]) -> Vec<String> {
    let rows: Vec<Cells> = tasks.iter().map(cells).collect();
    let widths = column_widths(&rows);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border(&widths, '┌', '┬', '┐'));
    lines.push(line(&widths, &HEADERS));
    lines.push(border(&widths, '├', '┼', '┤'));
    lines.extend(rows.iter().map(|row| line(&widths, row)));
    lines.push(border(&widths, '└', '┴', '┘'));
    lines
}

/// Pretty-printed JSON array (two-space indent). Empty input gives `[]`.
pub fn render_json(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tasks)
}

/// Pretty-printed JSON object for a single task.
pub fn render_task_json(task: &Task) -> serde_json::Result<String> {
    serde_json::to_string_pretty(task)
}
