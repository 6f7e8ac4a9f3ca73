//! Integration tests for the task store.
//!
//! Covers identity, lifecycle transitions, and listing order.

mod common;

use common::TestEnv;
use todo::{ListQuery, Priority, SortKey, Status, StoreError, TaskUpdate};

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_insert_then_fetch_is_same_task() {
    let mut env = TestEnv::new();

    let inserted = env.add("Buy milk");
    let fetched = env.store.fetch(inserted.id).unwrap().unwrap();

    assert_eq!(fetched, inserted);
    assert_eq!(fetched.created_at, fetched.updated_at);
    assert_eq!(fetched.priority, Priority::Low);
    assert_eq!(fetched.status, Status::Pending);
}

#[test]
fn test_ids_increase_and_survive_reopen() {
    let mut env = TestEnv::new();
    let first = env.add("One");
    let second = env.add("Two");
    assert!(second.id > first.id);

    let path = env.temp_dir.path().join("todo.sqlite3");
    drop(env.store);
    let store = todo::Store::open(&path).unwrap();
    assert_eq!(store.fetch(second.id).unwrap().unwrap().title, "Two");
}

#[test]
fn test_deleted_id_not_reused() {
    let mut env = TestEnv::new();
    let first = env.add("First");
    env.store.delete(first.id).unwrap();

    let next = env.add("Second");
    assert_ne!(next.id, first.id);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_complete_then_reopen() {
    let mut env = TestEnv::new();
    let task = env.add("Write report");

    let completed = env.store.update(task.id, &TaskUpdate::status(Status::Completed)).unwrap();
    assert_eq!(completed.status, Status::Completed);
    assert!(completed.updated_at >= task.updated_at);

    let reopened = env.store.update(task.id, &TaskUpdate::status(Status::Pending)).unwrap();
    assert_eq!(reopened.status, Status::Pending);
    assert!(reopened.updated_at >= completed.updated_at);
}

#[test]
fn test_reopen_then_complete() {
    let mut env = TestEnv::new();
    let task = env.add("Write report");

    let reopened = env.store.update(task.id, &TaskUpdate::status(Status::Pending)).unwrap();
    let completed = env.store.update(task.id, &TaskUpdate::status(Status::Completed)).unwrap();

    assert_eq!(completed.status, Status::Completed);
    assert!(completed.updated_at >= reopened.updated_at);
    assert_eq!(completed.created_at, task.created_at);
}

#[test]
fn test_any_status_reachable_from_any_status() {
    let mut env = TestEnv::new();
    let task = env.add("Wander");

    for from in Status::ALL {
        for to in Status::ALL {
            env.store.update(task.id, &TaskUpdate::status(from)).unwrap();
            let moved = env.store.update(task.id, &TaskUpdate::status(to)).unwrap();
            assert_eq!(moved.status, to, "{} -> {}", from, to);
        }
    }
}

#[test]
fn test_delete_missing_leaves_count_unchanged() {
    let mut env = TestEnv::new();
    env.add("Keep");
    env.add("Also keep");

    let result = env.store.delete(12345);
    assert!(matches!(result, Err(StoreError::NotFound(12345))));
    assert_eq!(env.total_count(), 2);
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_default_view_hides_completed() {
    let mut env = TestEnv::new();
    let done = env.add("Done already");
    env.add("Still open");
    env.store.update(done.id, &TaskUpdate::status(Status::Completed)).unwrap();

    let view = env.default_view();
    assert_eq!(view.len(), 1);
    assert!(view.iter().all(|t| t.status != Status::Completed));

    let all = env.everything();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|t| t.id == done.id));
}

#[test]
fn test_priority_view_high_first() {
    let mut env = TestEnv::new();
    env.add_with_priority("High", Priority::High);
    env.add_with_priority("Medium", Priority::Medium);
    env.add_with_priority("Low", Priority::Low);

    let priorities: Vec<Priority> = env.default_view().iter().map(|t| t.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);

    let reversed: Vec<Priority> = env
        .store
        .list(&ListQuery::new().reverse(true))
        .unwrap()
        .iter()
        .map(|t| t.priority)
        .collect();
    assert_eq!(reversed, vec![Priority::Low, Priority::Medium, Priority::High]);
}

#[test]
fn test_completed_sorts_after_open_at_same_priority() {
    let mut env = TestEnv::new();
    let done = env.add_with_priority("High but done", Priority::High);
    let open = env.add_with_priority("High and open", Priority::High);
    env.store.update(done.id, &TaskUpdate::status(Status::Completed)).unwrap();

    let ids: Vec<i64> = env.everything().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![open.id, done.id]);
}

#[test]
fn test_sort_by_id() {
    let mut env = TestEnv::new();
    let a = env.add_with_priority("a", Priority::High);
    let b = env.add_with_priority("b", Priority::Low);
    let c = env.add_with_priority("c", Priority::Medium);

    let query = ListQuery::new().sort_by(SortKey::Id);
    let ids: Vec<i64> = env.store.list(&query).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);

    let ids: Vec<i64> = env
        .store
        .list(&query.reverse(true))
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[test]
fn test_sort_by_status() {
    let mut env = TestEnv::new();
    let active = env.add("Active");
    let pending = env.add("Pending");
    env.store.update(active.id, &TaskUpdate::status(Status::Active)).unwrap();

    let query = ListQuery::new().sort_by(SortKey::Status);
    let ids: Vec<i64> = env.store.list(&query).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![pending.id, active.id]);
}

#[test]
fn test_sort_by_created_at() {
    let mut env = TestEnv::new();
    let first = env.add("First");
    let second = env.add("Second");

    let query = ListQuery::new().sort_by(SortKey::CreatedAt);
    let ids: Vec<i64> = env.store.list(&query).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn test_list_does_not_mutate() {
    let mut env = TestEnv::new();
    let task = env.add("Stable");

    env.default_view();
    env.everything();

    assert_eq!(env.store.fetch(task.id).unwrap().unwrap(), task);
    assert_eq!(env.total_count(), 1);
}
