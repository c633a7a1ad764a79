//! Integration tests for the task store over SQLite storage.

use chrono::NaiveDate;
use trifocus_core::error::PersistenceOp;
use trifocus_core::priority::{order, ViewFilter};
use trifocus_core::storage::{Database, MemoryStorage, TaskStorage};
use trifocus_core::task::{Effort, JobContext, NewTask, Priority};
use trifocus_core::{TaskStore, ValidationError};

const KEY: &str = "trifocus_tasks";

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn collection_survives_reload_field_for_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trifocus.db");

    let saved = {
        let mut store = TaskStore::load(Database::open_at(&path).unwrap().record(KEY));
        store
            .add(
                NewTask::new("Record gratitude video", JobContext::SomosUm, date("2025-06-01"))
                    .with_priority(Priority::High)
                    .with_effort(Effort::Hard)
                    .with_description("Two takes, vertical format"),
            )
            .unwrap();
        store
            .add(NewTask::new("Grade quizzes", JobContext::Ipe, date("2025-05-20")))
            .unwrap();
        let id = store.tasks()[1].id.clone();
        let update = store.toggle_completed(&id);
        assert!(update.warning.is_none());
        update.tasks
    };

    let reloaded = TaskStore::load(Database::open_at(&path).unwrap().record(KEY));
    assert!(reloaded.load_warning().is_none());
    assert_eq!(reloaded.tasks(), saved.as_slice());
}

#[test]
fn toggle_of_unknown_id_leaves_record_byte_for_byte() {
    let mut store = TaskStore::load(Database::open_memory().unwrap().record(KEY));
    store
        .add(NewTask::new("Camp checklist", JobContext::VibeTeen, date("2025-07-10")))
        .unwrap();
    let before = store.storage().read().unwrap();
    let tasks_before = store.tasks().to_vec();

    store.toggle_completed("does-not-exist");

    assert_eq!(store.storage().read().unwrap(), before);
    assert_eq!(store.tasks(), tasks_before.as_slice());
}

#[test]
fn corrupt_record_loads_as_empty_collection() {
    let db = Database::open_memory().unwrap();
    db.kv_set(KEY, "[{\"id\": 1, \"title\": ").unwrap();

    let mut store = TaskStore::load(db.record(KEY));
    assert!(store.tasks().is_empty());
    assert_eq!(store.load_warning().unwrap().op, PersistenceOp::Decode);

    // The store stays usable and overwrites the bad record.
    store
        .add(NewTask::new("Fresh start", JobContext::Ipe, date("2025-01-01")))
        .unwrap();
    let reloaded = TaskStore::load(MemoryStorage::with_document(
        store.storage().read().unwrap().unwrap(),
    ));
    assert_eq!(reloaded.tasks().len(), 1);
}

#[test]
fn invalid_enum_value_in_record_loads_as_empty_collection() {
    let document = r#"[{"id":"a","title":"x","job":"Freelance","deadline":"2025-01-01",
        "priority":"Alta","effort":"Fácil","completed":false,"createdAt":0}]"#;
    let store = TaskStore::load(MemoryStorage::with_document(document));
    assert!(store.tasks().is_empty());
    assert!(store.load_warning().is_some());
}

#[test]
fn empty_title_leaves_collection_length_unchanged() {
    let mut store = TaskStore::load(MemoryStorage::new());
    store
        .add(NewTask::new("Lesson 4", JobContext::Ipe, date("2025-02-01")))
        .unwrap();

    let result = store.add(NewTask::new("", JobContext::Ipe, date("2025-02-01")));
    assert_eq!(result.unwrap_err(), ValidationError::EmptyTitle);
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn failed_writes_never_roll_back() {
    let mut store = TaskStore::load(MemoryStorage::new().failing_writes());
    let update = store
        .add(NewTask::new("Edit reel", JobContext::SomosUm, date("2025-03-03")))
        .unwrap();
    assert_eq!(update.warning.unwrap().op, PersistenceOp::Write);

    let id = store.tasks()[0].id.clone();
    let update = store.delete(&id);
    assert!(update.warning.is_some());
    assert!(store.tasks().is_empty());
}

#[test]
fn store_feeds_engine_view() {
    let mut store = TaskStore::load(MemoryStorage::new());
    for (title, job, deadline, priority, effort) in [
        ("Easy low", JobContext::SomosUm, "2025-06-01", Priority::Low, Effort::Easy),
        ("Hard high", JobContext::VibeTeen, "2025-06-01", Priority::High, Effort::Hard),
        ("Medium high", JobContext::SomosUm, "2025-05-01", Priority::High, Effort::Medium),
    ] {
        store
            .add(
                NewTask::new(title, job, date(deadline))
                    .with_priority(priority)
                    .with_effort(effort),
            )
            .unwrap();
    }

    let titles: Vec<&str> = order(store.tasks(), ViewFilter::All)
        .into_iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, ["Medium high", "Hard high", "Easy low"]);

    let somos: Vec<&str> = order(store.tasks(), ViewFilter::Job(JobContext::SomosUm))
        .into_iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(somos, ["Medium high", "Easy low"]);
}
