//! End-to-end scenarios exercising the store and the statistics together,
//! the way the (out-of-crate) screens drive them.

use std::sync::Arc;

use chrono::NaiveDate;

use corkboard::stats;
use corkboard::stats::MonthRef;
use corkboard::storage::FileStorage;
use corkboard::storage::MemoryStorage;
use corkboard::traits::Storage;
use corkboard::{Priority, Task, TaskPatch, TaskStore, TASKS_KEY};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A collection as earlier versions of the tracker persisted it (note the DD-MM-YYYY dates)
const LEGACY_BLOB: &str = r#"[
    {"id":"1","title":"A","priority":"High","completed":false,"startDate":"01-03-2024","endDate":"02-03-2024"}
]"#;

#[tokio::test]
async fn progress_screen_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.set(TASKS_KEY, LEGACY_BLOB).await.unwrap();

    let store = TaskStore::new(storage);

    let mut added = Task::new_with_id(
        "2".to_string(),
        "B".to_string(),
        day(2024, 3, 5),
        day(2024, 3, 5),
        Priority::Low,
    ).unwrap();
    added.set_completed(true);
    store.add_task(added).await.unwrap();

    let tasks = store.get_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);

    store.complete_task("1").await.unwrap();

    let tasks = store.get_tasks().await.unwrap();
    println!("--- after completing task 1 ---");
    corkboard::utils::print_task_list(&tasks);
    corkboard::utils::print_stats(&tasks);

    let first = tasks.iter().find(|task| task.id() == "1").unwrap();
    assert!(first.completed());
    let second = tasks.iter().find(|task| task.id() == "2").unwrap();
    assert!(second.completed());
    assert_eq!(second.title(), "B");
    assert_eq!(second.priority(), Priority::Low);

    let (active, completed) = stats::partition_by_completion(tasks);
    assert!(active.is_empty());
    assert_eq!(completed.len(), 2);

    let breakdown = stats::count_by_priority(&completed);
    assert_eq!(breakdown.count(Priority::Low), 1);
    assert_eq!(breakdown.count(Priority::Medium), 0);
    assert_eq!(breakdown.count(Priority::High), 1);
    assert_eq!(breakdown.total(), completed.len());

    let march_2024: MonthRef = "03-2024".parse().unwrap();
    assert_eq!(stats::monthly_completed_count(&completed, march_2024), 2);
}

#[tokio::test]
async fn collection_survives_a_restart() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();

    {
        let store = TaskStore::new(FileStorage::new(dir.path()));
        let task = Task::new(
            "Persisted across restarts".to_string(),
            day(2024, 3, 1),
            day(2024, 3, 2),
            Priority::Medium,
        ).unwrap();
        store.add_task(task).await.unwrap();
    }

    // A fresh store over the same directory, as after an application restart
    let store = TaskStore::new(FileStorage::new(dir.path()));
    let tasks = store.get_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title(), "Persisted across restarts");
}

#[tokio::test]
async fn edit_flow_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    let task = Task::new(
        "Pack for the week-end".to_string(),
        day(2024, 3, 1),
        day(2024, 3, 2),
        Priority::Low,
    ).unwrap();
    let id = task.id().to_string();
    store.add_task(task).await.unwrap();

    // The edit screen reschedules the task and raises its priority
    let patch = TaskPatch {
        start_date: Some(day(2024, 3, 8)),
        end_date: Some(day(2024, 3, 9)),
        priority: Some(Priority::High),
        time: Some(Some("18:00".to_string())),
        ..TaskPatch::default()
    };
    store.update_task(&id, &patch).await.unwrap();

    let tasks = store.get_tasks().await.unwrap();
    assert_eq!(tasks[0].start_date(), day(2024, 3, 8));
    assert_eq!(tasks[0].end_date(), day(2024, 3, 9));
    assert_eq!(tasks[0].priority(), Priority::High);
    assert_eq!(tasks[0].time(), Some("18:00"));
    assert_eq!(tasks[0].completed(), false);

    store.delete_task(&id).await.unwrap();
    assert!(store.get_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_mutations_all_take_effect() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = Arc::new(TaskStore::new(MemoryStorage::new()));

    // Ten concurrent read-modify-write cycles. Without the in-process mutation lock,
    // some of these would read the same stale snapshot and overwrite each other.
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let task = Task::new_with_id(
                    format!("id-{}", i),
                    format!("Task {}", i),
                    day(2024, 3, 1),
                    day(2024, 3, 2),
                    Priority::Medium,
                ).unwrap();
                store.add_task(task).await.unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.get_tasks().await.unwrap().len(), 10);
}

#[tokio::test]
async fn racing_delete_and_complete_converge() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    let task = Task::new_with_id(
        "1".to_string(),
        "Contended".to_string(),
        day(2024, 3, 1),
        day(2024, 3, 2),
        Priority::Low,
    ).unwrap();
    store.add_task(task).await.unwrap();

    // Both mutations run to completion, one after the other: whichever acquires the
    // lock second sees the first one's effect instead of a stale snapshot. Either
    // ordering ends with the task gone.
    let (deleted, completed) = tokio::join!(store.delete_task("1"), store.complete_task("1"));
    deleted.unwrap();
    completed.unwrap();

    assert!(store.get_tasks().await.unwrap().is_empty());
}
