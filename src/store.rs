//! The single durable-write boundary for the task collection

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::task::{Task, TaskPatch};
use crate::traits::Storage;

/// The key the task collection is stored under
pub const TASKS_KEY: &str = "tasks";

/// The single source of truth for the task collection.
///
/// All tasks live under one logical key of the underlying [`Storage`], as one JSON array.
/// Every mutation is a full read-modify-write cycle over that array; there are no partial
/// or indexed updates.
///
/// Mutations are serialized through an in-process lock: at most one read-modify-write
/// sequence is in flight at a time, so two interleaved mutations can never clobber each
/// other by writing back a stale snapshot. Reads take their own point-in-time snapshot
/// and never block behind mutations.
pub struct TaskStore<S: Storage> {
    storage: S,

    /// Held across every read-modify-write sequence
    mutation_lock: Mutex<()>,
}

impl<S: Storage> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            mutation_lock: Mutex::new(()),
        }
    }

    /// The underlying substrate
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a snapshot of the task collection, in persisted order.
    ///
    /// An absent or unparseable blob yields an empty collection, and individual records
    /// that fail shape validation are dropped (both are logged, neither is an error).
    /// Only a failure of the substrate itself is reported as `Err`.
    pub async fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.read_collection().await
    }

    /// Serializes and writes `tasks` as the new collection, replacing any prior value.
    pub async fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let _guard = self.mutation_lock.lock().await;
        self.write_collection(tasks).await
    }

    /// Adds `task` to the end of the collection.
    ///
    /// Ids stay unique: in case a task with the same id is already stored, it is replaced
    /// in place instead of a duplicate being appended.
    pub async fn add_task(&self, task: Task) -> Result<(), StoreError> {
        let _guard = self.mutation_lock.lock().await;

        let mut tasks = self.read_collection().await?;
        match tasks.iter_mut().find(|stored| stored.id() == task.id()) {
            Some(stored) => {
                log::warn!("A task with id {} is already stored, replacing it", task.id());
                *stored = task;
            },
            None => tasks.push(task),
        }
        self.write_collection(&tasks).await
    }

    /// Removes the task with this id. Unknown ids are a no-op, not an error.
    pub async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.mutation_lock.lock().await;

        let mut tasks = self.read_collection().await?;
        let len_before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == len_before {
            log::debug!("No task {} to delete", id);
            return Ok(());
        }
        self.write_collection(&tasks).await
    }

    /// Marks the task with this id as completed. Idempotent; unknown ids are a no-op.
    pub async fn complete_task(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.mutation_lock.lock().await;

        let mut tasks = self.read_collection().await?;
        match tasks.iter_mut().find(|task| task.id() == id) {
            Some(task) => {
                task.set_completed(true);
                log::debug!("Task {} marked as completed", id);
            },
            None => {
                log::debug!("No task {} to complete", id);
                return Ok(());
            },
        }
        self.write_collection(&tasks).await
    }

    /// Applies `patch` to the task with this id.
    ///
    /// The patched task is validated before anything is written: a validation failure
    /// returns `Err` and leaves the stored collection untouched. Unknown ids are a no-op.
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<(), StoreError> {
        let _guard = self.mutation_lock.lock().await;

        let mut tasks = self.read_collection().await?;
        match tasks.iter_mut().find(|task| task.id() == id) {
            Some(task) => task.apply_patch(patch)?,
            None => {
                log::debug!("No task {} to update", id);
                return Ok(());
            },
        }
        self.write_collection(&tasks).await
    }

    /// Does not take the mutation lock: mutation paths call this while already holding it.
    async fn read_collection(&self) -> Result<Vec<Task>, StoreError> {
        match self.storage.get(TASKS_KEY).await? {
            None => Ok(Vec::new()),
            Some(blob) => Ok(decode_tasks(&blob)),
        }
    }

    async fn write_collection(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(tasks)?;
        self.storage.set(TASKS_KEY, &blob).await?;
        Ok(())
    }
}

/// Decodes the stored blob, keeping the well-formed records and dropping the rest.
fn decode_tasks(blob: &str) -> Vec<Task> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(records) => records,
        Err(err) => {
            log::warn!("Unable to parse the stored task collection, starting from an empty one: {}", err);
            return Vec::new();
        },
    };

    records.into_iter()
        .filter_map(|record| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(err) => {
                log::warn!("Dropping a malformed task record: {}", err);
                None
            },
        })
        .collect()
}
