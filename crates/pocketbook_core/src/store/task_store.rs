//! Task-specific store operations.

use super::{JsonRecordStore, StoreResult};
use crate::model::task::{NewTask, Task, TaskFilter, TaskPatch};
use crate::model::RecordId;
use log::info;

/// Store over `todo.json`.
pub type TaskStore = JsonRecordStore<Task>;

impl TaskStore {
    /// Validates and appends a task with `completed = false`.
    pub fn add(&mut self, input: NewTask) -> StoreResult<Task> {
        input.validate()?;
        let task = input.into_task(self.next_id()?, self.now());
        self.insert(task)
    }

    /// Tasks accepted by `filter`, in insertion order.
    pub fn list_tasks(&self, filter: TaskFilter) -> Vec<&Task> {
        self.list_where(|task| filter.accepts(task))
    }

    pub fn update(&mut self, id: RecordId, patch: TaskPatch) -> StoreResult<Task> {
        let updated = self.modify(id, |task| patch.apply_to(task))?;
        info!("event=record_update module=store status=ok kind=task id={id}");
        Ok(updated)
    }

    /// Marks a task completed. Completing twice is not an error.
    pub fn complete(&mut self, id: RecordId) -> StoreResult<Task> {
        let updated = self.modify(id, |task| task.completed = true)?;
        info!("event=task_complete module=store status=ok id={id}");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::task::{NewTask, TaskFilter};
    use crate::store::{StoreError, TaskStore};

    #[test]
    fn complete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();
        store.add(NewTask::new("stretch")).unwrap();

        assert!(store.complete(1).unwrap().completed);
        assert!(store.complete(1).unwrap().completed);
        assert_eq!(store.list_tasks(TaskFilter::Completed).len(), 1);
    }

    #[test]
    fn complete_missing_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();

        let err = store.complete(3).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "task", id: 3 }));
    }
}
