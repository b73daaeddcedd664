use crate::error::TaskError;
use crate::types::{NewTask, Task, TaskChanges, TaskFilter, TaskId, TaskStatus};

pub trait TaskRepository {
    fn create(&self, task: NewTask) -> Result<Task, TaskError>;
    fn get(&self, id: TaskId) -> Result<Option<Task>, TaskError>;
    /// Tasks matching `filter`, newest first.
    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError>;
    /// Applies `changes` and refreshes `updated_at`, even when `changes` is empty.
    fn update(&self, id: TaskId, changes: TaskChanges) -> Result<Task, TaskError>;
    fn delete(&self, id: TaskId) -> Result<(), TaskError>;
    /// Number of tasks, optionally restricted to one status.
    fn count(&self, status: Option<TaskStatus>) -> Result<u64, TaskError>;
}
