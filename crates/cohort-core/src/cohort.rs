use crate::error::{CohortError, TaskError};
use crate::store::Store;
use crate::tasks::TaskRepository;
use crate::types::{CreateTaskInput, Task, TaskFilter, TaskId, TaskStats, TaskStatus, UpdateTaskInput};
use crate::validation::{validate_create, validate_update};

pub struct Cohort<S: Store> {
    store: S,
}

impl<S: Store> Cohort<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn tasks(&self) -> TasksApi<'_, S> {
        TasksApi { core: self }
    }
}

pub struct TasksApi<'a, S: Store> {
    core: &'a Cohort<S>,
}

impl<S: Store> TasksApi<'_, S> {
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, CohortError> {
        self.core
            .store
            .tasks()
            .list(filter)
            .map_err(CohortError::from)
    }

    pub fn get(&self, id: TaskId) -> Result<Task, CohortError> {
        self.core
            .store
            .tasks()
            .get(id)?
            .ok_or(CohortError::Task(TaskError::NotFound))
    }

    pub fn create(&self, input: CreateTaskInput) -> Result<Task, CohortError> {
        let new_task = validate_create(input)?;
        let task = self
            .core
            .store
            .with_tx(|store| Ok(store.tasks().create(new_task)?))?;
        tracing::info!(task_id = %task.id, status = %task.status, "task created");
        Ok(task)
    }

    pub fn update(&self, id: TaskId, input: UpdateTaskInput) -> Result<Task, CohortError> {
        let changes = validate_update(input)?;
        let task = self
            .core
            .store
            .with_tx(|store| Ok(store.tasks().update(id, changes)?))?;
        tracing::info!(task_id = %task.id, "task updated");
        Ok(task)
    }

    pub fn delete(&self, id: TaskId) -> Result<(), CohortError> {
        self.core
            .store
            .with_tx(|store| Ok(store.tasks().delete(id)?))?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    pub fn stats(&self) -> Result<TaskStats, CohortError> {
        let tasks = self.core.store.tasks();
        Ok(TaskStats {
            total: tasks.count(None)?,
            todo: tasks.count(Some(TaskStatus::Todo))?,
            in_progress: tasks.count(Some(TaskStatus::InProgress))?,
            completed: tasks.count(Some(TaskStatus::Completed))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewTask, Priority, TaskChanges};
    use chrono::Utc;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        tasks: RefCell<Vec<Task>>,
        next_id: RefCell<i64>,
        fail_writes: bool,
    }

    struct MemoryTasks<'a> {
        store: &'a MemoryStore,
    }

    impl TaskRepository for MemoryTasks<'_> {
        fn create(&self, task: NewTask) -> Result<Task, TaskError> {
            if self.store.fail_writes {
                return Err(TaskError::invalid("disk I/O error"));
            }
            let mut next_id = self.store.next_id.borrow_mut();
            *next_id += 1;
            let now = Utc::now();
            let task = Task {
                id: TaskId::new(*next_id),
                title: task.title,
                description: task.description,
                status: task.status,
                priority: task.priority,
                due_date: task.due_date,
                created_at: now,
                updated_at: now,
            };
            self.store.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        fn get(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
            Ok(self.store.tasks.borrow().iter().find(|t| t.id == id).cloned())
        }

        fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
            let mut tasks: Vec<Task> = self
                .store
                .tasks
                .borrow()
                .iter()
                .filter(|t| filter.matches(t.status, t.priority))
                .cloned()
                .collect();
            tasks.reverse();
            Ok(tasks)
        }

        fn update(&self, id: TaskId, changes: TaskChanges) -> Result<Task, TaskError> {
            let mut tasks = self.store.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(TaskError::NotFound)?;
            if let Some(status) = changes.status {
                task.status = status;
            }
            task.updated_at = Utc::now();
            Ok(task.clone())
        }

        fn delete(&self, id: TaskId) -> Result<(), TaskError> {
            let mut tasks = self.store.tasks.borrow_mut();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(TaskError::NotFound);
            }
            Ok(())
        }

        fn count(&self, status: Option<TaskStatus>) -> Result<u64, TaskError> {
            let tasks = self.store.tasks.borrow();
            let count = tasks
                .iter()
                .filter(|t| status.is_none_or(|s| s == t.status))
                .count();
            Ok(count as u64)
        }
    }

    impl Store for MemoryStore {
        type Tasks<'a>
            = MemoryTasks<'a>
        where
            Self: 'a;

        fn tasks(&self) -> Self::Tasks<'_> {
            MemoryTasks { store: self }
        }

        fn with_tx<F, T>(&self, f: F) -> Result<T, CohortError>
        where
            F: FnOnce(&Self) -> Result<T, CohortError>,
        {
            let snapshot = self.tasks.borrow().clone();
            let result = f(self);
            if result.is_err() {
                *self.tasks.borrow_mut() = snapshot;
            }
            result
        }
    }

    fn create(cohort: &Cohort<MemoryStore>, title: &str, status: TaskStatus) -> Task {
        cohort
            .tasks()
            .create(CreateTaskInput {
                title: Some(title.to_string()),
                status: Some(status),
                ..CreateTaskInput::default()
            })
            .unwrap()
    }

    #[test]
    fn get_missing_task_is_not_found() {
        let cohort = Cohort::new(MemoryStore::default());
        let err = cohort.tasks().get(TaskId::new(7)).unwrap_err();
        assert!(matches!(err, CohortError::Task(TaskError::NotFound)));
    }

    #[test]
    fn create_validates_before_touching_store() {
        let cohort = Cohort::new(MemoryStore::default());
        let err = cohort
            .tasks()
            .create(CreateTaskInput::default())
            .unwrap_err();
        assert!(matches!(err, CohortError::Task(TaskError::InvalidInput { .. })));
        assert_eq!(cohort.tasks().stats().unwrap().total, 0);
    }

    #[test]
    fn write_failures_surface_as_invalid_input() {
        let cohort = Cohort::new(MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        });
        let err = cohort
            .tasks()
            .create(CreateTaskInput {
                title: Some("Doomed".to_string()),
                ..CreateTaskInput::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "disk I/O error");
    }

    #[test]
    fn stats_count_each_status() {
        let cohort = Cohort::new(MemoryStore::default());
        create(&cohort, "a", TaskStatus::Todo);
        create(&cohort, "b", TaskStatus::Todo);
        create(&cohort, "c", TaskStatus::InProgress);
        create(&cohort, "d", TaskStatus::Completed);
        create(&cohort, "e", TaskStatus::Completed);
        create(&cohort, "f", TaskStatus::Completed);

        let stats = cohort.tasks().stats().unwrap();
        assert_eq!(
            stats,
            TaskStats {
                total: 6,
                todo: 2,
                in_progress: 1,
                completed: 3,
            }
        );
        assert_eq!(stats.total, stats.todo + stats.in_progress + stats.completed);
    }

    #[test]
    fn list_passes_filter_through() {
        let cohort = Cohort::new(MemoryStore::default());
        create(&cohort, "a", TaskStatus::Todo);
        create(&cohort, "b", TaskStatus::Completed);
        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            priority: Some(Priority::Medium),
        };
        let tasks = cohort.tasks().list(&filter).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "b");
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let cohort = Cohort::new(MemoryStore::default());
        let task = create(&cohort, "a", TaskStatus::Todo);
        cohort.tasks().delete(task.id).unwrap();
        assert!(matches!(
            cohort.tasks().get(task.id),
            Err(CohortError::Task(TaskError::NotFound))
        ));
        assert!(matches!(
            cohort.tasks().delete(task.id),
            Err(CohortError::Task(TaskError::NotFound))
        ));
    }
}
