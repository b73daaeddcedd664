use crate::util::{decode_enum, from_rfc3339, to_rfc3339};
use cohort_core::error::TaskError;
use cohort_core::tasks::TaskRepository;
use cohort_core::types::{NewTask, Task, TaskChanges, TaskFilter, TaskId, TaskStatus};
use rusqlite::{params_from_iter, Connection};

const COLUMNS: &str = "id, title, description, status, priority, due_date, created_at, updated_at";

pub struct TaskRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> TaskRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for TaskRepo<'_> {
    fn create(&self, input: NewTask) -> Result<Task, TaskError> {
        let now = chrono::Utc::now();
        let sql = "INSERT INTO tasks (title, description, status, priority, due_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
        let params = (
            input.title.as_str(),
            input.description.as_deref(),
            input.status.as_str(),
            input.priority.as_str(),
            input.due_date.as_ref().map(to_rfc3339),
            to_rfc3339(&now),
            to_rfc3339(&now),
        );
        self.conn.execute(sql, params).map_err(db_err)?;

        Ok(Task {
            id: TaskId::new(self.conn.last_insert_rowid()),
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        })
    }

    fn get(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1"))
            .map_err(db_err)?;
        let mut rows = stmt.query([id.get()]).map_err(db_err)?;
        let Some(row) = rows.next().map_err(db_err)? else {
            return Ok(None);
        };
        map_task_row(row).map(Some)
    }

    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        let mut clauses = Vec::new();
        let mut values = Vec::new();
        if let Some(status) = filter.status {
            clauses.push("status = ?");
            values.push(status.as_str());
        }
        if let Some(priority) = filter.priority {
            clauses.push("priority = ?");
            values.push(priority.as_str());
        }
        let mut sql = format!("SELECT {COLUMNS} FROM tasks");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql).map_err(db_err)?;
        let mut rows = stmt.query(params_from_iter(values)).map_err(db_err)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().map_err(db_err)? {
            tasks.push(map_task_row(row)?);
        }
        Ok(tasks)
    }

    fn update(&self, id: TaskId, changes: TaskChanges) -> Result<Task, TaskError> {
        let mut task = self.get(id)?.ok_or(TaskError::NotFound)?;
        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = due_date;
        }
        task.updated_at = chrono::Utc::now();

        let sql = "UPDATE tasks SET title = ?1, description = ?2, status = ?3, priority = ?4, due_date = ?5, updated_at = ?6 WHERE id = ?7";
        let params = (
            task.title.as_str(),
            task.description.as_deref(),
            task.status.as_str(),
            task.priority.as_str(),
            task.due_date.as_ref().map(to_rfc3339),
            to_rfc3339(&task.updated_at),
            task.id.get(),
        );
        self.conn.execute(sql, params).map_err(db_err)?;

        Ok(task)
    }

    fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", [id.get()])
            .map_err(db_err)?;
        if affected == 0 {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }

    fn count(&self, status: Option<TaskStatus>) -> Result<u64, TaskError> {
        let count: i64 = match status {
            Some(status) => self.conn.query_row(
                "SELECT COUNT(*) FROM tasks WHERE status = ?1",
                [status.as_str()],
                |row| row.get::<_, i64>(0),
            ),
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get::<_, i64>(0)),
        }
        .map_err(db_err)?;
        u64::try_from(count).map_err(db_err)
    }
}

fn db_err(err: impl ToString) -> TaskError {
    TaskError::invalid(err.to_string())
}

fn map_task_row(row: &rusqlite::Row<'_>) -> Result<Task, TaskError> {
    let id: i64 = row.get(0).map_err(db_err)?;
    let title: String = row.get(1).map_err(db_err)?;
    let description: Option<String> = row.get(2).map_err(db_err)?;
    let status: String = row.get(3).map_err(db_err)?;
    let priority: String = row.get(4).map_err(db_err)?;
    let due_date: Option<String> = row.get(5).map_err(db_err)?;
    let created_at: String = row.get(6).map_err(db_err)?;
    let updated_at: String = row.get(7).map_err(db_err)?;

    Ok(Task {
        id: TaskId::new(id),
        title,
        description,
        status: decode_enum(&status).map_err(db_err)?,
        priority: decode_enum(&priority).map_err(db_err)?,
        due_date: due_date
            .map(|value| from_rfc3339(&value))
            .transpose()
            .map_err(db_err)?,
        created_at: from_rfc3339(&created_at).map_err(db_err)?,
        updated_at: from_rfc3339(&updated_at).map_err(db_err)?,
    })
}
