use cohort_core::error::{CohortError, TaskError};
use cohort_core::store::Store;
use rusqlite::Connection;

use crate::task_repo::TaskRepo;

pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Store for DbStore {
    type Tasks<'a>
        = TaskRepo<'a>
    where
        Self: 'a;

    fn tasks(&self) -> Self::Tasks<'_> {
        TaskRepo::new(&self.conn)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, CohortError>
    where
        F: FnOnce(&Self) -> Result<T, CohortError>,
    {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|err| CohortError::Task(TaskError::invalid(err.to_string())))?;
        let result = f(self);
        match result {
            Ok(value) => {
                self.conn
                    .execute_batch("COMMIT")
                    .map_err(|err| CohortError::Task(TaskError::invalid(err.to_string())))?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, "rolling back transaction");
                self.conn
                    .execute_batch("ROLLBACK")
                    .map_err(|rollback_err| {
                        CohortError::Task(TaskError::invalid(rollback_err.to_string()))
                    })?;
                Err(err)
            }
        }
    }
}
