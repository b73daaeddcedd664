use crate::CohortError;
use crate::tasks::TaskRepository;

pub trait Store {
    type Tasks<'a>: TaskRepository
    where
        Self: 'a;

    fn tasks(&self) -> Self::Tasks<'_>;

    /// Runs `f` in a transaction, committing on `Ok` and rolling back on `Err`.
    fn with_tx<F, T>(&self, f: F) -> Result<T, CohortError>
    where
        F: FnOnce(&Self) -> Result<T, CohortError>;
}
