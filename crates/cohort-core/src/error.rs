use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,
    #[error("{message}")]
    InvalidInput { message: String },
}

impl TaskError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CohortError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
