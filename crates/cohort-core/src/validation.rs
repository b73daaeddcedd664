use crate::error::TaskError;
use crate::time::parse_timestamp;
use crate::types::{CreateTaskInput, NewTask, TaskChanges, UpdateTaskInput};
use chrono::{DateTime, Utc};

pub const MAX_TITLE_LEN: usize = 200;

pub fn validate_create(input: CreateTaskInput) -> Result<NewTask, TaskError> {
    let title = match input.title {
        Some(title) => validate_title(title)?,
        None => return Err(TaskError::invalid("Title is required")),
    };
    let due_date = match input.due_date.as_deref() {
        Some(value) => parse_due_date(value)?,
        None => None,
    };
    Ok(NewTask {
        title,
        description: input.description.unwrap_or_else(|| Some(String::new())),
        status: input.status.unwrap_or_default(),
        priority: input.priority.unwrap_or_default(),
        due_date,
    })
}

pub fn validate_update(input: UpdateTaskInput) -> Result<TaskChanges, TaskError> {
    let title = match input.title {
        Some(Some(title)) => Some(validate_title(title)?),
        Some(None) => return Err(TaskError::invalid("Title is required")),
        None => None,
    };
    let due_date = match input.due_date {
        Some(Some(value)) => Some(parse_due_date(&value)?),
        Some(None) => Some(None),
        None => None,
    };
    Ok(TaskChanges {
        title,
        description: input.description,
        status: input.status,
        priority: input.priority,
        due_date,
    })
}

/// Only the empty string is rejected; whitespace counts as a title.
fn validate_title(title: String) -> Result<String, TaskError> {
    if title.is_empty() {
        return Err(TaskError::invalid("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::invalid(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title)
}

/// An empty string clears the due date.
fn parse_due_date(value: &str) -> Result<Option<DateTime<Utc>>, TaskError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_timestamp(value)
        .map(Some)
        .map_err(|err| TaskError::invalid(err.to_string()))
}
