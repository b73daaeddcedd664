use crate::types::enums::{Priority, TaskStatus};
use crate::error::TaskError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Body of `POST /tasks`. Every field is optional on the wire so that a missing
/// title is reported as a validation failure rather than a decode failure.
///
/// `description` keeps an explicit `null` apart from an absent key: the first
/// stores null, the second stores an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskInput {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    /// ISO-8601 timestamp or date.
    pub due_date: Option<String>,
}

/// Body of `PUT /tasks/{id}`.
///
/// The outer `Option` records whether a key was present at all; the inner one
/// whether it was `null`. Absent keys leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskInput {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub due_date: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A validated task ready to be stored, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

/// A validated partial update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Builds a filter from raw query values. Empty values mean "no filter".
    pub fn parse(status: Option<&str>, priority: Option<&str>) -> Result<Self, TaskError> {
        let status = status
            .filter(|value| !value.is_empty())
            .map(str::parse::<TaskStatus>)
            .transpose()
            .map_err(|err| TaskError::invalid(err.to_string()))?;
        let priority = priority
            .filter(|value| !value.is_empty())
            .map(str::parse::<Priority>)
            .transpose()
            .map_err(|err| TaskError::invalid(err.to_string()))?;
        Ok(Self { status, priority })
    }

    pub fn matches(&self, status: TaskStatus, priority: Priority) -> bool {
        self.status.is_none_or(|wanted| wanted == status)
            && self.priority.is_none_or(|wanted| wanted == priority)
    }
}
