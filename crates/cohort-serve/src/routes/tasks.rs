use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{invalid_request, map_error};
use crate::{build_cohort, AppState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use cohort_core::error::{CohortError, TaskError};
use cohort_core::types::{CreateTaskInput, Task, TaskFilter, TaskId, TaskStats, UpdateTaskInput};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// `todo`, `in-progress` or `completed`.
    status: Option<String>,
    /// `low`, `medium` or `high`.
    priority: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/stats", get(task_stats))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

/// Non-numeric ids cannot name a task.
fn parse_task_id(id: &str) -> Result<TaskId, CohortError> {
    id.parse::<TaskId>()
        .map_err(|_| CohortError::Task(TaskError::NotFound))
}

#[utoipa::path(
    get,
    path = "/tasks",
    params(ListQuery),
    responses(
        (status = 200, body = Vec<Task>),
        (status = 400, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn list_tasks(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return invalid_request(rejection.body_text(), correlation.into_string()),
    };
    let filter = match TaskFilter::parse(query.status.as_deref(), query.priority.as_deref()) {
        Ok(filter) => filter,
        Err(err) => return map_error(&err.into(), Some(correlation.into_string())).into_response(),
    };
    let cohort = match build_cohort(&state) {
        Ok(cohort) => cohort,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    match cohort.tasks().list(&filter) {
        Ok(tasks) => Json(tasks).into_response(),
        Err(err) => map_error(&err, Some(correlation.into_string())).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskInput,
    responses(
        (status = 201, body = Task),
        (status = 400, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn create_task(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    payload: Result<Json<CreateTaskInput>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text(), correlation.into_string()),
    };
    let cohort = match build_cohort(&state) {
        Ok(cohort) => cohort,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    match cohort.tasks().create(input) {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => map_error(&err, Some(correlation.into_string())).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/tasks/stats",
    responses((status = 200, body = TaskStats))
)]
pub(crate) async fn task_stats(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    let cohort = match build_cohort(&state) {
        Ok(cohort) => cohort,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    match cohort.tasks().stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => map_error(&err, Some(correlation.into_string())).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, body = Task),
        (status = 404, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn get_task(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    let task_id = match parse_task_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    let cohort = match build_cohort(&state) {
        Ok(cohort) => cohort,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    match cohort.tasks().get(task_id) {
        Ok(task) => Json(task).into_response(),
        Err(err) => map_error(&err, Some(correlation.into_string())).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = UpdateTaskInput,
    responses(
        (status = 200, body = Task),
        (status = 400, body = crate::routes::error::ErrorEnvelope),
        (status = 404, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn update_task(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskInput>, JsonRejection>,
) -> Response {
    let task_id = match parse_task_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    let cohort = match build_cohort(&state) {
        Ok(cohort) => cohort,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    // An unknown id is a 404 whatever the body holds.
    if let Err(err) = cohort.tasks().get(task_id) {
        return map_error(&err, Some(correlation.into_string())).into_response();
    }
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text(), correlation.into_string()),
    };
    match cohort.tasks().update(task_id, input) {
        Ok(task) => Json(task).into_response(),
        Err(err) => map_error(&err, Some(correlation.into_string())).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, body = DeleteResponse),
        (status = 404, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn delete_task(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    let task_id = match parse_task_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    let cohort = match build_cohort(&state) {
        Ok(cohort) => cohort,
        Err(err) => return map_error(&err, Some(correlation.into_string())).into_response(),
    };
    match cohort.tasks().delete(task_id) {
        Ok(()) => Json(DeleteResponse {
            message: "Task deleted successfully".to_string(),
        })
        .into_response(),
        Err(err) => map_error(&err, Some(correlation.into_string())).into_response(),
    }
}
