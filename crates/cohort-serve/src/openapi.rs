use crate::routes::error::ErrorEnvelope;
use crate::routes::meta::HealthStatus;
use crate::routes::tasks::{DeleteResponse, ListQuery};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cohort_core::types::{
    CreateTaskInput, Priority, Task, TaskId, TaskStats, TaskStatus, UpdateTaskInput,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Cohort task API"),
    paths(
        crate::routes::meta::index,
        crate::routes::meta::health,
        crate::routes::tasks::list_tasks,
        crate::routes::tasks::create_task,
        crate::routes::tasks::task_stats,
        crate::routes::tasks::get_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::delete_task,
    ),
    components(schemas(
        Task,
        TaskStats,
        CreateTaskInput,
        UpdateTaskInput,
        ListQuery,
        DeleteResponse,
        HealthStatus,
        ErrorEnvelope,
        TaskId,
        TaskStatus,
        Priority
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
