use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

#[utoipa::path(get, path = "/", responses((status = 200, description = "Service banner")))]
pub(crate) async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Task Tracker API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /tasks": "Get all tasks",
            "POST /tasks": "Create a new task",
            "GET /tasks/stats": "Get task counts by status",
            "GET /tasks/{id}": "Get a specific task",
            "PUT /tasks/{id}": "Update a task",
            "DELETE /tasks/{id}": "Delete a task",
            "GET /health": "Health check",
            "GET /openapi.json": "OpenAPI document",
        }
    }))
}

#[utoipa::path(get, path = "/health", responses((status = 200, body = HealthStatus)))]
pub(crate) async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
