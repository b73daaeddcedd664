use crate::correlation_id_from_request;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cohort_core::error::{CohortError, TaskError};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: String,
    #[schema(value_type = String)]
    pub code: &'static str,
    pub correlation_id: Option<String>,
}

pub fn map_error(
    err: &CohortError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code, message) = match err {
        CohortError::Task(task) => map_task_error(task),
        CohortError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message.clone(),
        ),
    };
    if status.is_server_error() {
        tracing::error!(code, error = %message, "request failed");
    } else {
        tracing::warn!(code, error = %message, "request rejected");
    }

    (
        status,
        Json(ErrorEnvelope {
            error: message,
            code,
            correlation_id,
        }),
    )
}

fn map_task_error(err: &TaskError) -> (StatusCode, &'static str, String) {
    match err {
        TaskError::NotFound => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
        TaskError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
    }
}

/// Renders an extractor rejection (bad JSON body, bad query string) as a 400.
pub fn invalid_request(message: impl Into<String>, correlation_id: String) -> Response {
    let err = CohortError::Task(TaskError::invalid(message));
    map_error(&err, Some(correlation_id)).into_response()
}

pub async fn not_found(request: Request<Body>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope {
            error: "Resource not found".to_string(),
            code: "not_found",
            correlation_id: correlation_id_from_request(&request),
        }),
    )
        .into_response()
}
