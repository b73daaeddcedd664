use crate::correlation_id_from_request;
use crate::routes::error::ErrorEnvelope;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// Turns a panicking handler into a 500 JSON response.
pub async fn panic_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let correlation_id = correlation_id_from_request(&request);

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            tracing::error!(
                %method,
                %uri,
                correlation_id = correlation_id.as_deref().unwrap_or_default(),
                panic = %panic_message(payload.as_ref()),
                "request handler panicked"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope {
                    error: "Internal server error".to_string(),
                    code: "internal_error",
                    correlation_id,
                }),
            )
                .into_response()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
