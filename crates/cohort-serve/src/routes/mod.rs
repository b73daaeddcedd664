pub mod error;
pub mod meta;
pub mod tasks;

use crate::middleware::correlation::correlation_middleware;
use crate::middleware::panic::panic_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(meta::router())
        .merge(tasks::router(state))
        .merge(openapi::router())
        .fallback(error::not_found);

    with_layers(api)
}

fn with_layers(router: Router) -> Router {
    router
        .layer(middleware::from_fn(panic_middleware))
        .layer(middleware::from_fn(correlation_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
