pub mod config;
pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::http::Request;
use axum::Router;
use cohort_core::{Cohort, CohortError};
use cohort_db::schema;
use cohort_db::store::DbStore;
use middleware::correlation::CorrelationId;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub use config::ServeConfig;

#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
}

impl AppState {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Opens a fresh connection for one request.
pub fn build_cohort(state: &AppState) -> Result<Cohort<DbStore>, CohortError> {
    let conn = schema::open_and_migrate(&state.db_path).map_err(|err| {
        tracing::error!(db_path = %state.db_path, error = %err, "failed to open task store");
        CohortError::Internal {
            message: err.to_string(),
        }
    })?;
    Ok(Cohort::new(DbStore::new(conn)))
}

pub fn correlation_id_from_request<B>(request: &Request<B>) -> Option<String> {
    request
        .extensions()
        .get::<CorrelationId>()
        .map(|value| value.as_str().to_string())
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, db_path = %state.db_path, "task API listening");
    axum::serve(listener, app(state)).await
}
