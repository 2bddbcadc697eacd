//! HTTP surface: the cron trigger, single-container lookup and refresh, and a health check.

pub mod auth;
pub mod error;
pub mod request_tracing;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub use error::AppError;
pub use state::AppState;

use routes::{health_handler, refresh_all_handler, refresh_one_handler, tracking_handler};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/cron/refresh-tracking", get(refresh_all_handler))
        .route("/api/tracking", get(tracking_handler))
        .route("/api/tracking/refresh", post(refresh_one_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_tracing::request_tracing))
        .with_state(state)
}
