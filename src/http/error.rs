use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sweep::{RefreshError, SweepError};
use crate::tracking::FetchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("container query parameter is required")]
    MissingContainer,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{source}")]
    Refresh {
        container: String,
        source: RefreshError,
    },

    #[error(transparent)]
    Sweep(#[from] SweepError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
            }
            AppError::MissingContainer => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Fetch(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "container": e.container() })),
            )
                .into_response(),
            AppError::Refresh { container, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "container": container })),
            )
                .into_response(),
            AppError::Sweep(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
