use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{auth::is_authorized, error::AppError, state::AppState};
use crate::model::TrackingSnapshot;
use crate::purchase_order_actor::ApplyOutcome;
use crate::sweep::SweepSummary;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContainerQuery {
    container: Option<String>,
    token: Option<String>,
}

impl ContainerQuery {
    fn container(&self) -> Result<&str, AppError> {
        self.container
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AppError::MissingContainer)
    }
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub summary: SweepSummary,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub container: String,
    pub outcome: ApplyOutcome,
}

fn authorize(state: &AppState, token: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    if is_authorized(state.cron_secret.as_deref(), token, headers) {
        Ok(())
    } else {
        warn!("Rejected unauthorized trigger");
        Err(AppError::Unauthorized)
    }
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn refresh_all_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<SweepResponse>, AppError> {
    authorize(&state, query.token.as_deref(), &headers)?;

    let summary = state.sweeper.run().await?;
    info!(
        total = summary.total,
        failed = summary.failed,
        "Scheduled tracking refresh finished"
    );

    Ok(Json(SweepResponse {
        message: "Tracking refresh completed",
        timestamp: Utc::now(),
        summary,
    }))
}

pub async fn tracking_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContainerQuery>,
) -> Result<Json<TrackingSnapshot>, AppError> {
    let container = query.container()?;
    let snapshot = state.sweeper.fetcher().fetch(container).await?;
    Ok(Json(snapshot))
}

pub async fn refresh_one_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContainerQuery>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    authorize(&state, query.token.as_deref(), &headers)?;
    let container = query.container()?;

    let refresh = state
        .sweeper
        .refresh_container(container)
        .await
        .map_err(|source| AppError::Refresh {
            container: container.to_string(),
            source,
        })?;

    Ok(Json(RefreshResponse {
        message: "Container tracking refreshed",
        container: refresh.container,
        outcome: refresh.outcome,
    }))
}
