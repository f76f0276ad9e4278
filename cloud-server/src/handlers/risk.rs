//! Risk snapshot handler

use axum::{extract::State, Json};

use crate::models::LatestRisk;
use crate::{AppError, AppResult, AppState};

/// Latest risk snapshot
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<LatestRisk>> {
    let snapshot = state
        .feed
        .next()
        .ok_or_else(|| AppError::InternalError("risk feed is empty".to_string()))?;

    tracing::debug!(
        "Serving risk snapshot p={:.2} ({} factors)",
        snapshot.p_next_hour,
        snapshot.top_factors.len()
    );
    Ok(Json(snapshot))
}
