//! Push token registration handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::models::{PushRegistration, RegisterTokenRequest, RegisterTokenResponse};
use crate::{AppError, AppResult, AppState};

/// Register a device push token
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterTokenRequest>, JsonRejection>,
) -> AppResult<Json<RegisterTokenResponse>> {
    let Json(req) = payload?;
    req.validate()?;
    if req.fcm_token.trim().is_empty() {
        return Err(AppError::ValidationError("fcm_token must not be blank".to_string()));
    }

    let fingerprint = PushRegistration::fingerprint(&req.fcm_token);
    let (registration, created) = state.tokens.register(req).await;

    if created {
        tracing::info!("Push token registered: user={} token={}", registration.user_id, fingerprint);
    } else {
        tracing::debug!("Push token refreshed: user={} token={}", registration.user_id, fingerprint);
    }

    Ok(Json(RegisterTokenResponse {
        registered: true,
        registration_id: registration.id,
        created,
        server_time: Utc::now().timestamp(),
    }))
}
