//! Push token registration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::Validate;

fn default_user_id() -> String {
    "anonymous".to_string()
}

/// Register token request. Expo clients send `expoPushToken`, FCM clients `fcm_token`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTokenRequest {
    #[serde(default = "default_user_id")]
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,

    #[serde(alias = "expoPushToken")]
    #[validate(length(min = 1, max = 4096))]
    pub fcm_token: String,

    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RegisterTokenResponse {
    pub registered: bool,
    pub registration_id: Uuid,
    /// False when this user/token pair was already known
    pub created: bool,
    pub server_time: i64,
}

/// Stored registration
#[derive(Debug, Clone, Serialize)]
pub struct PushRegistration {
    pub id: Uuid,
    pub user_id: String,
    pub session_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl PushRegistration {
    /// Short hash for logs; raw tokens are never logged
    pub fn fingerprint(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..12].to_string()
    }
}
