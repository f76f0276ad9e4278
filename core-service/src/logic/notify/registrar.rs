//! Token Registrar
//!
//! Obtains the device push token and forwards it to the backend once per
//! session. Failures are logged, never surfaced to the user.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::constants;
use crate::logic::config::ClientConfig;
use crate::logic::error::{ClientBuildError, RegistrationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Platform side of push notifications (permission prompt + token)
#[async_trait]
pub trait PushTokenSource: Send + Sync {
    async fn permission(&self) -> PermissionStatus;

    /// Ask the user; only called when `permission` is not `Granted`
    async fn request_permission(&self) -> PermissionStatus;

    async fn push_token(&self) -> Option<String>;
}

/// Token provisioned through configuration. No token means no permission.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: Option<String>,
}

impl StaticTokenSource {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl PushTokenSource for StaticTokenSource {
    async fn permission(&self) -> PermissionStatus {
        if self.token.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Undetermined
        }
    }

    async fn request_permission(&self) -> PermissionStatus {
        if self.token.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn push_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterTokenRequest {
    pub user_id: String,
    pub fcm_token: String,
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
}

pub struct TokenRegistrar {
    base_url: String,
    user_id: String,
    session_id: Uuid,
    enabled: bool,
    http_client: reqwest::Client,
    /// Token accepted by the backend this session
    registered: Mutex<Option<String>>,
}

impl TokenRegistrar {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            user_id: config.user_id.clone(),
            session_id: Uuid::new_v4(),
            enabled: config.push_enabled,
            http_client,
            registered: Mutex::new(None),
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn is_registered(&self) -> bool {
        self.registered.lock().await.is_some()
    }

    /// Register the device token. Concurrent callers are serialized and only
    /// the first successful call reaches the backend.
    pub async fn register(&self, source: &dyn PushTokenSource) -> Result<RegistrationOutcome, RegistrationError> {
        if !self.enabled {
            return Err(RegistrationError::Disabled);
        }

        let mut registered = self.registered.lock().await;
        if registered.is_some() {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let mut status = source.permission().await;
        if status != PermissionStatus::Granted {
            status = source.request_permission().await;
        }
        if status != PermissionStatus::Granted {
            return Err(RegistrationError::PermissionDenied);
        }

        let token = source.push_token().await.ok_or(RegistrationError::PermissionDenied)?;
        let preview: String = token.chars().take(12).collect();
        log::info!("Push token obtained: {}...", preview);

        let url = format!("{}{}", self.base_url, constants::REGISTER_TOKEN_PATH);
        let request = RegisterTokenRequest {
            user_id: self.user_id.clone(),
            fcm_token: token.clone(),
            session_id: self.session_id,
        };

        let response = self.http_client
            .post(&url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Token registration failed ({}): {}", status, error_text);
            return Err(RegistrationError::ServerError(status));
        }

        *registered = Some(token);
        log::info!("Push token registered for user {}", self.user_id);
        Ok(RegistrationOutcome::Registered)
    }

    /// Fire-and-forget variant: failures are logged only
    pub async fn register_quietly(&self, source: &dyn PushTokenSource) -> Option<RegistrationOutcome> {
        match self.register(source).await {
            Ok(outcome) => Some(outcome),
            Err(RegistrationError::PermissionDenied) => {
                log::info!("Notification permission not granted - push disabled");
                None
            }
            Err(RegistrationError::Disabled) => {
                log::debug!("Push registration disabled by configuration");
                None
            }
            Err(e) => {
                log::warn!("Push registration failed: {}", e);
                None
            }
        }
    }
}
