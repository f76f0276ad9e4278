//! Error types for the client core
//!
//! Nothing here is fatal: the controller collapses provider errors into an
//! empty dashboard and the registrar only logs its failures.

use thiserror::Error;

/// Risk Data Provider failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Provider timed out after {0}s")]
    Timeout(u64),
    #[error("Provider returned HTTP {0}")]
    ServerError(u16),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Token Registrar failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Notification permission denied")]
    PermissionDenied,
    #[error("Push registration disabled")]
    Disabled,
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Registrar returned HTTP {0}")]
    ServerError(u16),
}

/// HTTP client construction failure
#[derive(Error, Debug)]
#[error("Failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] pub reqwest::Error);

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::ServerError(status.as_u16())
        } else {
            ProviderError::NetworkFailure(err.to_string())
        }
    }
}

impl From<reqwest::Error> for RegistrationError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RegistrationError::ServerError(status.as_u16()),
            None => RegistrationError::NetworkFailure(err.to_string()),
        }
    }
}
