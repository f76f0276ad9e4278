//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default provider server, only edit this file.

/// Default provider server URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://localhost:5000 (the `migraine-cloud` stand-in)
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default data source ("mock" or "live")
pub const DEFAULT_DATA_SOURCE: &str = "mock";

/// Default fetch timeout (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Minimum time the loading indicator stays up per refresh (milliseconds)
pub const DEFAULT_MIN_LOADING_MS: u64 = 900;

/// User id sent with push token registration
pub const DEFAULT_USER_ID: &str = "anonymous";

/// Latest risk snapshot endpoint
pub const LATEST_PATH: &str = "/api/v1/latest";

/// Push token registration endpoint
pub const REGISTER_TOKEN_PATH: &str = "/api/v1/register-token";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Migraine Risk";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get provider server URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("MIGRAINE_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Get data source name from environment or use default
pub fn get_data_source() -> String {
    std::env::var("MIGRAINE_DATA_SOURCE")
        .unwrap_or_else(|_| DEFAULT_DATA_SOURCE.to_string())
}

/// Get fetch timeout from environment or use default
pub fn get_fetch_timeout_secs() -> u64 {
    std::env::var("MIGRAINE_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
}

/// Get minimum loading duration from environment or use default
pub fn get_min_loading_ms() -> u64 {
    std::env::var("MIGRAINE_MIN_LOADING_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MIN_LOADING_MS)
}

/// Get user id from environment or use default
pub fn get_user_id() -> String {
    std::env::var("MIGRAINE_USER_ID")
        .unwrap_or_else(|_| DEFAULT_USER_ID.to_string())
}

/// Get the device push token, if one was provisioned
pub fn get_push_token() -> Option<String> {
    std::env::var("MIGRAINE_PUSH_TOKEN")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Check if push registration is enabled
pub fn is_push_enabled() -> bool {
    std::env::var("MIGRAINE_PUSH_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
