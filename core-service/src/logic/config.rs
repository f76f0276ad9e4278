//! Client configuration
//!
//! Defaults come from `constants`, environment variables override them and
//! CLI flags override both (see `main.rs`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::constants;

/// Where risk payloads come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Built-in rotating snapshots plus sample history
    Mock,
    /// `GET {api_url}/api/v1/latest`
    Live,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(DataSource::Mock),
            "live" => Ok(DataSource::Live),
            other => Err(format!("unknown data source '{}' (expected mock or live)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub data_source: DataSource,
    pub fetch_timeout_secs: u64,
    /// Loading indicator floor per refresh
    pub min_loading_ms: u64,
    pub user_id: String,
    /// Device push token; `None` behaves like a denied permission
    pub push_token: Option<String>,
    pub push_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            data_source: DataSource::Mock,
            fetch_timeout_secs: constants::DEFAULT_FETCH_TIMEOUT_SECS,
            min_loading_ms: constants::DEFAULT_MIN_LOADING_MS,
            user_id: constants::DEFAULT_USER_ID.to_string(),
            push_token: None,
            push_enabled: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let data_source = constants::get_data_source()
            .parse()
            .unwrap_or_else(|e: String| {
                log::warn!("{} - falling back to mock data", e);
                DataSource::Mock
            });

        Self {
            api_url: constants::get_api_url(),
            data_source,
            fetch_timeout_secs: constants::get_fetch_timeout_secs(),
            min_loading_ms: constants::get_min_loading_ms(),
            user_id: constants::get_user_id(),
            push_token: constants::get_push_token(),
            push_enabled: constants::is_push_enabled(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.data_source, DataSource::Mock);
        assert_eq!(config.min_loading(), Duration::from_millis(900));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert!(config.push_token.is_none());
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!("live".parse::<DataSource>(), Ok(DataSource::Live));
        assert_eq!(" MOCK ".parse::<DataSource>(), Ok(DataSource::Mock));
        assert!("remote".parse::<DataSource>().is_err());
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = ClientConfig {
            api_url: "http://10.0.0.2:5000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://10.0.0.2:5000");
    }
}
