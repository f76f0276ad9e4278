//! Risk Provider HTTP Client
//!
//! HTTP client for the latest risk snapshot endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

use super::RiskDataProvider;
use crate::constants;
use crate::logic::config::ClientConfig;
use crate::logic::error::{ClientBuildError, ProviderError};
use crate::logic::risk::rules::DIRECTION_UP_MIN_SCORE;
use crate::logic::risk::{sanitize_unit, Direction, Factor, RiskPayload};

// Response types

#[derive(Debug, Deserialize)]
pub struct LatestResponse {
    #[serde(default, deserialize_with = "lenient_unit")]
    pub p_next_hour: f64,
    pub top_factors: Vec<WireFactor>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireFactor {
    pub feature: String,
    #[serde(default, deserialize_with = "lenient_unit")]
    pub score: f64,
    /// Newer providers send the trend explicitly
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// Any non-numeric or missing value reads as 0
fn lenient_unit<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(sanitize_unit).unwrap_or(0.0))
}

/// Trend for factors that arrive without one
pub fn infer_direction(score: f64) -> Direction {
    if score >= DIRECTION_UP_MIN_SCORE {
        Direction::Up
    } else {
        Direction::Down
    }
}

impl From<LatestResponse> for RiskPayload {
    fn from(wire: LatestResponse) -> Self {
        RiskPayload {
            probability_next_hour: wire.p_next_hour,
            top_factors: wire
                .top_factors
                .into_iter()
                .map(|f| {
                    let direction = f.direction.unwrap_or_else(|| infer_direction(f.score));
                    Factor::new(f.feature, f.score, direction)
                })
                .collect(),
            recommended_actions: wire.recommended_actions,
        }
    }
}

/// Decode a `/api/v1/latest` body
pub fn parse_latest(body: &str) -> Result<RiskPayload, ProviderError> {
    serde_json::from_str::<LatestResponse>(body)
        .map(RiskPayload::from)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

/// HTTP-backed Risk Data Provider
pub struct HttpRiskProvider {
    base_url: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl HttpRiskProvider {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            timeout_seconds: config.fetch_timeout_secs,
            http_client,
        })
    }

    pub fn latest_url(&self) -> String {
        format!("{}{}", self.base_url, constants::LATEST_PATH)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout_seconds)
        } else {
            ProviderError::from(err)
        }
    }
}

#[async_trait]
impl RiskDataProvider for HttpRiskProvider {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn fetch_latest(&self) -> Result<RiskPayload, ProviderError> {
        let url = self.latest_url();
        log::debug!("Fetching latest risk from {}", url);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(ProviderError::ServerError(response.status().as_u16()));
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        parse_latest(&body)
    }
}
