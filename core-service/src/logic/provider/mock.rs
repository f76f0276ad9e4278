//! Offline provider
//!
//! Cycles through built-in snapshots, one per refresh, and serves a sample
//! migraine history relative to the caller's clock.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::RiskDataProvider;
use crate::logic::error::ProviderError;
use crate::logic::risk::{Direction, Factor, RiskPayload};

pub struct MockRiskProvider {
    snapshots: Vec<RiskPayload>,
    cursor: AtomicUsize,
    latency: Option<std::time::Duration>,
}

impl MockRiskProvider {
    /// Low → Elevated → High, then around again
    pub fn new() -> Self {
        Self::with_snapshots(default_snapshots())
    }

    pub fn with_snapshots(snapshots: Vec<RiskPayload>) -> Self {
        Self {
            snapshots,
            cursor: AtomicUsize::new(0),
            latency: None,
        }
    }

    /// Simulated network delay per fetch
    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl Default for MockRiskProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RiskDataProvider for MockRiskProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_latest(&self) -> Result<RiskPayload, ProviderError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.snapshots.is_empty() {
            return Err(ProviderError::MalformedResponse("no mock snapshots".to_string()));
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.snapshots.len();
        Ok(self.snapshots[idx].clone())
    }

    fn history(&self, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        sample_history(now)
    }
}

pub fn default_snapshots() -> Vec<RiskPayload> {
    let snapshot = |p: f64, factors: [(&str, f64, Direction); 3]| RiskPayload {
        probability_next_hour: p,
        top_factors: factors
            .into_iter()
            .map(|(k, s, d)| Factor::new(k, s, d))
            .collect(),
        recommended_actions: Vec::new(),
    };

    vec![
        snapshot(0.18, [("hrv", 0.38, Direction::Down), ("stress", 0.22, Direction::Up), ("work", 0.17, Direction::Up)]),
        snapshot(0.46, [("work", 0.32, Direction::Up), ("stress", 0.29, Direction::Up), ("hrv", 0.19, Direction::Down)]),
        snapshot(0.76, [("stress", 0.44, Direction::Up), ("work", 0.19, Direction::Up), ("hrv", 0.16, Direction::Down)]),
    ]
}

/// Nine events spread over the last month
pub fn sample_history(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let hours = [3, 22];
    let days = [2, 5, 9, 15, 21, 27, 29];
    hours
        .iter()
        .map(|h| now - Duration::hours(*h))
        .chain(days.iter().map(|d| now - Duration::days(*d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshots_rotate() {
        let provider = MockRiskProvider::new();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(provider.fetch_latest().await.unwrap().probability_next_hour);
        }
        assert_eq!(seen, vec![0.18, 0.46, 0.76, 0.18]);
    }

    #[tokio::test]
    async fn test_empty_mock_fails() {
        let provider = MockRiskProvider::with_snapshots(vec![]);
        assert!(provider.fetch_latest().await.is_err());
    }

    #[test]
    fn test_sample_history_size() {
        let provider = MockRiskProvider::new();
        assert_eq!(provider.history(Utc::now()).len(), 9);
    }
}
