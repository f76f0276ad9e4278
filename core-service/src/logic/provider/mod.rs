//! Risk Data Provider
//!
//! This module handles:
//! - The provider seam used by the controller (`RiskDataProvider`)
//! - The HTTP provider for `GET /api/v1/latest`
//! - The offline mock provider with rotating snapshots and sample history

pub mod client;
pub mod mock;

pub use client::{parse_latest, HttpRiskProvider, LatestResponse};
pub use mock::MockRiskProvider;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::ProviderError;
use super::risk::RiskPayload;

/// Supplies risk payloads, locally or remotely
#[async_trait]
pub trait RiskDataProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Fetch the latest snapshot
    async fn fetch_latest(&self) -> Result<RiskPayload, ProviderError>;

    /// Migraine event timestamps, if this provider has any
    fn history(&self, _now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        Vec::new()
    }
}
