//! Risk Classification Rules & Thresholds
//!
//! Constants and config only - no classification logic.

use serde::{Deserialize, Serialize};

// ============================================================================
// BAND THRESHOLDS (probability)
// ============================================================================

/// At or above this probability = Elevated
pub const ELEVATED_THRESHOLD: f64 = 0.30;

/// At or above this probability = High
pub const HIGH_THRESHOLD: f64 = 0.70;

// ============================================================================
// DRIVER TONE THRESHOLDS (score, strictly greater than)
// ============================================================================

pub const DRIVER_WARNING_ABOVE: f64 = 0.20;

pub const DRIVER_ALERT_ABOVE: f64 = 0.35;

/// Live payloads without an explicit direction trend "up" at or above this score
pub const DIRECTION_UP_MIN_SCORE: f64 = 0.5;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for runtime adjustment)
// ============================================================================

/// Band thresholds (configurable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub elevated_min: f64,
    pub high_min: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            elevated_min: ELEVATED_THRESHOLD,
            high_min: HIGH_THRESHOLD,
        }
    }
}

/// Driver chip tone thresholds (configurable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneThresholds {
    pub warning_above: f64,
    pub alert_above: f64,
}

impl Default for ToneThresholds {
    fn default() -> Self {
        Self {
            warning_above: DRIVER_WARNING_ABOVE,
            alert_above: DRIVER_ALERT_ABOVE,
        }
    }
}
