//! Risk Types
//!
//! Core types for risk classification.
//! No logic here - data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// TONE (shared colour token)
// ============================================================================

/// Three-way colour token used by the gauge and the driver chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Nominal,
    Warning,
    Alert,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Nominal => "nominal",
            Tone::Warning => "warning",
            Tone::Alert => "alert",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Tone::Nominal => "#34d399", // Green
            Tone::Warning => "#fbbf24", // Amber
            Tone::Alert => "#f87171",   // Red
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK BAND
// ============================================================================

/// Risk band for the next-hour probability, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Elevated => "Elevated",
            RiskBand::High => "High",
        }
    }

    /// Fixed colour token per band
    pub fn tone(&self) -> Tone {
        match self {
            RiskBand::Low => Tone::Nominal,
            RiskBand::Elevated => Tone::Warning,
            RiskBand::High => Tone::Alert,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FACTORS
// ============================================================================

/// Trend direction of a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named signal contributing to risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    /// Stable identifier ("stress", "work", "hrv", ...)
    pub key: String,
    /// Relative importance (0.0 - 1.0)
    pub score: f64,
    pub direction: Direction,
}

impl Factor {
    pub fn new(key: impl Into<String>, score: f64, direction: Direction) -> Self {
        Self {
            key: key.into(),
            score,
            direction,
        }
    }

    /// Action catalog key, e.g. `stress:up`
    pub fn composite_key(&self) -> String {
        format!("{}:{}", self.key, self.direction)
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// Snapshot of the current predicted risk. Replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskPayload {
    /// Probability of an attack in the next hour (0.0 - 1.0)
    pub probability_next_hour: f64,
    /// Provider order, highest contribution first. Never re-sorted.
    pub top_factors: Vec<Factor>,
    pub recommended_actions: Vec<String>,
}

impl RiskPayload {
    pub fn factor(&self, key: &str) -> Option<&Factor> {
        self.top_factors.iter().find(|f| f.key == key)
    }
}
