//! Risk Classifier
//!
//! Classification logic only - types live in `types`, thresholds in `rules`.
//! Input: probability of an attack in the next hour
//! Output: RiskBand + Tone + display percentage

use serde::Serialize;

use super::rules::BandThresholds;
use super::types::{RiskBand, Tone};

/// Gauge reading derived from a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskReading {
    pub band: RiskBand,
    pub tone: Tone,
    /// round(p * 100), half-up
    pub display_pct: u8,
}

/// Clamp an untrusted provider value into [0, 1]. Non-finite values become 0.
pub fn sanitize_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Percentage for display. `f64::round` rounds half away from zero,
/// which is half-up on the non-negative range we feed it.
pub fn to_percent(value: f64) -> u8 {
    (sanitize_unit(value) * 100.0).round() as u8
}

/// Map a probability to its band with the default thresholds
pub fn classify_band(probability: f64) -> RiskBand {
    classify_band_with_thresholds(probability, &BandThresholds::default())
}

/// Map a probability to its band with custom thresholds
pub fn classify_band_with_thresholds(probability: f64, thresholds: &BandThresholds) -> RiskBand {
    let p = sanitize_unit(probability);
    if p >= thresholds.high_min {
        RiskBand::High
    } else if p >= thresholds.elevated_min {
        RiskBand::Elevated
    } else {
        RiskBand::Low
    }
}

/// Full gauge reading (band, colour, percentage)
pub fn classify(probability: f64) -> RiskReading {
    classify_with_thresholds(probability, &BandThresholds::default())
}

pub fn classify_with_thresholds(probability: f64, thresholds: &BandThresholds) -> RiskReading {
    let band = classify_band_with_thresholds(probability, thresholds);
    RiskReading {
        band,
        tone: band.tone(),
        display_pct: to_percent(probability),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_reading() {
        let reading = classify(0.18);
        assert_eq!(reading.band, RiskBand::Low);
        assert_eq!(reading.display_pct, 18);
        assert_eq!(reading.tone, Tone::Nominal);
    }

    #[test]
    fn test_high_reading() {
        let reading = classify(0.76);
        assert_eq!(reading.band, RiskBand::High);
        assert_eq!(reading.display_pct, 76);
        assert_eq!(reading.tone.color(), "#f87171");
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(classify_band(0.70), RiskBand::High);
        assert_eq!(classify_band(0.6999), RiskBand::Elevated);
        assert_eq!(classify_band(0.30), RiskBand::Elevated);
        assert_eq!(classify_band(0.2999), RiskBand::Low);
    }

    #[test]
    fn test_band_is_monotonic() {
        let mut previous = classify_band(0.0);
        for i in 0..=1000 {
            let band = classify_band(i as f64 / 1000.0);
            assert!(band >= previous, "band dropped at {}", i);
            previous = band;
        }
    }

    #[test]
    fn test_malformed_probability_is_zero() {
        let reading = classify(f64::NAN);
        assert_eq!(reading.band, RiskBand::Low);
        assert_eq!(reading.display_pct, 0);

        assert_eq!(classify(f64::INFINITY).display_pct, 0);
        assert_eq!(classify(-0.4).display_pct, 0);
        assert_eq!(classify(1.7).display_pct, 100);
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(to_percent(0.125), 13);
        assert_eq!(to_percent(0.005), 1);
        assert_eq!(to_percent(0.994), 99);
        assert_eq!(to_percent(0.999), 100);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = BandThresholds {
            elevated_min: 0.1,
            high_min: 0.5,
        };
        assert_eq!(classify_band_with_thresholds(0.18, &strict), RiskBand::Elevated);
        assert_eq!(classify_with_thresholds(0.5, &strict).band, RiskBand::High);
    }
}
