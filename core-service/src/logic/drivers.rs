//! Driver Ranker
//!
//! Turns the provider's factor list into render-ready chips.
//! The provider owns the ranking: chips keep input order.

use serde::Serialize;

use super::risk::classifier::{sanitize_unit, to_percent};
use super::risk::rules::ToneThresholds;
use super::risk::{Direction, Factor, Tone};

/// One chip in the "Top drivers" row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverChip {
    pub key: String,
    pub label: String,
    pub icon: &'static str,
    /// round(score * 100)
    pub importance_pct: u8,
    pub tone: Tone,
    pub direction: Direction,
    pub glyph: &'static str,
    pub is_selected: bool,
}

/// Human label for a factor key. Unknown keys are shown as-is.
pub fn driver_label(key: &str) -> String {
    match key {
        "stress" => "Stress".to_string(),
        "work" => "Workload".to_string(),
        "hrv" => "HRV".to_string(),
        other => other.to_string(),
    }
}

pub fn driver_icon(key: &str) -> &'static str {
    match key {
        "hrv" => "💓",
        "stress" => "😮‍💨",
        _ => "📅",
    }
}

/// Tone with the default thresholds (alert > 0.35, warning > 0.20)
pub fn driver_tone(score: f64) -> Tone {
    driver_tone_with_thresholds(score, &ToneThresholds::default())
}

pub fn driver_tone_with_thresholds(score: f64, thresholds: &ToneThresholds) -> Tone {
    let s = sanitize_unit(score);
    if s > thresholds.alert_above {
        Tone::Alert
    } else if s > thresholds.warning_above {
        Tone::Warning
    } else {
        Tone::Nominal
    }
}

/// Build the chip list, preserving provider order
pub fn rank_drivers(factors: &[Factor], selected: Option<&str>) -> Vec<DriverChip> {
    rank_drivers_with_thresholds(factors, selected, &ToneThresholds::default())
}

pub fn rank_drivers_with_thresholds(
    factors: &[Factor],
    selected: Option<&str>,
    thresholds: &ToneThresholds,
) -> Vec<DriverChip> {
    factors
        .iter()
        .map(|f| DriverChip {
            key: f.key.clone(),
            label: driver_label(&f.key),
            icon: driver_icon(&f.key),
            importance_pct: to_percent(f.score),
            tone: driver_tone_with_thresholds(f.score, thresholds),
            direction: f.direction,
            glyph: f.direction.glyph(),
            is_selected: selected == Some(f.key.as_str()),
        })
        .collect()
}

// ============================================================================
// SELECTION
// ============================================================================

/// Single-driver selection. Selecting the selected driver clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    key: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Toggle `key`; returns the selection after the toggle
    pub fn toggle(&mut self, key: &str) -> Option<&str> {
        if self.key.as_deref() == Some(key) {
            self.key = None;
        } else {
            self.key = Some(key.to_string());
        }
        self.selected()
    }

    pub fn clear(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Factor> {
        vec![
            Factor::new("stress", 0.44, Direction::Up),
            Factor::new("work", 0.19, Direction::Up),
            Factor::new("hrv", 0.16, Direction::Down),
        ]
    }

    #[test]
    fn test_stress_chip_is_alert() {
        let chips = rank_drivers(&sample(), None);
        assert_eq!(chips[0].key, "stress");
        assert_eq!(chips[0].tone, Tone::Alert);
        assert_eq!(chips[0].importance_pct, 44);
        assert_eq!(chips[0].glyph, "↑");
        assert_eq!(chips[0].label, "Stress");
    }

    #[test]
    fn test_tone_thresholds_are_strict() {
        assert_eq!(driver_tone(0.35), Tone::Warning);
        assert_eq!(driver_tone(0.36), Tone::Alert);
        assert_eq!(driver_tone(0.20), Tone::Nominal);
        assert_eq!(driver_tone(0.21), Tone::Warning);
        assert_eq!(driver_tone(f64::NAN), Tone::Nominal);
    }

    #[test]
    fn test_input_order_is_preserved() {
        // Deliberately not sorted by score
        let factors = vec![
            Factor::new("hrv", 0.10, Direction::Down),
            Factor::new("stress", 0.90, Direction::Up),
            Factor::new("work", 0.40, Direction::Up),
        ];
        let keys: Vec<_> = rank_drivers(&factors, None).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["hrv", "stress", "work"]);
    }

    #[test]
    fn test_only_selected_chip_is_marked() {
        let chips = rank_drivers(&sample(), Some("work"));
        let marked: Vec<_> = chips.iter().filter(|c| c.is_selected).map(|c| c.key.as_str()).collect();
        assert_eq!(marked, vec!["work"]);
        assert_eq!(chips[1].label, "Workload");
    }

    #[test]
    fn test_unknown_key_uses_raw_label() {
        let chips = rank_drivers(&[Factor::new("sleep", 0.3, Direction::Down)], None);
        assert_eq!(chips[0].label, "sleep");
        assert_eq!(chips[0].icon, "📅");
        assert_eq!(chips[0].glyph, "↓");
    }

    #[test]
    fn test_toggle_same_key_twice_clears() {
        let mut selection = Selection::new();
        assert_eq!(selection.toggle("work"), Some("work"));
        assert_eq!(selection.toggle("work"), None);
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn test_toggle_other_key_replaces() {
        let mut selection = Selection::new();
        selection.toggle("work");
        assert_eq!(selection.toggle("stress"), Some("stress"));
        selection.clear();
        assert_eq!(selection.selected(), None);
    }
}
