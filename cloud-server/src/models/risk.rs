//! Risk snapshot model (wire shape of `GET /api/v1/latest`)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// One contributing factor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopFactor {
    pub feature: String,
    pub score: f64,
    pub direction: Direction,
}

/// Latest risk snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestRisk {
    pub p_next_hour: f64,
    /// Highest contribution first
    pub top_factors: Vec<TopFactor>,
    pub recommended_actions: Vec<String>,
}

impl LatestRisk {
    fn new(p: f64, factors: [(&str, f64, Direction); 3], actions: &[&str]) -> Self {
        Self {
            p_next_hour: p,
            top_factors: factors
                .into_iter()
                .map(|(feature, score, direction)| TopFactor {
                    feature: feature.to_string(),
                    score,
                    direction,
                })
                .collect(),
            recommended_actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Rotation served by the development feed
    pub fn demo_rotation() -> Vec<Self> {
        use Direction::{Down, Up};
        vec![
            Self::new(
                0.18,
                [("hrv", 0.38, Down), ("stress", 0.22, Up), ("work", 0.17, Up)],
                &["Keep your usual routine"],
            ),
            Self::new(
                0.46,
                [("work", 0.32, Up), ("stress", 0.29, Up), ("hrv", 0.19, Down)],
                &["Drink water", "Micro-break 2 min"],
            ),
            Self::new(
                0.76,
                [("stress", 0.44, Up), ("work", 0.19, Up), ("hrv", 0.16, Down)],
                &["2-min box breathing", "Dim the screen", "Silence phone 10 min"],
            ),
        ]
    }
}
