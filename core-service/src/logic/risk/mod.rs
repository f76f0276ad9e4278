//! Risk Module
//!
//! Classifies the next-hour probability into Low / Elevated / High.
//!
//! ## Structure
//! - `types`: Core types (RiskBand, Tone, Factor, RiskPayload)
//! - `rules`: Thresholds and constants
//! - `classifier`: Classification logic
//!
//! ## Usage
//! ```ignore
//! use migraine_core::logic::risk::{classify, RiskBand};
//!
//! let reading = classify(payload.probability_next_hour);
//! match reading.band {
//!     RiskBand::Low => println!("Low risk"),
//!     RiskBand::Elevated => println!("Keep an eye on it"),
//!     RiskBand::High => println!("Act now"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

pub use types::{Direction, Factor, RiskBand, RiskPayload, Tone};

pub use rules::{BandThresholds, ToneThresholds, ELEVATED_THRESHOLD, HIGH_THRESHOLD};

pub use classifier::{classify, classify_band, classify_with_thresholds, sanitize_unit, to_percent, RiskReading};
