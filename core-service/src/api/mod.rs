//! API Module
//!
//! Display-facing surface of the client core.
//!
//! Structure:
//! - dashboard.rs: view model of the risk screen + text rendering

pub mod dashboard;

pub use dashboard::{get_dashboard, render_text, DashboardView};
