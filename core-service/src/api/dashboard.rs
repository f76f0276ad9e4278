//! Dashboard API
//!
//! Display-ready view of the controller for frontends, plus the plain-text
//! rendering used by the CLI.

use chrono::Local;
use serde::Serialize;
use std::fmt::Write;

use crate::logic::actions::SELECT_PROMPT;
use crate::logic::controller::{Phase, PresentationController, ScreenSnapshot};

pub const TITLE: &str = "Today Migraine Risk";

#[derive(Debug, Clone, Serialize)]
pub struct GaugeView {
    pub pct: u8,
    pub band: String,
    pub caption: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChipView {
    pub key: String,
    pub text: String,
    pub color: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub last_24h: usize,
    pub last_7d: usize,
    pub last_30d: usize,
    /// `date · time`, newest first
    pub recent: Vec<String>,
}

/// Dashboard for frontend
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub updated: String,
    pub loading: bool,
    /// `None` when the provider had no data
    pub gauge: Option<GaugeView>,
    pub drivers: Vec<ChipView>,
    pub actions: Vec<String>,
    pub actions_placeholder: Option<&'static str>,
    pub history: HistoryView,
    pub toast: Option<&'static str>,
}

impl From<ScreenSnapshot> for DashboardView {
    fn from(snapshot: ScreenSnapshot) -> Self {
        let updated = match snapshot.updated_at {
            Some(at) => format!("Updated {}", at.with_timezone(&Local).format("%H:%M")),
            None => "Updated —".to_string(),
        };

        let gauge = snapshot.reading.map(|r| GaugeView {
            pct: r.display_pct,
            band: r.band.to_string(),
            caption: format!("{} risk next hour", r.band),
            color: r.tone.color(),
        });

        let drivers = snapshot
            .drivers
            .into_iter()
            .map(|d| ChipView {
                text: format!("{} {} {} {}%", d.icon, d.label, d.glyph, d.importance_pct),
                key: d.key,
                color: d.tone.color(),
                selected: d.is_selected,
            })
            .collect();

        let actions_placeholder = snapshot.actions.is_empty().then_some(SELECT_PROMPT);

        DashboardView {
            title: TITLE,
            updated,
            loading: snapshot.phase == Phase::Loading,
            gauge,
            drivers,
            actions: snapshot.actions,
            actions_placeholder,
            history: HistoryView {
                last_24h: snapshot.history.last_24h,
                last_7d: snapshot.history.last_7d,
                last_30d: snapshot.history.last_30d,
                recent: snapshot
                    .history
                    .recent
                    .into_iter()
                    .map(|e| format!("{} · {}", e.date, e.time))
                    .collect(),
            },
            toast: snapshot.toast,
        }
    }
}

/// Get the dashboard
pub fn get_dashboard(controller: &PresentationController) -> DashboardView {
    DashboardView::from(controller.snapshot())
}

/// Plain-text rendering for terminals
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}  ({})", view.title, view.updated);
    out.push('\n');

    if view.loading {
        out.push_str("  … loading\n");
    } else {
        match &view.gauge {
            Some(g) => {
                let _ = writeln!(out, "  {:>3}%  {}", g.pct, g.caption);
            }
            None => out.push_str("  No data available\n"),
        }
    }

    out.push_str("\nTOP DRIVERS\n");
    if view.drivers.is_empty() {
        out.push_str("  —\n");
    }
    for chip in &view.drivers {
        let marker = if chip.selected { ">" } else { " " };
        let _ = writeln!(out, " {} {}  [{}]", marker, chip.text, chip.key);
    }

    out.push_str("\nRECOMMENDED ACTIONS\n");
    match view.actions_placeholder {
        Some(prompt) => {
            let _ = writeln!(out, "  {}", prompt);
        }
        None => {
            for action in &view.actions {
                let _ = writeln!(out, "  • {}", action);
            }
        }
    }

    out.push_str("\nHISTORY (MIGRAINE OCCURRENCE)\n");
    let _ = writeln!(
        out,
        "  24h: {}   7d: {}   30d: {}",
        view.history.last_24h, view.history.last_7d, view.history.last_30d
    );
    out.push_str("  Recent events\n");
    if view.history.recent.is_empty() {
        out.push_str("    No events yet\n");
    }
    for line in &view.history.recent {
        let _ = writeln!(out, "    {}", line);
    }

    if let Some(toast) = view.toast {
        let _ = writeln!(out, "\n  [{}]", toast);
    }
    out
}
