//! Presentation Controller
//!
//! Owns everything the risk screen shows: the current payload, the driver
//! selection, the migraine history and the action toast.
//!
//! ```text
//! Idle --refresh--> Loading --ok-----> Ready(payload)
//!                           --error--> Ready(none)
//! Ready --select--> Ready
//! ```
//!
//! At most one refresh runs at a time. Each refresh keeps the loading state
//! up for at least `min_loading`, and dropping the refresh future cancels the
//! fetch and the floor timer together.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::actions::{select_actions, ActionCatalog};
use super::config::ClientConfig;
use super::drivers::{rank_drivers, DriverChip, Selection};
use super::error::ProviderError;
use super::history::{summarize, HistorySummary};
use super::provider::RiskDataProvider;
use super::risk::{classify, RiskPayload, RiskReading};

/// Toast text shown after an action is tapped
pub const ACTION_TOAST: &str = "Action logged";

/// Fade in + hold + fade out
pub const TOAST_DURATION: Duration = Duration::from_millis(200 + 900 + 250);

const MAX_ACTION_LOG: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Loaded,
    /// Provider failed; the screen shows "no data"
    Failed,
    /// Another refresh was already in flight
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedAction {
    pub action: String,
    pub driver: String,
    pub logged_at: DateTime<Utc>,
}

/// Everything the screen needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct ScreenSnapshot {
    pub phase: Phase,
    pub reading: Option<RiskReading>,
    pub drivers: Vec<DriverChip>,
    pub selected: Option<String>,
    pub actions: Vec<String>,
    pub history: HistorySummary,
    pub updated_at: Option<DateTime<Utc>>,
    pub toast: Option<&'static str>,
}

struct ControllerState {
    phase: Phase,
    payload: Option<RiskPayload>,
    selection: Selection,
    history: Vec<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    toast_until: Option<Instant>,
    action_log: Vec<LoggedAction>,
}

pub struct PresentationController {
    provider: Arc<dyn RiskDataProvider>,
    catalog: ActionCatalog,
    min_loading: Duration,
    fetch_timeout: Duration,
    refreshing: AtomicBool,
    state: Mutex<ControllerState>,
}

/// Clears the in-flight flag and leaves `Loading` if the refresh is dropped
struct RefreshGuard<'a> {
    controller: &'a PresentationController,
    previous: Phase,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.controller.state.lock();
        if state.phase == Phase::Loading {
            log::debug!("Refresh cancelled, back to {:?}", self.previous);
            state.phase = self.previous;
        }
        drop(state);
        self.controller.refreshing.store(false, Ordering::Release);
    }
}

impl PresentationController {
    pub fn new(provider: Arc<dyn RiskDataProvider>, config: &ClientConfig) -> Self {
        Self {
            provider,
            catalog: ActionCatalog::builtin(),
            min_loading: config.min_loading(),
            fetch_timeout: config.fetch_timeout(),
            refreshing: AtomicBool::new(false),
            state: Mutex::new(ControllerState {
                phase: Phase::Idle,
                payload: None,
                selection: Selection::new(),
                history: Vec::new(),
                updated_at: None,
                toast_until: None,
                action_log: Vec::new(),
            }),
        }
    }

    pub fn with_catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub fn payload(&self) -> Option<RiskPayload> {
        self.state.lock().payload.clone()
    }

    pub fn selected(&self) -> Option<String> {
        self.state.lock().selection.selected().map(str::to_string)
    }

    /// Replace the payload from the provider. Never returns an error:
    /// provider failures leave the screen with no data.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Refresh already in flight, ignoring");
            return RefreshOutcome::Skipped;
        }

        let previous = {
            let mut state = self.state.lock();
            let previous = state.phase;
            state.phase = Phase::Loading;
            state.selection.clear();
            previous
        };
        let _guard = RefreshGuard { controller: self, previous };

        log::debug!("Refreshing from {} provider", self.provider.name());
        let fetch = tokio::time::timeout(self.fetch_timeout, self.provider.fetch_latest());
        let (result, ()) = tokio::join!(fetch, tokio::time::sleep(self.min_loading));
        let result = result.unwrap_or_else(|_| Err(ProviderError::Timeout(self.fetch_timeout.as_secs())));

        let now = Utc::now();
        let history = self.provider.history(now);

        let mut state = self.state.lock();
        state.phase = Phase::Ready;
        state.selection.clear();
        state.history = history;
        match result {
            Ok(payload) => {
                log::info!(
                    "Risk updated: {:.0}% next hour, {} drivers",
                    payload.probability_next_hour * 100.0,
                    payload.top_factors.len()
                );
                state.payload = Some(payload);
                state.updated_at = Some(now);
                RefreshOutcome::Loaded
            }
            Err(e) => {
                log::warn!("Risk refresh failed: {}", e);
                state.payload = None;
                RefreshOutcome::Failed
            }
        }
    }

    /// Toggle the driver selection. Only keys of the loaded payload's
    /// factors can be selected.
    pub fn select(&self, key: &str) -> Option<String> {
        let mut state = self.state.lock();
        if state.phase != Phase::Ready {
            log::debug!("Ignoring selection of '{}' while {:?}", key, state.phase);
            return state.selection.selected().map(str::to_string);
        }
        if state.payload.as_ref().and_then(|p| p.factor(key)).is_none() {
            log::debug!("Ignoring selection of unknown driver '{}'", key);
            return state.selection.selected().map(str::to_string);
        }
        state.selection.toggle(key).map(str::to_string)
    }

    /// Actions for the current selection
    pub fn actions(&self) -> Vec<String> {
        let state = self.state.lock();
        select_actions(&self.catalog, state.payload.as_ref(), state.selection.selected())
    }

    /// Record a tap on a displayed action and raise the toast.
    /// Returns false when the action is not currently on screen.
    pub fn log_action(&self, action: &str) -> bool {
        let mut state = self.state.lock();
        let Some(driver) = state.selection.selected().map(str::to_string) else {
            return false;
        };
        let shown = select_actions(&self.catalog, state.payload.as_ref(), Some(&driver));
        if !shown.iter().any(|a| a == action) {
            log::debug!("Action '{}' is not on screen", action);
            return false;
        }

        if state.action_log.len() >= MAX_ACTION_LOG {
            state.action_log.remove(0);
        }
        state.action_log.push(LoggedAction {
            action: action.to_string(),
            driver,
            logged_at: Utc::now(),
        });
        state.toast_until = Some(Instant::now() + TOAST_DURATION);
        log::info!("Action logged: {}", action);
        true
    }

    pub fn action_log(&self) -> Vec<LoggedAction> {
        self.state.lock().action_log.clone()
    }

    pub fn toast(&self) -> Option<&'static str> {
        let state = self.state.lock();
        match state.toast_until {
            Some(until) if Instant::now() < until => Some(ACTION_TOAST),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        let toast = self.toast();
        let state = self.state.lock();
        let selected = state.selection.selected();
        let payload = state.payload.as_ref();

        ScreenSnapshot {
            phase: state.phase,
            reading: payload.map(|p| classify(p.probability_next_hour)),
            drivers: payload
                .map(|p| rank_drivers(&p.top_factors, selected))
                .unwrap_or_default(),
            selected: selected.map(str::to_string),
            actions: select_actions(&self.catalog, payload, selected),
            history: summarize(&state.history, Utc::now()),
            updated_at: state.updated_at,
            toast,
        }
    }
}
