//! Action Selector
//!
//! Picks the recommended actions for the selected driver.
//!
//! Lookup order:
//! 1. Catalog entry for the composite key `<factor>:<direction>`
//! 2. The payload's own `recommended_actions` (live providers do not key them)
//!
//! Nothing selected, or a key the payload does not carry, yields no actions.

use std::collections::HashMap;

use super::risk::RiskPayload;

/// Shown by the display layer when there is nothing to list
pub const SELECT_PROMPT: &str = "Select a driver to see actions";

/// Static composite-key → actions mapping
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    entries: HashMap<String, Vec<String>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog shipped with the app
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "stress:up",
            ["2-min box breathing", "Stand + stretch", "Silence phone 10 min"],
        );
        catalog.insert(
            "work:up",
            ["Reschedule one task", "Drink water", "Micro-break 2 min"],
        );
        catalog.insert(
            "hrv:down",
            ["Good recovery — maintain pace", "Avoid workload spikes"],
        );
        catalog
    }

    pub fn insert<I, S>(&mut self, composite_key: &str, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            composite_key.to_string(),
            actions.into_iter().map(Into::into).collect(),
        );
    }

    /// Unknown keys yield an empty slice
    pub fn lookup(&self, composite_key: &str) -> &[String] {
        self.entries
            .get(composite_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Actions to display for the current selection
pub fn select_actions(
    catalog: &ActionCatalog,
    payload: Option<&RiskPayload>,
    selected: Option<&str>,
) -> Vec<String> {
    let (Some(payload), Some(key)) = (payload, selected) else {
        return Vec::new();
    };
    let Some(factor) = payload.factor(key) else {
        log::debug!("Selected driver '{}' not in current payload", key);
        return Vec::new();
    };

    let keyed = catalog.lookup(&factor.composite_key());
    if !keyed.is_empty() {
        return keyed.to_vec();
    }
    payload.recommended_actions.clone()
}
