//! Keyed view-state persistence for "resume last view per route"
//!
//! An explicit store mapping a route identifier to a small serializable
//! view-state record, with read/write accessors injected into the view
//! layer. Deliberately not a global singleton: the dashboard owns an
//! instance and serializes it across page visits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-route view state worth restoring when the user returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Active tab on the detail page (e.g. "general", "remarks").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<String>,
}

/// Route-keyed store of [`ViewState`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStateStore {
    #[serde(default)]
    entries: BTreeMap<String, ViewState>,
}

impl PageStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State previously saved for `route`, if any.
    pub fn get(&self, route: &str) -> Option<&ViewState> {
        self.entries.get(route)
    }

    /// State for `route`, or a fresh default for a first visit.
    pub fn resume(&self, route: &str) -> ViewState {
        self.entries.get(route).cloned().unwrap_or_default()
    }

    /// Apply `update` to the state for `route`, creating it if absent.
    pub fn update<F>(&mut self, route: &str, update: F)
    where
        F: FnOnce(&mut ViewState),
    {
        update(self.entries.entry(route.to_string()).or_default());
    }

    /// Record the active tab for `route`.
    pub fn set_active_tab(&mut self, route: &str, tab: &str) {
        self.update(route, |state| state.active_tab = Some(tab.to_string()));
    }

    /// Drop the stored state for `route`.
    pub fn clear(&mut self, route: &str) {
        self.entries.remove(route);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize for persistence across page visits.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Restore a persisted store. Corrupt persistence yields an empty
    /// store rather than losing the session to an error.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }
}

/// Route identifier for a contract detail page.
pub fn contract_detail_route(contract_id: &str) -> String {
    format!("/purchase-contracts/{contract_id}")
}
