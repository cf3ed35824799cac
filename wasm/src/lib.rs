//! WebAssembly module for the Grain Contract Management Platform
//!
//! Provides client-side computation for the dashboard:
//! - Inventory reconciliation and clamped percentages
//! - Progress bar resolution with deterministic tie-breaks
//! - Sub-contract normalization
//! - Allocation ring segments and SVG slice geometry
//! - Per-route view-state persistence

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::allocation::*;
pub use shared::models::*;
pub use shared::progress::*;
pub use shared::reconcile::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Reconcile raw inventory counters into a snapshot, as JSON
#[wasm_bindgen]
pub fn reconcile_inventory(counters_json: &str) -> Result<String, JsValue> {
    let counters: InventoryCounters = serde_json::from_str(counters_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid counters JSON: {}", e)))?;

    let snapshot = reconcile(&counters);
    serde_json::to_string(&snapshot)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Percentage of part within whole, clamped to [0, 100]
#[wasm_bindgen]
pub fn percentage(part: f64, whole: f64) -> f64 {
    percentage_of(part, whole)
}

/// Resolve a progress bar configuration against a sub-contract record
#[wasm_bindgen]
pub fn resolve_progress(spec_json: &str, record_json: &str) -> Result<String, JsValue> {
    let spec: ProgressBarSpec = serde_json::from_str(spec_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid spec JSON: {}", e)))?;
    let record: SubContractRecord = serde_json::from_str(record_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid record JSON: {}", e)))?;

    let resolution = resolve(&spec, &record);
    serde_json::to_string(&resolution)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Normalize a raw sub-contract list payload. Malformed input yields "[]".
#[wasm_bindgen]
pub fn normalize_sub_contracts(list_json: &str) -> String {
    let records = normalize_json(list_json);
    serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
}

/// Build the allocation ring for normalized records and a fixed quantity
#[wasm_bindgen]
pub fn build_allocation_chart(records_json: &str, fixed: f64) -> Result<String, JsValue> {
    let records: Vec<SubContractRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid records JSON: {}", e)))?;

    let chart = build_chart(&records, fixed);
    serde_json::to_string(&chart)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// SVG path for one donut slice of the allocation ring
#[wasm_bindgen]
pub fn allocation_slice_path(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    donut_slice_path(cx, cy, inner_radius, outer_radius, start_angle, end_angle)
}

/// Restore the view state for a route from a persisted store
#[wasm_bindgen]
pub fn resume_view_state(store_json: &str, route: &str) -> String {
    let store = shared::page_state::PageStateStore::from_json(store_json);
    serde_json::to_string(&store.resume(route)).unwrap_or_else(|_| "{}".to_string())
}

/// Record the active tab for a route, returning the updated store
#[wasm_bindgen]
pub fn save_active_tab(store_json: &str, route: &str, tab: &str) -> String {
    let mut store = shared::page_state::PageStateStore::from_json(store_json);
    store.set_active_tab(route, tab);
    store.to_json()
}
