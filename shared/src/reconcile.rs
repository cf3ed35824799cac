//! Inventory reconciliation for contract quantity counters
//!
//! Takes the raw counters reported by the CRM for a contract and derives a
//! consistent snapshot for the quantity-overview display: a floored
//! `available` amount and percentages clamped to `[0, 100]` no matter how
//! inconsistent the upstream data is. Clamps that actually altered a value
//! are recorded as non-fatal anomalies on the snapshot.

use serde::{Deserialize, Serialize};

/// Raw quantity counters for a contract, in the contract's measurement unit.
///
/// Counters absent from the payload deserialize as zero; the reconciler
/// never rejects input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryCounters {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub fixed: f64,
    #[serde(default)]
    pub reserved: f64,
    #[serde(default)]
    pub settled: f64,
    #[serde(default)]
    pub unsettled: f64,
}

/// Reconciled view of a contract's inventory counters.
///
/// Built fresh from each contract fetch/selection and never mutated; a
/// changed contract record supersedes the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub total: f64,
    pub open: f64,
    pub fixed: f64,
    pub reserved: f64,
    pub settled: f64,
    pub unsettled: f64,
    /// `max(0, total - reserved)`.
    pub available: f64,
    pub fixed_percentage: f64,
    pub settled_percentage: f64,
    pub reserved_percentage: f64,
    /// Clamps that altered a displayed value. Empty for consistent input.
    pub anomalies: Vec<InventoryAnomaly>,
}

/// A non-fatal inconsistency observed while reconciling counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryAnomaly {
    /// Reservation exceeds the contract total; `available` was floored to 0
    /// and the reserved bar saturated at 100%.
    OverReserved { total: f64, reserved: f64 },
    /// A percentage exceeded 100 before clamping.
    ClampedPercentage { metric: PercentMetric, unclamped: f64 },
}

/// Which derived percentage an anomaly refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentMetric {
    Fixed,
    Settled,
    Reserved,
}

/// Percentage of `part` within `whole`, clamped to `[0, 100]`.
///
/// A denominator of zero (or less) yields 0 rather than a division fault,
/// and a negative numerator never produces a negative display value.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if !part.is_finite() || !whole.is_finite() || whole <= 0.0 {
        return 0.0;
    }
    (part / whole * 100.0).clamp(0.0, 100.0)
}

fn unclamped_percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Reconcile raw counters into a display-ready snapshot.
///
/// Tolerates `reserved > total` (stale or concurrently-updated upstream
/// data) by flooring `available` at zero. The reserved percentage is
/// computed against `max(reserved, total)` so an overbooked bar saturates
/// at exactly 100% instead of exceeding it.
pub fn reconcile(raw: &InventoryCounters) -> InventorySnapshot {
    let mut anomalies = Vec::new();

    let available = (raw.total - raw.reserved).max(0.0);
    if raw.reserved > raw.total {
        anomalies.push(InventoryAnomaly::OverReserved {
            total: raw.total,
            reserved: raw.reserved,
        });
    }

    let fixed_percentage = percentage_of(raw.fixed, raw.total);
    let unclamped_fixed = unclamped_percentage(raw.fixed, raw.total);
    if unclamped_fixed > 100.0 {
        anomalies.push(InventoryAnomaly::ClampedPercentage {
            metric: PercentMetric::Fixed,
            unclamped: unclamped_fixed,
        });
    }

    let settled_percentage = percentage_of(raw.settled, raw.total);
    let unclamped_settled = unclamped_percentage(raw.settled, raw.total);
    if unclamped_settled > 100.0 {
        anomalies.push(InventoryAnomaly::ClampedPercentage {
            metric: PercentMetric::Settled,
            unclamped: unclamped_settled,
        });
    }

    // Overbooked reservations are measured against the larger of the two
    // counters so the bar reads 100%, not 120%.
    let reserved_percentage = if raw.reserved > 0.0 && raw.total > 0.0 {
        percentage_of(raw.reserved, raw.reserved.max(raw.total))
    } else {
        0.0
    };

    InventorySnapshot {
        total: raw.total,
        open: raw.open,
        fixed: raw.fixed,
        reserved: raw.reserved,
        settled: raw.settled,
        unsettled: raw.unsettled,
        available,
        fixed_percentage,
        settled_percentage,
        reserved_percentage,
        anomalies,
    }
}
