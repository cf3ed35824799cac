//! Paired progress metrics for contract and sub-contract cards
//!
//! A progress bar pairs two metrics over the same total (e.g. delivered
//! vs. reserved quantity). The resolver computes both percentages and
//! decides which metric's color owns the shared boundary indicator when
//! the two land on the same displayed value.

use serde::{Deserialize, Serialize};

use crate::models::SubContractRecord;
use crate::reconcile::{percentage_of, InventorySnapshot};

/// Numeric fields a progress configuration may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Quantity,
    Reserved,
    Unreserved,
    Delivered,
    Balance,
    Price,
    Basis,
    Future,
    Total,
    Open,
    Fixed,
    Settled,
    Unsettled,
    Available,
}

/// Source of numeric values for progress resolution.
///
/// Both contracts (via their reconciled snapshot) and sub-contract records
/// plug in here, so one bar configuration serves every card variant.
pub trait FieldSource {
    /// Value for `key`, or `None` when the field does not apply.
    fn field(&self, key: FieldKey) -> Option<f64>;
}

impl FieldSource for SubContractRecord {
    fn field(&self, key: FieldKey) -> Option<f64> {
        use rust_decimal::prelude::ToPrimitive;
        match key {
            FieldKey::Quantity => Some(self.quantity),
            FieldKey::Reserved => Some(self.reserved),
            FieldKey::Unreserved => Some(self.unreserved),
            FieldKey::Delivered | FieldKey::Settled => Some(self.delivered),
            FieldKey::Balance => Some(self.balance),
            FieldKey::Price => self.price.to_f64(),
            FieldKey::Basis => self.basis.to_f64(),
            FieldKey::Future => self.future.to_f64(),
            _ => None,
        }
    }
}

impl FieldSource for InventorySnapshot {
    fn field(&self, key: FieldKey) -> Option<f64> {
        match key {
            FieldKey::Total => Some(self.total),
            FieldKey::Open => Some(self.open),
            FieldKey::Fixed => Some(self.fixed),
            FieldKey::Reserved => Some(self.reserved),
            FieldKey::Settled | FieldKey::Delivered => Some(self.settled),
            FieldKey::Unsettled => Some(self.unsettled),
            FieldKey::Available => Some(self.available),
            _ => None,
        }
    }
}

/// Declarative descriptor pairing a display label with a numeric field.
/// Set at configuration time, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressField {
    pub key: FieldKey,
    pub label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

/// Display format for a configured field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Currency,
}

/// The two competing metrics of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSide {
    Settled,
    Reserved,
}

/// Configuration of a paired progress bar.
///
/// `color_priority` names the metric that wins visual precedence when the
/// two percentages display as equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressBarSpec {
    pub settled_field: FieldKey,
    pub reserved_field: FieldKey,
    pub total_field: FieldKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color_priority: MetricSide,
}

/// Resolved progress values for one source record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressResolution {
    /// Settled-metric percentage of the total field.
    pub left_pct: f64,
    /// Reserved-metric percentage of the total field.
    pub right_pct: f64,
    /// Metric whose color is applied to the shared boundary indicator.
    pub color_winner: MetricSide,
}

/// Compute both percentages and resolve the boundary color.
///
/// Percentages are compared at the integer display precision: if both
/// round to the same whole percentage the configured `color_priority`
/// metric wins, which prevents ambiguous two-color rendering at parity
/// points (e.g. both metrics at 60%). Otherwise the further-along metric
/// wins. Missing fields read as zero.
pub fn resolve<S: FieldSource>(spec: &ProgressBarSpec, source: &S) -> ProgressResolution {
    let total = source.field(spec.total_field).unwrap_or(0.0);
    let left_pct = percentage_of(source.field(spec.settled_field).unwrap_or(0.0), total);
    let right_pct = percentage_of(source.field(spec.reserved_field).unwrap_or(0.0), total);

    let color_winner = if left_pct.round() == right_pct.round() {
        spec.color_priority
    } else if left_pct > right_pct {
        MetricSide::Settled
    } else {
        MetricSide::Reserved
    };

    ProgressResolution {
        left_pct,
        right_pct,
        color_winner,
    }
}
