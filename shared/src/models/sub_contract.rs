//! Sub-contract models and aggregation
//!
//! A sub-contract is a child allocation drawing down a portion of a parent
//! contract's fixed/reserved quantity. The CRM returns them in a nested
//! wire shape; [`normalize`] is the single translation point into the flat
//! [`SubContractRecord`] consumed by the progress resolver and the
//! allocation chart builder.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::contract::{PriceSchedule, Thresholds};
use crate::types::{palette_color, DisplayColor};

/// A sub-contract as returned by the sub-contract list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawSubContract {
    #[serde(rename = "_id")]
    pub id: String,
    pub folio: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[serde(default)]
    pub measurement_unit: Option<String>,
    #[serde(default)]
    #[validate]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub price_schedule: Vec<PriceSchedule>,
    #[serde(default)]
    pub inventory: SubContractInventory,
    #[serde(default)]
    pub inventory_value: Option<InventoryValue>,
    /// Flat fallback some CRM tenants send instead of `inventory_value`.
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

/// Quantity counters nested under a raw sub-contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubContractInventory {
    #[serde(default)]
    pub reserved: f64,
    #[serde(default)]
    pub settled: f64,
}

/// Monetary aggregate nested under a raw sub-contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryValue {
    #[serde(default)]
    pub total: Decimal,
}

/// Normalized sub-contract shape consumed by progress bars and the
/// allocation chart. Rebuilt wholesale on every fetch of the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubContractRecord {
    pub id: String,
    pub contract_number: String,
    pub quantity: f64,
    pub reserved: f64,
    /// `quantity - reserved`, deliberately unclamped: a negative value
    /// surfaces an overbooked sub-contract instead of hiding it.
    pub unreserved: f64,
    pub delivered: f64,
    /// `quantity - delivered`, the holder's remaining balance.
    pub balance: f64,
    pub measurement_unit: Option<String>,
    pub thresholds: Thresholds,
    pub basis: Decimal,
    pub price: Decimal,
    pub future: Decimal,
    pub total_payment: Decimal,
    pub color: DisplayColor,
}

impl SubContractRecord {
    /// True when upstream reserved more than the sub-contract's quantity.
    pub fn is_overbooked(&self) -> bool {
        self.unreserved < 0.0
    }
}

/// Flatten raw sub-contracts into display-ready records.
///
/// Total payment prefers the explicit `inventory_value.total` aggregate,
/// falls back to the flat `total_price` field, else zero. Colors are
/// assigned by cyclic palette index keyed to list position.
pub fn normalize(raw: &[RawSubContract]) -> Vec<SubContractRecord> {
    raw.iter()
        .enumerate()
        .map(|(index, sub)| {
            let price_info = sub.price_schedule.first().cloned().unwrap_or_default();
            let total_payment = sub
                .inventory_value
                .map(|v| v.total)
                .or(sub.total_price)
                .unwrap_or(Decimal::ZERO);
            SubContractRecord {
                id: sub.id.clone(),
                contract_number: sub.folio.clone(),
                quantity: sub.quantity,
                reserved: sub.inventory.reserved,
                unreserved: sub.quantity - sub.inventory.reserved,
                delivered: sub.inventory.settled,
                balance: sub.quantity - sub.inventory.settled,
                measurement_unit: sub.measurement_unit.clone(),
                thresholds: sub.thresholds,
                basis: price_info.basis,
                price: price_info.price,
                future: price_info.future_price,
                total_payment,
                color: palette_color(index),
            }
        })
        .collect()
}

/// Parse a sub-contract list payload, skipping malformed entries.
///
/// The endpoint occasionally returns records missing required identifiers;
/// those are dropped rather than failing the whole list.
pub fn parse_sub_contract_list(value: &serde_json::Value) -> Vec<RawSubContract> {
    match value.as_array() {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

/// Normalize directly from a JSON payload string.
///
/// Empty or malformed input yields an empty list, never a fault.
pub fn normalize_json(json: &str) -> Vec<SubContractRecord> {
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(value) => normalize(&parse_sub_contract_list(&value)),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const WIRE_SUB: &str = r#"{
        "_id": "665f1c2e0001",
        "folio": "SPC-46-SUBC-1",
        "quantity": 400.0,
        "measurement_unit": "bu60",
        "thresholds": {"min_thresholds_weight": 360.0, "max_thresholds_weight": 440.0},
        "price_schedule": [{"basis": 1500, "price": 2000, "future_price": 101.25, "pricing_type": "basis"}],
        "inventory": {"reserved": 240.0, "settled": 120.0},
        "inventory_value": {"total": 800000}
    }"#;

    #[test]
    fn test_normalize_flattens_nested_fields() {
        let raw: RawSubContract = serde_json::from_str(WIRE_SUB).unwrap();
        let records = normalize(&[raw]);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.contract_number, "SPC-46-SUBC-1");
        assert_eq!(record.reserved, 240.0);
        assert_eq!(record.delivered, 120.0);
        assert_eq!(record.unreserved, 160.0);
        assert_eq!(record.balance, 280.0);
        assert_eq!(record.price, Decimal::from(2000));
        assert_eq!(record.future, Decimal::new(10125, 2));
        assert_eq!(record.total_payment, Decimal::from(800000));
    }

    #[test]
    fn test_total_payment_fallback_chain() {
        let mut raw: RawSubContract = serde_json::from_str(WIRE_SUB).unwrap();
        raw.inventory_value = None;
        raw.total_price = Some(Decimal::from(750000));
        assert_eq!(normalize(&[raw.clone()])[0].total_payment, Decimal::from(750000));

        raw.total_price = None;
        assert_eq!(normalize(&[raw])[0].total_payment, Decimal::ZERO);
    }

    #[test]
    fn test_overbooked_sub_contract_surfaces_negative_unreserved() {
        let json = r#"[{"_id": "x", "folio": "SPC-1-SUBC-1", "quantity": 100.0,
                        "inventory": {"reserved": 150.0, "settled": 0.0}}]"#;
        let records = normalize_json(json);
        assert_eq!(records[0].unreserved, -50.0);
        assert!(records[0].is_overbooked());
    }

    #[test]
    fn test_colors_cycle_by_position() {
        let raws: Vec<RawSubContract> = (0..12)
            .map(|i| {
                serde_json::from_str(&format!(
                    r#"{{"_id": "{i}", "folio": "SPC-46-SUBC-{i}", "quantity": 100.0}}"#
                ))
                .unwrap()
            })
            .collect();
        let records = normalize(&raws);
        assert_eq!(records[0].color, records[10].color);
        assert_ne!(records[0].color, records[1].color);
    }

    #[test]
    fn test_malformed_input_yields_empty_list() {
        assert!(normalize_json("").is_empty());
        assert!(normalize_json("not json").is_empty());
        assert!(normalize_json(r#"{"data": "unexpected"}"#).is_empty());
        assert!(normalize_json("[]").is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"[
            {"_id": "a", "folio": "SPC-46-SUBC-1", "quantity": 100.0},
            {"quantity": "missing ids"},
            {"_id": "b", "folio": "SPC-46-SUBC-2"}
        ]"#;
        let records = normalize_json(json);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].quantity, 0.0);
    }
}
