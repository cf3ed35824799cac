//! Validation utilities for contract and sub-contract payloads
//!
//! The reconciliation engine itself is total over its inputs (missing or
//! inconsistent numbers are clamped, never rejected); these checks exist
//! so the consuming layer can diagnose suspect payloads explicitly before
//! they reach the display, instead of silently defaulting everything.

use crate::models::RawSubContract;
use crate::reconcile::InventoryCounters;

/// Measurement units the platform trades in. `bu60` is the 60-lb bushel
/// used for most grain contracts.
pub const MEASUREMENT_UNITS: &[&str] = &["bu60", "bu56", "bu48", "cwt", "mt", "lb"];

/// Validate that a measurement unit is one the platform knows.
pub fn validate_measurement_unit(unit: &str) -> Result<(), &'static str> {
    if MEASUREMENT_UNITS.iter().any(|u| u.eq_ignore_ascii_case(unit)) {
        Ok(())
    } else {
        Err("Unknown measurement unit")
    }
}

/// Validate that raw counters are non-negative.
pub fn validate_counters(counters: &InventoryCounters) -> Result<(), &'static str> {
    let values = [
        counters.total,
        counters.open,
        counters.fixed,
        counters.reserved,
        counters.settled,
        counters.unsettled,
    ];
    if values.iter().any(|v| *v < 0.0) {
        return Err("Inventory counters cannot be negative");
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err("Inventory counters must be finite");
    }
    Ok(())
}

/// Check counters against each other. Failures here are advisory: the
/// reconciler still produces a snapshot, but the caller can surface the
/// inconsistency.
pub fn validate_counter_consistency(counters: &InventoryCounters) -> Result<(), &'static str> {
    if counters.reserved > counters.total {
        return Err("Reserved exceeds total inventory");
    }
    if counters.fixed > counters.total {
        return Err("Fixed exceeds total inventory");
    }
    if counters.settled > counters.fixed {
        return Err("Settled exceeds fixed inventory");
    }
    Ok(())
}

/// Validate a raw sub-contract before aggregation.
pub fn validate_sub_contract(sub: &RawSubContract) -> Result<(), &'static str> {
    if sub.id.is_empty() {
        return Err("Sub-contract id is empty");
    }
    if sub.folio.is_empty() {
        return Err("Sub-contract folio is empty");
    }
    if sub.quantity < 0.0 {
        return Err("Sub-contract quantity cannot be negative");
    }
    if sub.thresholds.min_thresholds_weight > sub.thresholds.max_thresholds_weight {
        return Err("Minimum threshold exceeds maximum threshold");
    }
    if sub.inventory.reserved > sub.quantity {
        return Err("Sub-contract reserved exceeds quantity");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_measurement_unit() {
        assert!(validate_measurement_unit("bu60").is_ok());
        assert!(validate_measurement_unit("BU60").is_ok());
        assert!(validate_measurement_unit("mt").is_ok());
        assert!(validate_measurement_unit("barrels").is_err());
        assert!(validate_measurement_unit("").is_err());
    }

    #[test]
    fn test_validate_counters() {
        let counters = InventoryCounters {
            total: 1000.0,
            reserved: 300.0,
            ..Default::default()
        };
        assert!(validate_counters(&counters).is_ok());

        let negative = InventoryCounters {
            total: -1.0,
            ..Default::default()
        };
        assert!(validate_counters(&negative).is_err());
    }

    #[test]
    fn test_counter_consistency() {
        let consistent = InventoryCounters {
            total: 1000.0,
            fixed: 600.0,
            reserved: 300.0,
            settled: 200.0,
            ..Default::default()
        };
        assert!(validate_counter_consistency(&consistent).is_ok());

        let overbooked = InventoryCounters {
            total: 1000.0,
            reserved: 1200.0,
            ..Default::default()
        };
        assert_eq!(
            validate_counter_consistency(&overbooked),
            Err("Reserved exceeds total inventory")
        );
    }

    #[test]
    fn test_validate_sub_contract() {
        let sub: RawSubContract = serde_json::from_str(
            r#"{"_id": "a", "folio": "SPC-46-SUBC-1", "quantity": 400.0,
                "thresholds": {"min_thresholds_weight": 360.0, "max_thresholds_weight": 440.0},
                "inventory": {"reserved": 240.0, "settled": 120.0}}"#,
        )
        .unwrap();
        assert!(validate_sub_contract(&sub).is_ok());

        let overbooked: RawSubContract = serde_json::from_str(
            r#"{"_id": "a", "folio": "SPC-46-SUBC-1", "quantity": 100.0,
                "inventory": {"reserved": 150.0, "settled": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(
            validate_sub_contract(&overbooked),
            Err("Sub-contract reserved exceeds quantity")
        );
    }
}
