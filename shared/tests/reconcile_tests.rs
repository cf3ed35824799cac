//! Inventory reconciliation tests
//!
//! Covers the reconciler's clamping guarantees:
//! - Property 1: Available Quantity Flooring
//! - Property 2: Percentage Range Safety
//! - Property 3: Overbooked Reservation Saturation
//! - Property 4: Tie-Break Determinism

use proptest::prelude::*;
use shared::progress::{resolve, FieldKey, MetricSide, ProgressBarSpec};
use shared::reconcile::{percentage_of, reconcile, InventoryAnomaly, InventoryCounters};

fn progress_spec(priority: MetricSide) -> ProgressBarSpec {
    ProgressBarSpec {
        settled_field: FieldKey::Delivered,
        reserved_field: FieldKey::Reserved,
        total_field: FieldKey::Quantity,
        label: None,
        color_priority: priority,
    }
}

fn sub_contract_record(quantity: f64, reserved: f64, delivered: f64) -> shared::SubContractRecord {
    let json = format!(
        r#"[{{"_id": "x", "folio": "SPC-46-SUBC-1", "quantity": {quantity},
             "inventory": {{"reserved": {reserved}, "settled": {delivered}}}}}]"#
    );
    shared::normalize_json(&json).remove(0)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Scenario: total=1000, reserved=1200.
    #[test]
    fn test_overbooked_contract_floors_available_and_saturates_bar() {
        let snapshot = reconcile(&InventoryCounters {
            total: 1000.0,
            reserved: 1200.0,
            ..Default::default()
        });
        assert_eq!(snapshot.available, 0.0);
        assert_eq!(snapshot.reserved_percentage, 100.0);
        assert!(matches!(
            snapshot.anomalies[0],
            InventoryAnomaly::OverReserved { total, reserved }
                if total == 1000.0 && reserved == 1200.0
        ));
    }

    /// Scenario: quantity=400, reserved=240, delivered=240, priority=settled.
    #[test]
    fn test_tie_at_sixty_percent_goes_to_settled() {
        let record = sub_contract_record(400.0, 240.0, 240.0);
        let resolved = resolve(&progress_spec(MetricSide::Settled), &record);
        assert_eq!(resolved.left_pct, 60.0);
        assert_eq!(resolved.right_pct, 60.0);
        assert_eq!(resolved.color_winner, MetricSide::Settled);
    }

    #[test]
    fn test_all_counters_absent_is_all_zeros() {
        let raw: InventoryCounters = serde_json::from_str("{}").unwrap();
        let snapshot = reconcile(&raw);
        assert_eq!(snapshot.available, 0.0);
        assert_eq!(snapshot.fixed_percentage, 0.0);
        assert_eq!(snapshot.settled_percentage, 0.0);
        assert_eq!(snapshot.reserved_percentage, 0.0);
        assert!(snapshot.anomalies.is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for quantities in the contract range seen in production.
    fn quantity_strategy() -> impl Strategy<Value = f64> {
        0.0..1_000_000.0f64
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property 1: available = max(0, total - reserved), never negative
        #[test]
        fn prop_available_is_floored(
            total in quantity_strategy(),
            reserved in quantity_strategy()
        ) {
            let snapshot = reconcile(&InventoryCounters {
                total,
                reserved,
                ..Default::default()
            });
            prop_assert!(snapshot.available >= 0.0);
            prop_assert_eq!(snapshot.available, (total - reserved).max(0.0));
        }

        /// Property 2: percentage_of stays in [0, 100]; zero denominator
        /// yields zero for any numerator
        #[test]
        fn prop_percentage_in_range(
            part in -1_000_000.0..1_000_000.0f64,
            whole in quantity_strategy()
        ) {
            let pct = percentage_of(part, whole);
            prop_assert!((0.0..=100.0).contains(&pct));
            prop_assert_eq!(percentage_of(part, 0.0), 0.0);
        }

        /// Property 2 (derived metrics): every snapshot percentage is in range
        #[test]
        fn prop_snapshot_percentages_in_range(
            total in quantity_strategy(),
            fixed in quantity_strategy(),
            reserved in quantity_strategy(),
            settled in quantity_strategy()
        ) {
            let snapshot = reconcile(&InventoryCounters {
                total,
                fixed,
                reserved,
                settled,
                ..Default::default()
            });
            for pct in [
                snapshot.fixed_percentage,
                snapshot.settled_percentage,
                snapshot.reserved_percentage,
            ] {
                prop_assert!((0.0..=100.0).contains(&pct));
            }
        }

        /// Property 3: reserved > total > 0 saturates the reserved bar at 100
        #[test]
        fn prop_overbooked_reservation_saturates(
            total in 1.0..1_000_000.0f64,
            excess in 1.0..1_000_000.0f64
        ) {
            let snapshot = reconcile(&InventoryCounters {
                total,
                reserved: total + excess,
                ..Default::default()
            });
            prop_assert_eq!(snapshot.reserved_percentage, 100.0);
            prop_assert!(!snapshot.anomalies.is_empty());
        }

        /// Property 4: on a rounded tie the configured priority metric wins,
        /// independent of which side carries which value
        #[test]
        fn prop_tie_break_is_deterministic(
            quantity in 1.0..1_000_000.0f64,
            ratio in 0.0..1.0f64
        ) {
            let level = quantity * ratio;
            let record = sub_contract_record(quantity, level, level);

            let settled_first = resolve(&progress_spec(MetricSide::Settled), &record);
            prop_assert_eq!(settled_first.color_winner, MetricSide::Settled);

            let reserved_first = resolve(&progress_spec(MetricSide::Reserved), &record);
            prop_assert_eq!(reserved_first.color_winner, MetricSide::Reserved);
        }
    }
}
