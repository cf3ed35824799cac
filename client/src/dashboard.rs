//! Contract detail view assembly
//!
//! The one place where fetched data meets the shared engine: reconcile the
//! contract's counters, normalize the fetched sub-contracts, resolve each
//! card's progress bar, and build the allocation ring. Reconciliation
//! anomalies and overbooked sub-contracts are logged here so they are
//! observable without interrupting the view.

use serde::{Deserialize, Serialize};

use shared::allocation::{build_chart, AllocationChart};
use shared::models::{Contract, RawSubContract, SubContractRecord};
use shared::progress::{
    resolve, FieldKey, MetricSide, ProgressBarSpec, ProgressField, ProgressResolution, ValueFormat,
};
use shared::reconcile::{reconcile, InventorySnapshot};

/// Display-ready bundle for one contract detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDashboard {
    pub folio: String,
    pub seller_address: String,
    pub snapshot: InventorySnapshot,
    pub cards: Vec<SubContractCard>,
    pub chart: AllocationChart,
}

/// One sub-contract card: the normalized record plus its resolved bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubContractCard {
    pub record: SubContractRecord,
    pub progress: ProgressResolution,
}

/// Field configuration of the sub-contract card grid.
pub fn default_field_config() -> Vec<ProgressField> {
    let currency = |key, label: &str| ProgressField {
        key,
        label: label.to_string(),
        color: "black".to_string(),
        unit: None,
        format: Some(ValueFormat::Currency),
    };
    let quantity = |key, label: &str, color: &str| ProgressField {
        key,
        label: label.to_string(),
        color: color.to_string(),
        unit: Some("bu60".to_string()),
        format: None,
    };
    vec![
        currency(FieldKey::Price, "Price"),
        currency(FieldKey::Basis, "Basis"),
        currency(FieldKey::Future, "Future"),
        quantity(FieldKey::Reserved, "Reserved", "blue"),
        quantity(FieldKey::Delivered, "Settled", "green"),
        quantity(FieldKey::Balance, "Your Balance", "black"),
    ]
}

/// Progress bar configuration for sub-contract cards: delivered vs.
/// reserved over the card's quantity, green winning ties.
pub fn default_progress_spec() -> ProgressBarSpec {
    ProgressBarSpec {
        settled_field: FieldKey::Delivered,
        reserved_field: FieldKey::Reserved,
        total_field: FieldKey::Quantity,
        label: Some("Progress".to_string()),
        color_priority: MetricSide::Settled,
    }
}

/// Assemble the detail page bundle from a contract and its fetched
/// sub-contract list.
pub fn compose(
    contract: &Contract,
    raw_subs: &[RawSubContract],
    seller_address: String,
) -> ContractDashboard {
    let snapshot = reconcile(&contract.inventory);
    for anomaly in &snapshot.anomalies {
        tracing::warn!(folio = %contract.folio, ?anomaly, "inventory clamp applied");
    }

    let records = shared::models::normalize(raw_subs);
    for record in records.iter().filter(|r| r.is_overbooked()) {
        tracing::warn!(
            folio = %record.contract_number,
            unreserved = record.unreserved,
            "sub-contract reserved beyond its quantity"
        );
    }

    let chart = build_chart(&records, contract.inventory.fixed);
    let spec = default_progress_spec();
    let cards = records
        .into_iter()
        .map(|record| {
            let progress = resolve(&spec, &record);
            SubContractCard { record, progress }
        })
        .collect();

    ContractDashboard {
        folio: contract.folio.clone(),
        seller_address,
        snapshot,
        cards,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::parse_sub_contract_list;

    fn contract() -> Contract {
        serde_json::from_str(
            r#"{
                "_id": "665f1c2e9b3a", "folio": "SPC-46", "type": "purchase",
                "quantity": 25000.0,
                "inventory": {"total": 25000.0, "open": 10000.0, "fixed": 15000.0,
                               "reserved": 6000.0, "settled": 4000.0, "unsettled": 11000.0}
            }"#,
        )
        .unwrap()
    }

    fn raw_subs() -> Vec<RawSubContract> {
        let value: serde_json::Value = serde_json::from_str(
            r#"[
                {"_id": "s1", "folio": "SPC-46-SUBC-1", "quantity": 4000.0,
                 "inventory": {"reserved": 1500.0, "settled": 1500.0}},
                {"_id": "s2", "folio": "SPC-46-SUBC-2", "quantity": 6000.0,
                 "inventory": {"reserved": 3000.0, "settled": 1000.0}},
                {"_id": "s3", "folio": "SPC-46-SUBC-3", "quantity": 2000.0,
                 "inventory": {"reserved": 0.0, "settled": 0.0}}
            ]"#,
        )
        .unwrap();
        parse_sub_contract_list(&value)
    }

    #[test]
    fn test_compose_builds_full_bundle() {
        let dashboard = compose(&contract(), &raw_subs(), "123 Grain Rd".to_string());

        assert_eq!(dashboard.folio, "SPC-46");
        assert_eq!(dashboard.snapshot.fixed_percentage, 60.0);
        assert_eq!(dashboard.cards.len(), 3);
        // Zero-reserved sub-contract keeps its card but no chart slice.
        assert_eq!(dashboard.chart.segments.len(), 2);
        assert_eq!(dashboard.chart.total_percentage, 30.0);
    }

    #[test]
    fn test_compose_resolves_tied_card_to_settled() {
        let dashboard = compose(&contract(), &raw_subs(), String::new());
        let tied = &dashboard.cards[0];
        assert_eq!(tied.progress.left_pct, 37.5);
        assert_eq!(tied.progress.right_pct, 37.5);
        assert_eq!(tied.progress.color_winner, MetricSide::Settled);
    }

    #[test]
    fn test_compose_with_empty_sub_contracts() {
        let dashboard = compose(&contract(), &[], "pending".to_string());
        assert!(dashboard.cards.is_empty());
        assert!(dashboard.chart.segments.is_empty());
        assert_eq!(dashboard.chart.total_percentage, 0.0);
        assert_eq!(dashboard.seller_address, "pending");
    }
}
