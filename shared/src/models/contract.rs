//! Contract models matching the CRM wire format

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::reconcile::InventoryCounters;

/// A purchase or sale contract as fetched from the CRM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    #[serde(rename = "_id")]
    pub id: String,
    pub folio: String,
    #[serde(rename = "type", default)]
    pub kind: ContractKind,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contract_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub commodity: Option<Commodity>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub measurement_unit: Option<String>,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub price_schedule: Vec<PriceSchedule>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub inventory: InventoryCounters,
}

impl Contract {
    /// First participant with the given role, if any.
    pub fn participant(&self, role: ParticipantRole) -> Option<&Participant> {
        self.participants.iter().find(|p| p.role == role)
    }

    /// The leading price schedule entry drives the displayed pricing.
    pub fn price_info(&self) -> Option<&PriceSchedule> {
        self.price_schedule.first()
    }
}

/// Whether a contract buys or sells the commodity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    #[default]
    Purchase,
    Sale,
}

/// The traded commodity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commodity {
    pub name: String,
}

/// A party on a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub people_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub role: ParticipantRole,
}

/// Role of a contract participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Buyer,
    Seller,
    #[serde(other)]
    Other,
}

/// One entry of a contract's price schedule.
///
/// `basis` and `future_price` are the commodity-pricing components (spread
/// over the futures price); `price` is the resulting flat price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSchedule {
    #[serde(default)]
    pub basis: Decimal,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub future_price: Decimal,
    #[serde(default)]
    pub pricing_type: PricingType,
}

/// How a price schedule entry is priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingType {
    #[default]
    Basis,
    Fixed,
}

/// Delivery weight tolerance band for a contract or sub-contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Thresholds {
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_thresholds_weight: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_thresholds_weight: f64,
}
