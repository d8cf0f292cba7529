use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace-assigned identifier for a seller's product listing.
pub type OfferId = String;

/// One row of the vendor stock sheet. Quantity and price stay raw strings
/// until reconciliation so the sentinel values survive parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub code: String,
    pub quantity: String,
    pub price: String,
}

/// A single stock-count update destined for a marketplace catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub offer_id: OfferId,
    pub quantity: i64,
    pub warehouse_id: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single price update destined for a marketplace catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub offer_id: OfferId,
    pub value: u64,
    pub currency: String,
}

/// Fields a platform wants attached to every stock row beyond the count.
#[derive(Debug, Clone, Default)]
pub struct StockContext {
    pub warehouse_id: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome of one stock upload: the full update list and its non-zero subset.
#[derive(Debug, Clone)]
pub struct StockPush {
    pub all: Vec<StockUpdate>,
    pub non_zero: Vec<StockUpdate>,
}
