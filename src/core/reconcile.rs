use crate::domain::model::{InventoryRecord, OfferId, PriceUpdate, StockContext, StockUpdate};
use crate::utils::error::{Result, SyncError};
use regex::Regex;
use std::collections::HashSet;

/// Stock count reported when the vendor marks a position as ">10".
const AMPLE_STOCK: i64 = 100;

/// Map a raw vendor quantity string to a stock count.
///
/// ">10" means ample stock and is reported as a conservative large number;
/// "1" means the last unit is effectively reserved and is reported as zero.
/// Both rules come from the vendor's sheet conventions and must stay exact.
pub fn normalize_quantity(raw: &str) -> Result<i64> {
    match raw {
        ">10" => Ok(AMPLE_STOCK),
        "1" => Ok(0),
        other => other.parse().map_err(|_| SyncError::Quantity {
            value: raw.to_string(),
        }),
    }
}

/// Reduce a vendor price string to its integral digits.
///
/// The fractional part (everything from the first '.') and any currency
/// text or group separators are dropped: "5'990.00 руб." becomes "5990".
pub fn convert_price(raw: &str) -> String {
    let integral = raw.split('.').next().unwrap_or(raw);
    Regex::new("[^0-9]")
        .expect("static pattern")
        .replace_all(integral, "")
        .into_owned()
}

/// Build the stock-update list for one marketplace.
///
/// Phase one walks the inventory in order and emits an update for every
/// record whose code the catalog knows; duplicate codes are first-match-wins.
/// Phase two emits a zero-quantity update for every catalog offer the
/// inventory did not cover, in listing order. Inputs are never mutated.
pub fn plan_stocks(
    inventory: &[InventoryRecord],
    offer_ids: &[OfferId],
    context: &StockContext,
) -> Result<Vec<StockUpdate>> {
    let known: HashSet<&str> = offer_ids.iter().map(String::as_str).collect();
    let mut matched: HashSet<&str> = HashSet::with_capacity(inventory.len());
    let mut updates = Vec::with_capacity(offer_ids.len());

    for record in inventory {
        let code = record.code.as_str();
        if !known.contains(code) || matched.contains(code) {
            continue;
        }
        updates.push(StockUpdate {
            offer_id: code.to_owned(),
            quantity: normalize_quantity(&record.quantity)?,
            warehouse_id: context.warehouse_id.clone(),
            updated_at: context.updated_at,
        });
        matched.insert(code);
    }

    for offer_id in offer_ids {
        if matched.contains(offer_id.as_str()) {
            continue;
        }
        updates.push(StockUpdate {
            offer_id: offer_id.clone(),
            quantity: 0,
            warehouse_id: context.warehouse_id.clone(),
            updated_at: context.updated_at,
        });
    }

    Ok(updates)
}

/// Build the price-update list for one marketplace.
///
/// Only inventory records matching a catalog offer produce a row; offers
/// absent from the inventory get no price update. Duplicate codes follow
/// the same first-match-wins policy as [`plan_stocks`].
pub fn plan_prices(
    inventory: &[InventoryRecord],
    offer_ids: &[OfferId],
    currency: &str,
) -> Result<Vec<PriceUpdate>> {
    let known: HashSet<&str> = offer_ids.iter().map(String::as_str).collect();
    let mut matched: HashSet<&str> = HashSet::with_capacity(inventory.len());
    let mut updates = Vec::new();

    for record in inventory {
        let code = record.code.as_str();
        if !known.contains(code) || matched.contains(code) {
            continue;
        }
        let value = convert_price(&record.price)
            .parse()
            .map_err(|_| SyncError::Price {
                value: record.price.clone(),
            })?;
        updates.push(PriceUpdate {
            offer_id: code.to_owned(),
            value,
            currency: currency.to_owned(),
        });
        matched.insert(code);
    }

    Ok(updates)
}
