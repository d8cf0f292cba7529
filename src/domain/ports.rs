use crate::domain::model::{OfferId, PriceUpdate, StockContext, StockUpdate};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Seam between the sync engine and a concrete marketplace API.
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Target name used in logs.
    fn label(&self) -> String;

    /// Currency code the platform expects on price rows.
    fn currency(&self) -> &'static str;

    /// Maximum rows per bulk stock call.
    fn stock_batch_size(&self) -> usize;

    /// Maximum rows per bulk price call.
    fn price_batch_size(&self) -> usize;

    /// Extra fields the platform wants on every stock row.
    fn stock_context(&self) -> StockContext {
        StockContext::default()
    }

    /// Complete, de-duplicated offer-id listing in catalog order.
    async fn list_offer_ids(&self) -> Result<Vec<OfferId>>;

    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()>;

    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()>;
}
