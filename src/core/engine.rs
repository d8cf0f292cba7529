use crate::core::reconcile::{plan_prices, plan_stocks};
use crate::domain::model::{InventoryRecord, PriceUpdate, StockPush};
use crate::domain::ports::Marketplace;
use crate::utils::error::Result;

/// Drives one marketplace through the list -> reconcile -> chunk -> submit
/// cycle. Holds no state beyond the adapter itself; one engine per target.
pub struct SyncEngine<M: Marketplace> {
    market: M,
}

impl<M: Marketplace> SyncEngine<M> {
    pub fn new(market: M) -> Self {
        Self { market }
    }

    /// Reconcile stock counts against the catalog and submit them in
    /// platform-sized batches. Returns the full update list together with
    /// its non-zero subset.
    pub async fn push_stocks(&self, inventory: &[InventoryRecord]) -> Result<StockPush> {
        let label = self.market.label();
        let offer_ids = self.market.list_offer_ids().await?;
        tracing::info!("{label}: {} offers in catalog", offer_ids.len());

        let updates = plan_stocks(inventory, &offer_ids, &self.market.stock_context())?;
        for batch in updates.chunks(self.market.stock_batch_size()) {
            self.market.submit_stocks(batch).await?;
        }
        tracing::info!("{label}: submitted {} stock rows", updates.len());

        let non_zero = updates.iter().filter(|u| u.quantity != 0).cloned().collect();
        Ok(StockPush {
            all: updates,
            non_zero,
        })
    }

    /// Reconcile prices against the catalog and submit them in
    /// platform-sized batches. Returns the submitted list.
    pub async fn push_prices(&self, inventory: &[InventoryRecord]) -> Result<Vec<PriceUpdate>> {
        let label = self.market.label();
        let offer_ids = self.market.list_offer_ids().await?;
        let updates = plan_prices(inventory, &offer_ids, self.market.currency())?;
        for batch in updates.chunks(self.market.price_batch_size()) {
            self.market.submit_prices(batch).await?;
        }
        tracing::info!("{label}: submitted {} price rows", updates.len());
        Ok(updates)
    }

    /// Full stock-then-price sync against this marketplace. Any failed
    /// call aborts the run; already-sent batches stay applied.
    pub async fn run(&self, inventory: &[InventoryRecord]) -> Result<()> {
        let push = self.push_stocks(inventory).await?;
        tracing::info!(
            "{}: {} of {} positions in stock",
            self.market.label(),
            push.non_zero.len(),
            push.all.len()
        );
        self.push_prices(inventory).await?;
        Ok(())
    }
}
