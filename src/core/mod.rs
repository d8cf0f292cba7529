pub mod engine;
pub mod reconcile;

pub use crate::domain::model::{
    InventoryRecord, OfferId, PriceUpdate, StockContext, StockPush, StockUpdate,
};
pub use crate::domain::ports::Marketplace;
pub use crate::utils::error::Result;
