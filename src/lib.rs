pub mod config;
pub mod core;
pub mod domain;
pub mod market;
pub mod supply;
pub mod utils;

pub use config::{CliConfig, MarketCredentials, OzonCredentials, SyncTarget};
pub use core::engine::SyncEngine;
pub use domain::model::{InventoryRecord, OfferId, PriceUpdate, StockPush, StockUpdate};
pub use domain::ports::Marketplace;
pub use market::{OzonClient, YandexClient};
pub use supply::SupplyFeed;
pub use utils::error::{Result, SyncError};
