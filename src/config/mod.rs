use crate::supply::DEFAULT_SUPPLY_URL;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "stock-sync")]
#[command(about = "Sync vendor stock and prices into marketplace catalogs")]
pub struct CliConfig {
    /// Vendor feed archive URL.
    #[arg(long, default_value = DEFAULT_SUPPLY_URL)]
    pub supply_url: String,

    /// Marketplaces to sync, comma-separated.
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = vec![SyncTarget::Ozon, SyncTarget::Market])]
    pub targets: Vec<SyncTarget>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("supply_url", &self.supply_url)?;
        if self.targets.is_empty() {
            return Err(SyncError::InvalidConfigValue {
                field: "targets".to_string(),
                value: String::new(),
                reason: "At least one target is required".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SyncTarget {
    /// Ozon seller account.
    Ozon,
    /// Both Yandex Market campaigns (FBS and DBS).
    Market,
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncTarget::Ozon => write!(f, "ozon"),
            SyncTarget::Market => write!(f, "market"),
        }
    }
}

/// Ozon seller credentials.
#[derive(Debug, Clone)]
pub struct OzonCredentials {
    pub client_id: String,
    pub api_key: String,
}

impl OzonCredentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: require_env("CLIENT_ID")?,
            api_key: require_env("SELLER_TOKEN")?,
        })
    }
}

/// One Yandex Market campaign and the warehouse its stock rows bind to.
#[derive(Debug, Clone)]
pub struct CampaignCredentials {
    pub campaign_id: String,
    pub warehouse_id: String,
}

/// Yandex Market token plus both campaigns served by one run.
#[derive(Debug, Clone)]
pub struct MarketCredentials {
    pub token: String,
    pub fbs: CampaignCredentials,
    pub dbs: CampaignCredentials,
}

impl MarketCredentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: require_env("MARKET_TOKEN")?,
            fbs: CampaignCredentials {
                campaign_id: require_env("FBS_ID")?,
                warehouse_id: require_env("WAREHOUSE_FBS_ID")?,
            },
            dbs: CampaignCredentials {
                campaign_id: require_env("DBS_ID")?,
                warehouse_id: require_env("WAREHOUSE_DBS_ID")?,
            },
        })
    }
}

/// Read one required variable; empty values count as missing so a blank
/// export in the scheduler environment cannot slip through.
fn require_env(name: &str) -> Result<String> {
    let value = env::var(name).map_err(|_| SyncError::MissingEnv {
        name: name.to_string(),
    })?;
    validate_non_empty_string(name, &value)?;
    Ok(value)
}
