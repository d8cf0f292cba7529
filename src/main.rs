use clap::Parser;
use stock_sync::config::{MarketCredentials, OzonCredentials};
use stock_sync::utils::{logger, validation::Validate};
use stock_sync::{CliConfig, OzonClient, Result, SupplyFeed, SyncEngine, SyncTarget, YandexClient};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = CliConfig::parse();
    logger::init(config.verbose);

    tracing::info!("Starting stock-sync");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    match run(&config).await {
        Ok(()) => {
            tracing::info!("✅ Sync run completed successfully");
            println!("✅ Sync run completed successfully");
        }
        Err(e) => {
            tracing::error!("❌ Sync run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(config: &CliConfig) -> Result<()> {
    // Every credential is read before the first network call so a missing
    // variable cannot abort a half-finished upload.
    let ozon = config
        .targets
        .contains(&SyncTarget::Ozon)
        .then(OzonCredentials::from_env)
        .transpose()?;
    let market = config
        .targets
        .contains(&SyncTarget::Market)
        .then(MarketCredentials::from_env)
        .transpose()?;

    let inventory = SupplyFeed::new(&config.supply_url).fetch().await?;

    if let Some(creds) = ozon {
        let engine = SyncEngine::new(OzonClient::new(creds.client_id, creds.api_key));
        engine.run(&inventory).await?;
    }

    if let Some(creds) = market {
        for campaign in [creds.fbs, creds.dbs] {
            let client = YandexClient::new(
                creds.token.clone(),
                campaign.campaign_id,
                campaign.warehouse_id,
            );
            SyncEngine::new(client).run(&inventory).await?;
        }
    }

    Ok(())
}
