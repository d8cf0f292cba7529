use crate::domain::model::{OfferId, PriceUpdate, StockContext, StockUpdate};
use crate::domain::ports::Marketplace;
use crate::market::dedup_offer_ids;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.partner.market.yandex.ru";

/// Page size for the offer-mapping listing endpoint.
const LIST_PAGE_LIMIT: u32 = 200;
/// Bulk-update row limits documented by the platform.
const STOCK_BATCH: usize = 2000;
const PRICE_BATCH: usize = 500;

/// Yandex Market Partner API client for one campaign. Stock rows are bound
/// to the campaign's warehouse; every call carries the OAuth bearer token.
pub struct YandexClient {
    http: Client,
    base_url: String,
    token: String,
    campaign_id: String,
    warehouse_id: String,
}

impl YandexClient {
    pub fn new(
        token: impl Into<String>,
        campaign_id: impl Into<String>,
        warehouse_id: impl Into<String>,
    ) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token, campaign_id, warehouse_id)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        campaign_id: impl Into<String>,
        warehouse_id: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
            campaign_id: campaign_id.into(),
            warehouse_id: warehouse_id.into(),
        }
    }

    fn campaign_url(&self, suffix: &str) -> String {
        format!("{}/campaigns/{}/{}", self.base_url, self.campaign_id, suffix)
    }

    async fn mapping_page(&self, page_token: &str) -> Result<MappingPage> {
        let response = self
            .http
            .get(self.campaign_url("offer-mapping-entries"))
            .bearer_auth(&self.token)
            .query(&[("page_token", page_token)])
            .query(&[("limit", LIST_PAGE_LIMIT)])
            .send()
            .await?
            .error_for_status()?;
        let body: MappingResponse = response.json().await?;
        Ok(body.result)
    }
}

#[derive(Debug, Deserialize)]
struct MappingResponse {
    result: MappingPage,
}

#[derive(Debug, Default, Deserialize)]
struct MappingPage {
    #[serde(default)]
    paging: Paging,
    #[serde(default, rename = "offerMappingEntries")]
    entries: Vec<MappingEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct Paging {
    #[serde(default, rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MappingEntry {
    offer: OfferInfo,
}

#[derive(Debug, Deserialize)]
struct OfferInfo {
    #[serde(rename = "shopSku")]
    shop_sku: OfferId,
}

#[derive(Debug, Serialize)]
struct SkuStocks<'a> {
    sku: &'a str,
    #[serde(rename = "warehouseId")]
    warehouse_id: &'a str,
    items: [StockItem; 1],
}

#[derive(Debug, Serialize)]
struct StockItem {
    count: i64,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

#[derive(Debug, Serialize)]
struct OfferPrice<'a> {
    id: &'a str,
    price: PriceBody<'a>,
}

#[derive(Debug, Serialize)]
struct PriceBody<'a> {
    value: u64,
    #[serde(rename = "currencyId")]
    currency_id: &'a str,
}

#[async_trait]
impl Marketplace for YandexClient {
    fn label(&self) -> String {
        format!("yandex-market/{}", self.campaign_id)
    }

    fn currency(&self) -> &'static str {
        "RUR"
    }

    fn stock_batch_size(&self) -> usize {
        STOCK_BATCH
    }

    fn price_batch_size(&self) -> usize {
        PRICE_BATCH
    }

    fn stock_context(&self) -> StockContext {
        StockContext {
            warehouse_id: Some(self.warehouse_id.clone()),
            updated_at: Some(Utc::now()),
        }
    }

    async fn list_offer_ids(&self) -> Result<Vec<OfferId>> {
        let mut ids = Vec::new();
        let mut page_token = String::new();
        loop {
            let page = self.mapping_page(&page_token).await?;
            ids.extend(page.entries.into_iter().map(|entry| entry.offer.shop_sku));
            match page.paging.next_page_token {
                Some(token) if !token.is_empty() => page_token = token,
                _ => break,
            }
        }
        Ok(dedup_offer_ids(ids))
    }

    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()> {
        let rows: Vec<SkuStocks> = batch
            .iter()
            .map(|update| SkuStocks {
                sku: &update.offer_id,
                warehouse_id: update.warehouse_id.as_deref().unwrap_or(&self.warehouse_id),
                items: [StockItem {
                    count: update.quantity,
                    kind: "FIT",
                    updated_at: update
                        .updated_at
                        .unwrap_or_else(Utc::now)
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                }],
            })
            .collect();
        self.http
            .put(self.campaign_url("offers/stocks"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "skus": rows }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()> {
        let rows: Vec<OfferPrice> = batch
            .iter()
            .map(|update| OfferPrice {
                id: &update.offer_id,
                price: PriceBody {
                    value: update.value,
                    currency_id: &update.currency,
                },
            })
            .collect();
        self.http
            .post(self.campaign_url("offer-prices/updates"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "offers": rows }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
