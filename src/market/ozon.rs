use crate::domain::model::{OfferId, PriceUpdate, StockUpdate};
use crate::domain::ports::Marketplace;
use crate::market::dedup_offer_ids;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api-seller.ozon.ru";

/// Page size for the product listing endpoint.
const LIST_PAGE_LIMIT: u32 = 1000;
/// Bulk-update row limits documented by the platform.
const STOCK_BATCH: usize = 100;
const PRICE_BATCH: usize = 1000;

/// Ozon Seller API client. Authenticates every call with the
/// Client-Id / Api-Key header pair.
pub struct OzonClient {
    http: Client,
    base_url: String,
    client_id: String,
    api_key: String,
}

impl OzonClient {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, client_id, api_key)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header("Client-Id", &self.client_id)
            .header("Api-Key", &self.api_key)
    }

    async fn product_page(&self, last_id: &str) -> Result<ProductPage> {
        let payload = serde_json::json!({
            "filter": { "visibility": "ALL" },
            "last_id": last_id,
            "limit": LIST_PAGE_LIMIT,
        });
        let response = self
            .post("/v2/product/list")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        let body: ProductListResponse = response.json().await?;
        Ok(body.result)
    }
}

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    result: ProductPage,
}

#[derive(Debug, Default, Deserialize)]
struct ProductPage {
    #[serde(default)]
    items: Vec<ProductEntry>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    last_id: String,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    offer_id: OfferId,
}

#[derive(Debug, Serialize)]
struct StockRow<'a> {
    offer_id: &'a str,
    stock: i64,
}

#[derive(Debug, Serialize)]
struct PriceRow<'a> {
    auto_action_enabled: &'a str,
    currency_code: &'a str,
    offer_id: &'a str,
    old_price: &'a str,
    price: String,
}

#[async_trait]
impl Marketplace for OzonClient {
    fn label(&self) -> String {
        "ozon".to_string()
    }

    fn currency(&self) -> &'static str {
        "RUB"
    }

    fn stock_batch_size(&self) -> usize {
        STOCK_BATCH
    }

    fn price_batch_size(&self) -> usize {
        PRICE_BATCH
    }

    async fn list_offer_ids(&self) -> Result<Vec<OfferId>> {
        let mut ids = Vec::new();
        let mut last_id = String::new();
        loop {
            let page = self.product_page(&last_id).await?;
            let fetched = page.items.len();
            ids.extend(page.items.into_iter().map(|item| item.offer_id));
            // Stop at the reported total; an empty page means a stuck cursor.
            if fetched == 0 || ids.len() as u64 >= page.total {
                break;
            }
            last_id = page.last_id;
        }
        Ok(dedup_offer_ids(ids))
    }

    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()> {
        let rows: Vec<StockRow> = batch
            .iter()
            .map(|update| StockRow {
                offer_id: &update.offer_id,
                stock: update.quantity,
            })
            .collect();
        self.post("/v1/product/import/stocks")
            .json(&serde_json::json!({ "stocks": rows }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()> {
        let rows: Vec<PriceRow> = batch
            .iter()
            .map(|update| PriceRow {
                auto_action_enabled: "UNKNOWN",
                currency_code: &update.currency,
                offer_id: &update.offer_id,
                old_price: "0",
                price: update.value.to_string(),
            })
            .collect();
        self.post("/v1/product/import/prices")
            .json(&serde_json::json!({ "prices": rows }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SyncError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> OzonClient {
        OzonClient::with_base_url(server.base_url(), "client-1", "key-1")
    }

    #[tokio::test]
    async fn test_listing_follows_cursor_until_total() {
        let server = MockServer::start();

        let first_page = server.mock(|when, then| {
            when.method(POST)
                .path("/v2/product/list")
                .header("Client-Id", "client-1")
                .header("Api-Key", "key-1")
                .json_body(json!({
                    "filter": { "visibility": "ALL" },
                    "last_id": "",
                    "limit": 1000,
                }));
            then.status(200).json_body(json!({
                "result": {
                    "items": [{ "offer_id": "A1" }, { "offer_id": "A2" }],
                    "total": 3,
                    "last_id": "cursor-1",
                }
            }));
        });
        let second_page = server.mock(|when, then| {
            when.method(POST).path("/v2/product/list").json_body(json!({
                "filter": { "visibility": "ALL" },
                "last_id": "cursor-1",
                "limit": 1000,
            }));
            then.status(200).json_body(json!({
                "result": {
                    "items": [{ "offer_id": "A3" }],
                    "total": 3,
                    "last_id": "cursor-2",
                }
            }));
        });

        let ids = client(&server).list_offer_ids().await.unwrap();

        first_page.assert();
        second_page.assert();
        assert_eq!(ids, vec!["A1", "A2", "A3"]);
    }

    #[tokio::test]
    async fn test_listing_stops_on_empty_page() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(POST).path("/v2/product/list");
            then.status(200).json_body(json!({
                "result": { "items": [], "total": 10, "last_id": "" }
            }));
        });

        let ids = client(&server).list_offer_ids().await.unwrap();

        page.assert_hits(1);
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_listing_dedups_across_pages() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v2/product/list");
            then.status(200).json_body(json!({
                "result": {
                    "items": [{ "offer_id": "A1" }, { "offer_id": "A1" }],
                    "total": 2,
                    "last_id": "",
                }
            }));
        });

        let ids = client(&server).list_offer_ids().await.unwrap();
        assert_eq!(ids, vec!["A1"]);
    }

    #[tokio::test]
    async fn test_listing_propagates_http_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v2/product/list");
            then.status(500);
        });

        let result = client(&server).list_offer_ids().await;
        assert!(matches!(result, Err(SyncError::Api(_))));
    }

    #[tokio::test]
    async fn test_submit_stocks_payload_shape() {
        let server = MockServer::start();
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/product/import/stocks")
                .header("Client-Id", "client-1")
                .json_body(json!({
                    "stocks": [
                        { "offer_id": "A1", "stock": 100 },
                        { "offer_id": "A2", "stock": 0 },
                    ]
                }));
            then.status(200).json_body(json!({ "result": [] }));
        });

        let batch = vec![
            StockUpdate {
                offer_id: "A1".to_string(),
                quantity: 100,
                warehouse_id: None,
                updated_at: None,
            },
            StockUpdate {
                offer_id: "A2".to_string(),
                quantity: 0,
                warehouse_id: None,
                updated_at: None,
            },
        ];
        client(&server).submit_stocks(&batch).await.unwrap();

        update.assert();
    }

    #[tokio::test]
    async fn test_submit_prices_payload_shape() {
        let server = MockServer::start();
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/product/import/prices")
                .json_body(json!({
                    "prices": [{
                        "auto_action_enabled": "UNKNOWN",
                        "currency_code": "RUB",
                        "offer_id": "A1",
                        "old_price": "0",
                        "price": "5990",
                    }]
                }));
            then.status(200).json_body(json!({ "result": [] }));
        });

        let batch = vec![PriceUpdate {
            offer_id: "A1".to_string(),
            value: 5990,
            currency: "RUB".to_string(),
        }];
        client(&server).submit_prices(&batch).await.unwrap();

        update.assert();
    }

    #[tokio::test]
    async fn test_submit_failure_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/product/import/stocks");
            then.status(403);
        });

        let batch = vec![StockUpdate {
            offer_id: "A1".to_string(),
            quantity: 1,
            warehouse_id: None,
            updated_at: None,
        }];
        let result = client(&server).submit_stocks(&batch).await;
        assert!(matches!(result, Err(SyncError::Api(_))));
    }
}
