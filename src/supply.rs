use crate::domain::model::InventoryRecord;
use crate::utils::error::{Result, SyncError};
use reqwest::Client;
use std::io::{Cursor, Read};

pub const DEFAULT_SUPPLY_URL: &str = "https://timeworld.ru/upload/files/ostatki.zip";

/// Preamble rows above the header line in the vendor sheet.
const HEADER_OFFSET: usize = 17;

const CODE_COLUMN: &str = "Код";
const QUANTITY_COLUMN: &str = "Количество";
const PRICE_COLUMN: &str = "Цена";

/// Vendor stock feed: a zipped tabular sheet republished on a fixed URL.
/// Downloaded and parsed entirely in memory, once per run.
pub struct SupplyFeed {
    http: Client,
    url: String,
}

impl SupplyFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    /// Download the archive and parse the sheet into inventory records.
    pub async fn fetch(&self) -> Result<Vec<InventoryRecord>> {
        tracing::info!("downloading supply feed from {}", self.url);
        let response = self.http.get(&self.url).send().await?.error_for_status()?;
        let archive = response.bytes().await?;

        let sheet = extract_sheet(archive.as_ref())?;
        let records = parse_sheet(&sheet)?;
        tracing::info!("parsed {} inventory records", records.len());
        Ok(records)
    }
}

/// Pull the first file out of the archive as text.
fn extract_sheet(data: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    if archive.is_empty() {
        return Err(SyncError::EmptyArchive);
    }
    let mut file = archive.by_index(0)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse the sheet text. The header line sits below a fixed preamble;
/// columns are located by label, not position.
fn parse_sheet(sheet: &str) -> Result<Vec<InventoryRecord>> {
    let body: String = sheet.split_inclusive('\n').skip(HEADER_OFFSET).collect();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let code_idx = column_index(&headers, CODE_COLUMN)?;
    let quantity_idx = column_index(&headers, QUANTITY_COLUMN)?;
    let price_idx = column_index(&headers, PRICE_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        records.push(InventoryRecord {
            code: field(code_idx),
            quantity: field(quantity_idx),
            price: field(price_idx),
        });
    }
    Ok(records)
}

fn column_index(headers: &csv::StringRecord, label: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == label)
        .ok_or_else(|| SyncError::MissingColumn {
            label: label.to_string(),
        })
}
