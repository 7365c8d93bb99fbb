use chrono::{DateTime, Utc};
use pricewatch_core::{MarketRecord, SOURCE_TAG};
use serde::Serialize;

/// Wire shape for one `market_data` upsert.
///
/// `updated_at` is produced client-side as UTC at build time; the REST
/// surface has no equivalent of a server-side `now()` literal in a payload.
#[derive(Debug, Clone, Serialize)]
pub struct MarketDataRow<'a> {
    pub barcode: &'a str,
    pub name: &'a str,
    pub price: f64,
    pub source: &'static str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> MarketDataRow<'a> {
    /// Builds the row for a normalized record, stamping `source` and the
    /// current time.
    #[must_use]
    pub fn from_record(record: &'a MarketRecord) -> Self {
        Self {
            barcode: &record.barcode,
            name: &record.name,
            price: record.price,
            source: SOURCE_TAG,
            updated_at: Utc::now(),
        }
    }
}

/// Wire shape for the `inventory` market-price patch.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryPriceUpdate {
    pub market_price: f64,
    pub market_updated_at: DateTime<Utc>,
}

impl InventoryPriceUpdate {
    #[must_use]
    pub fn new(market_price: f64) -> Self {
        Self {
            market_price,
            market_updated_at: Utc::now(),
        }
    }
}
