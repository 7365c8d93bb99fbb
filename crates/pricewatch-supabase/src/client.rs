//! HTTP client for the Supabase REST (PostgREST) surface.
//!
//! Wraps `reqwest` with the `apikey`/`Authorization` header pair, typed
//! errors, and the two table operations this system performs: the
//! `market_data` upsert and the fuzzy `inventory` price patch.

use std::time::Duration;

use pricewatch_core::MarketRecord;
use reqwest::{Client, Url};

use crate::error::SupabaseError;
use crate::types::{InventoryPriceUpdate, MarketDataRow};

/// Client for the Supabase REST surface of one project.
///
/// Use [`SupabaseClient::new`] with the project URL for production; in tests
/// the same constructor points at a mock server.
pub struct SupabaseClient {
    client: Client,
    /// Project root URL, normalized to end with exactly one slash.
    base_url: Url,
    api_key: String,
}

impl SupabaseClient {
    /// Creates a client for the given project URL and service-role key.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::InvalidBaseUrl`] if `project_url` does not
    /// parse, or [`SupabaseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        project_url: &str,
        service_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the REST path instead of replacing the last segment.
        let normalised = format!("{}/", project_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SupabaseError::InvalidBaseUrl {
            url: project_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: service_key.to_owned(),
        })
    }

    /// Upserts one normalized record into `market_data`.
    ///
    /// The natural key is `(barcode, name)`; a prior row with the same key is
    /// overwritten (`Prefer: resolution=merge-duplicates`). The row carries
    /// the constant source tag and a client-side `updated_at` timestamp.
    ///
    /// # Errors
    ///
    /// - [`SupabaseError::UnexpectedStatus`] — any non-2xx response.
    /// - [`SupabaseError::Http`] — network or TLS failure.
    pub async fn upsert_market_data(&self, record: &MarketRecord) -> Result<(), SupabaseError> {
        let mut url = self.table_url("market_data")?;
        url.query_pairs_mut()
            .append_pair("on_conflict", "barcode,name");

        let row = MarketDataRow::from_record(record);
        let response = self
            .client
            .post(url.clone())
            .header("apikey", &self.api_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()
            .await?;

        Self::check_status(response, &url).await?;
        tracing::debug!(
            barcode = %record.barcode,
            name = %record.name,
            price = record.price,
            "market_data upsert committed"
        );
        Ok(())
    }

    /// Patches `market_price` and `market_updated_at` on every `inventory`
    /// row whose `name` contains `name` as a case-insensitive substring.
    ///
    /// This is a best-effort fuzzy join, not an exact key lookup: zero, one,
    /// or many rows may match, and an overly generic name will touch
    /// unrelated rows. Returns the number of rows updated so the caller can
    /// surface the cardinality.
    ///
    /// # Errors
    ///
    /// - [`SupabaseError::UnexpectedStatus`] — any non-2xx response.
    /// - [`SupabaseError::Http`] — network or TLS failure.
    /// - [`SupabaseError::Deserialize`] — the representation body is not a
    ///   JSON array.
    pub async fn update_inventory_price(
        &self,
        name: &str,
        price: f64,
    ) -> Result<u64, SupabaseError> {
        let mut url = self.table_url("inventory")?;
        url.query_pairs_mut()
            .append_pair("name", &format!("ilike.*{name}*"));

        let update = InventoryPriceUpdate::new(price);
        let response = self
            .client
            .patch(url.clone())
            .header("apikey", &self.api_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            // return=representation so the matched rows come back and we can
            // count them.
            .header("Prefer", "return=representation")
            .json(&update)
            .send()
            .await?;

        let response = Self::check_status(response, &url).await?;
        let body = response.text().await?;
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| SupabaseError::Deserialize {
                context: format!("inventory patch for name \"{name}\""),
                source: e,
            })?;

        let matched = u64::try_from(rows.len()).unwrap_or(u64::MAX);
        tracing::debug!(name = %name, matched, "inventory price patch applied");
        Ok(matched)
    }

    /// Builds the REST URL for a table: `<project>/rest/v1/<table>`.
    fn table_url(&self, table: &str) -> Result<Url, SupabaseError> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| SupabaseError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Asserts a 2xx status, surfacing the response body in the error.
    async fn check_status(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<reqwest::Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SupabaseError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }
}
