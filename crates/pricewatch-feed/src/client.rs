//! HTTP client for the upstream price-watch listing endpoint.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;

use crate::error::FeedError;
use crate::types::FeedResponse;

/// HTTP client for the price-watch listing and its referenced images.
///
/// One GET fetches the whole listing; there is no pagination, no retry, and
/// no delta sync. Image fetches are best-effort: any non-200 status is a
/// silent skip rather than an error.
pub struct FeedClient {
    client: Client,
    listing_url: String,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout and `User-Agent`.
    ///
    /// The feed rejects obvious bot agents, so the caller passes a browser
    /// user agent from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(listing_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            listing_url: listing_url.to_owned(),
        })
    }

    /// Fetches and parses the full product listing.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] — any non-2xx status. The caller
    ///   treats this as run-fatal: no records are processed.
    /// - [`FeedError::Http`] — network or TLS failure.
    /// - [`FeedError::Deserialize`] — response body is not valid JSON of the
    ///   expected shape.
    pub async fn fetch_listing(&self) -> Result<FeedResponse, FeedError> {
        let response = self.client.get(&self.listing_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.listing_url.clone(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<FeedResponse>(&body).map_err(|e| FeedError::Deserialize {
            context: format!("listing from {}", self.listing_url),
            source: e,
        })
    }

    /// Fetches a product image.
    ///
    /// Returns `Ok(Some(bytes))` on HTTP 200 and `Ok(None)` on any other
    /// status — a missing or withdrawn image is not an error, the mirror
    /// just skips it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on network or TLS failure.
    pub async fn fetch_image(&self, url: &str) -> Result<Option<Bytes>, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            tracing::debug!(url = %url, status = status.as_u16(), "image fetch skipped");
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        Ok(Some(bytes))
    }
}
