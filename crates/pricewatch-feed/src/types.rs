//! Serde types mirroring the upstream listing shape.
//!
//! The feed is consumed as-is with no schema validation beyond what serde
//! needs to find the fields below; unknown fields are ignored.

use serde::Deserialize;

/// Top-level listing response: a `products` array.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub products: Vec<FeedItem>,
}

/// One product entry from the listing.
///
/// Every field is optional at the wire level; normalization decides what a
/// usable record looks like.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    pub barcode: Option<String>,
    /// Localized (Chinese) display name; preferred over `name`.
    pub name_chi: Option<String>,
    pub name: Option<String>,
    pub price: Option<FeedPrice>,
    /// Full-size product image URL, when the feed exposes one.
    #[serde(rename = "largeImage")]
    pub large_image: Option<String>,
}

/// Nested price object; the listed amount lives one level down.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPrice {
    pub value: Option<f64>,
}
