//! Client and normalization for the upstream market-price feed.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::FeedClient;
pub use error::FeedError;
pub use normalize::{normalize_record, SkipReason};
pub use types::{FeedItem, FeedPrice, FeedResponse};
