//! Normalization from raw feed items to [`pricewatch_core::MarketRecord`].
//!
//! Defaulting rules follow the upstream feed's loose shape: a missing barcode
//! becomes an empty string and a missing nested price becomes `0`. A record
//! with no resolvable name is not coerced — it is skipped with an explicit
//! reason so the run summary can count it.

use pricewatch_core::MarketRecord;

use crate::types::FeedItem;

/// Why a feed item was not turned into a [`MarketRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Both `name_chi` and `name` are absent or empty.
    MissingName,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "no resolvable name"),
        }
    }
}

/// Normalizes a raw [`FeedItem`] into a [`MarketRecord`].
///
/// The name is resolved from `name_chi`, falling back to `name`; empty
/// strings count as absent.
///
/// # Errors
///
/// Returns [`SkipReason::MissingName`] if neither name field resolves.
pub fn normalize_record(item: &FeedItem) -> Result<MarketRecord, SkipReason> {
    let name = resolve_name(item).ok_or(SkipReason::MissingName)?;

    let barcode = item.barcode.clone().unwrap_or_default();
    let price = item
        .price
        .as_ref()
        .and_then(|p| p.value)
        .unwrap_or(0.0);

    Ok(MarketRecord {
        barcode,
        name,
        price,
    })
}

fn resolve_name(item: &FeedItem) -> Option<String> {
    item.name_chi
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| item.name.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_owned)
}
