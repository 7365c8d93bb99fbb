//! The per-run sync loop: fetch → normalize → upsert → inventory patch →
//! (optional) image mirror, strictly sequential, one record at a time.
//!
//! A feed fetch failure aborts the run before any write. Everything after
//! that is contained per record: a failed upsert, inventory patch, or image
//! upload is logged, counted, and the loop moves on. There is no rollback —
//! an inventory or image failure leaves the already-committed market-data
//! upsert in place.

use pricewatch_feed::{normalize_record, FeedClient};
use pricewatch_storage::ObjectStore;
use pricewatch_supabase::SupabaseClient;

/// Knobs for one sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Process at most this many feed records.
    pub limit: Option<usize>,
}

/// Aggregated outcome counts for one run, surfaced to the caller instead of
/// being buried in a log stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncTotals {
    /// Feed records seen (after `limit`).
    pub seen: u64,
    /// Records upserted into `market_data`.
    pub upserted: u64,
    /// Records skipped during normalization (no resolvable name).
    pub skipped: u64,
    /// Records whose `market_data` upsert failed.
    pub failed: u64,
    /// Total `inventory` rows touched by the fuzzy price patches.
    pub inventory_rows_updated: u64,
    /// Inventory patches that failed after a committed upsert.
    pub inventory_update_failures: u64,
    /// Images written to object storage.
    pub images_mirrored: u64,
    /// Images skipped because the source returned non-200.
    pub images_skipped: u64,
    /// Image fetches or uploads that errored.
    pub image_failures: u64,
}

impl std::fmt::Display for SyncTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records seen: {} upserted, {} skipped, {} failed; \
             {} inventory rows updated ({} patch failures); \
             {} images mirrored, {} skipped, {} failed",
            self.seen,
            self.upserted,
            self.skipped,
            self.failed,
            self.inventory_rows_updated,
            self.inventory_update_failures,
            self.images_mirrored,
            self.images_skipped,
            self.image_failures,
        )
    }
}

/// Runs one full sync pass.
///
/// `store` is `None` when image mirroring is disabled; the image stage is
/// then skipped entirely.
///
/// # Errors
///
/// Returns an error only if the feed listing itself cannot be fetched or
/// parsed — in that case zero writes have occurred. Per-record failures are
/// counted in the returned [`SyncTotals`], not propagated.
pub async fn run_sync(
    feed: &FeedClient,
    db: &SupabaseClient,
    store: Option<&ObjectStore>,
    options: &SyncOptions,
) -> anyhow::Result<SyncTotals> {
    let listing = feed.fetch_listing().await?;
    let total_available = listing.products.len();
    tracing::info!(products = total_available, "fetched market-price listing");

    let limit = options.limit.unwrap_or(usize::MAX);
    let mut totals = SyncTotals::default();

    for item in listing.products.into_iter().take(limit) {
        totals.seen += 1;

        let record = match normalize_record(&item) {
            Ok(record) => record,
            Err(reason) => {
                totals.skipped += 1;
                tracing::debug!(reason = %reason, "record skipped");
                continue;
            }
        };

        if let Err(e) = db.upsert_market_data(&record).await {
            totals.failed += 1;
            tracing::error!(
                barcode = %record.barcode,
                name = %record.name,
                error = %e,
                "market_data upsert failed"
            );
            continue;
        }
        totals.upserted += 1;

        match db.update_inventory_price(&record.name, record.price).await {
            Ok(matched) => {
                totals.inventory_rows_updated += matched;
                if matched == 0 {
                    tracing::debug!(name = %record.name, "no inventory rows matched");
                }
            }
            Err(e) => {
                // The market_data upsert above is already committed; there is
                // no compensating action.
                totals.inventory_update_failures += 1;
                tracing::error!(
                    name = %record.name,
                    error = %e,
                    "inventory price update failed"
                );
            }
        }

        if let Some(store) = store {
            let image_url = item.large_image.as_deref().filter(|u| !u.is_empty());
            if let Some(url) = image_url {
                mirror_image(feed, store, url, &record.image_object_key(), &mut totals).await;
            }
        }
    }

    Ok(totals)
}

/// Mirrors one image; failure is local to the image and never aborts the run.
async fn mirror_image(
    feed: &FeedClient,
    store: &ObjectStore,
    url: &str,
    key: &str,
    totals: &mut SyncTotals,
) {
    match feed.fetch_image(url).await {
        Ok(Some(bytes)) => match store.put_image(key, bytes).await {
            Ok(()) => totals.images_mirrored += 1,
            Err(e) => {
                totals.image_failures += 1;
                tracing::warn!(key = %key, error = %e, "image upload failed");
            }
        },
        Ok(None) => totals.images_skipped += 1,
        Err(e) => {
            totals.image_failures += 1;
            tracing::warn!(url = %url, error = %e, "image fetch failed");
        }
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
