mod ingest_record;
mod upload_item;

pub use ingest_record::{IngestOutcome, IngestRecordUseCase};
pub use upload_item::UploadItemUseCase;

use crate::ports::ItemRepository;
use crate::services::{AdmitOutcome, BoundedCategoryStore, CacheKey, FeedCache, ModerationLedger};
use chrono::{DateTime, Utc};
use memefeed_domain::{DomainError, Item};
use tracing::warn;

/// Shared store path for ingested and uploaded items: admit in memory through
/// the ledger, then write the item and drop evicted rows from persistence.
/// Listings are left to their TTL; single-item lookups of evicted items are
/// invalidated. Eviction failures are left for the capacity sweep to
/// reconcile.
async fn admit(
    ledger: &ModerationLedger,
    store: &BoundedCategoryStore,
    items: &dyn ItemRepository,
    cache: &FeedCache,
    item: Item,
    now: DateTime<Utc>,
) -> Result<AdmitOutcome, DomainError> {
    let outcome = ledger.admit(item.clone(), store, now)?;
    let AdmitOutcome::Admitted(report) = &outcome else {
        return Ok(outcome);
    };

    items.upsert(&item).await?;

    for evicted in &report.evicted {
        cache.items.invalidate(&CacheKey::item(&evicted.id));
        if let Err(e) = items.delete(&evicted.category, &evicted.id).await {
            warn!(
                item_id = %evicted.id,
                category = %evicted.category,
                error = %e,
                "Failed to delete evicted item; capacity sweep will trim it"
            );
        }
    }

    Ok(outcome)
}
