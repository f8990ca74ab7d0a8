//! Catalog seeding
//!
//! Upserts catalog items into the search index using the same attribute
//! encoding the filter compiler assumes.

use crate::client::SearchBackend;
use facetx_core::{CatalogItem, Error, Result, UpsertRecord};
use tracing::info;

pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Upsert `items` in batches of `batch_size`. Returns the number of items written.
///
/// Every item is encoded before the first batch is sent, so an invalid item
/// aborts seeding without a partial write.
pub async fn seed_catalog(
    backend: &dyn SearchBackend,
    items: &[CatalogItem],
    batch_size: usize,
) -> Result<usize> {
    if batch_size == 0 {
        return Err(Error::InvalidConfig("batch size must be positive".to_string()));
    }

    let records: Vec<UpsertRecord> = items
        .iter()
        .map(CatalogItem::to_record)
        .collect::<Result<_>>()?;

    let total_batches = records.len().div_ceil(batch_size);
    for (i, batch) in records.chunks(batch_size).enumerate() {
        backend.upsert(batch.to_vec()).await?;
        info!("Seeded batch {}/{} ({} items)", i + 1, total_batches, batch.len());
    }

    Ok(records.len())
}
