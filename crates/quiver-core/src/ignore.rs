//! Ignore registry: suppress a duplicate group that an operator has judged
//! to be distinct components.
//!
//! Markers are keyed by the scanner's grouping key and never expire. There
//! is no un-ignore operation; the asymmetry is inherited from the original
//! workflow.

use chrono::Utc;

use crate::{
  Error, Result,
  component::IgnoredDuplicate,
  store::{CatalogStore, WriteBatch},
};

/// Upsert an ignore marker for `key`. Idempotent: re-ignoring an already
/// ignored key overwrites the marker and succeeds.
pub async fn ignore_group<S>(store: &S, key: &str) -> Result<()>
where
  S: CatalogStore,
{
  if key.trim().is_empty() {
    return Err(Error::EmptyGroupKey);
  }

  let mut batch = WriteBatch::new();
  batch.set_ignored(
    key.to_string(),
    IgnoredDuplicate {
      ignored:    true,
      ignored_at: Utc::now(),
    },
  );

  store.commit(batch).await.map_err(Error::store)
}
