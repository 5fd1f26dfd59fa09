//! Merge coordinator: collapse a duplicate group into a single surviving
//! master component.
//!
//! The cascade walks every user's equipment, rewrites embedded references
//! that point at a merged-away id, and commits the rewrites together with
//! the deletion of the non-primary master records in one atomic batch. A
//! concurrent reader never observes a half-merged catalog.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
  Error, Result,
  store::{CatalogStore, WriteBatch},
};

/// Counts describing what a successful merge touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
  pub users_scanned:        usize,
  pub equipment_updated:    usize,
  pub components_rewritten: usize,
  pub masters_deleted:      usize,
}

/// Rewrite every user-component reference in `merge_ids` to `primary_id` and
/// delete the non-primary master records, atomically.
///
/// Sequential full scan over all users and their equipment — acceptable for
/// an operator-triggered maintenance action on bounded data. There is no
/// cross-call locking; callers must not run overlapping merges concurrently.
///
/// On any enumeration or commit failure the store is left exactly as it was;
/// the operation is safe to re-invoke.
pub async fn merge_duplicates<S>(
  store: &S,
  primary_id: &str,
  merge_ids: &[String],
) -> Result<MergeReport>
where
  S: CatalogStore,
{
  if primary_id.trim().is_empty() {
    return Err(Error::EmptyPrimaryId);
  }
  if merge_ids.is_empty() {
    return Err(Error::EmptyMergeSet);
  }

  let merged: HashSet<&str> = merge_ids
    .iter()
    .map(String::as_str)
    .filter(|id| *id != primary_id)
    .collect();

  let mut batch = WriteBatch::new();
  let mut report = MergeReport::default();

  let users = store.list_users().await.map_err(Error::store)?;
  for user in &users {
    report.users_scanned += 1;

    let equipment = store
      .list_equipment(user.user_id)
      .await
      .map_err(Error::store)?;

    for item in equipment {
      let mut touched = false;
      let mut components = item.components;

      for component in &mut components {
        if merged.contains(component.master_component_id.as_str()) {
          component.master_component_id = primary_id.to_string();
          report.components_rewritten += 1;
          touched = true;
        }
      }

      if touched {
        report.equipment_updated += 1;
        batch.replace_equipment_components(
          user.user_id,
          item.equipment_id,
          components,
        );
      }
    }
  }

  // Deletions in caller order, each id once.
  let mut staged: HashSet<&str> = HashSet::new();
  for id in merge_ids {
    if id != primary_id && staged.insert(id.as_str()) {
      batch.delete_master_component(id.clone());
      report.masters_deleted += 1;
    }
  }

  store.commit(batch).await.map_err(Error::store)?;
  Ok(report)
}
