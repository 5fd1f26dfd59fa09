//! Duplicate grouping: scan the master catalog and emit groups of entries
//! that are, per the grouping heuristic, the same real-world component.
//!
//! Grouping is exact-match on a composite key of name, brand, normalized
//! model, and size. The scanner is read-only; acting on a group (merge or
//! ignore) is the operator's call.

use std::collections::HashMap;

use crate::{
  Error, Result,
  component::{DuplicateGroup, MasterComponent},
  identity,
  store::CatalogStore,
};

/// Model-suffix variants that denote derailleur cage length / size options
/// and must not distinguish components for grouping purposes.
///
/// The list is deliberately fixed; extending it changes which catalog entries
/// are considered duplicates, so additions go through product review.
const VARIANT_SUFFIXES: [&str; 5] = ["-sgs", "-gs", "-long", "-medium", "-short"];

/// Normalize a model string for grouping: slug it (so separator differences
/// like "Ultimate RC2" vs "Ultimate-RC2" collapse), then strip at most one
/// trailing variant suffix.
pub fn base_model(model: &str) -> String {
  let slugged = identity::slug(model);
  for suffix in VARIANT_SUFFIXES {
    if let Some(stripped) = slugged.strip_suffix(suffix) {
      if !stripped.is_empty() {
        return stripped.to_string();
      }
    }
  }
  slugged
}

/// The composite grouping key for a master component.
///
/// Absent brand or model render as the empty segment; absent size renders as
/// the `no-size` sentinel, matching the persisted ignore-marker keys.
pub fn group_key(component: &MasterComponent) -> String {
  let brand = component.brand.as_deref().unwrap_or("");
  let base = component.model.as_deref().map(base_model).unwrap_or_default();
  let size = component.size.as_deref().unwrap_or("no-size");
  format!("{}|{}|{}|{}", component.name, brand, base, size)
}

/// Scan the whole master catalog and return every non-ignored group with at
/// least two members, in first-seen key order.
///
/// Components with neither brand nor model are skipped — a bare "Grips" entry
/// is too generic to meaningfully dedupe. Any store read failure aborts the
/// scan; partial results are never returned.
pub async fn find_duplicate_groups<S>(store: &S) -> Result<Vec<DuplicateGroup>>
where
  S: CatalogStore,
{
  let components = store.list_master_components().await.map_err(Error::store)?;
  let ignored = store.ignored_keys().await.map_err(Error::store)?;

  let mut order: Vec<String> = Vec::new();
  let mut buckets: HashMap<String, Vec<MasterComponent>> = HashMap::new();

  for component in components {
    if component.brand.is_none() && component.model.is_none() {
      continue;
    }
    let key = group_key(&component);
    if ignored.contains(&key) {
      continue;
    }
    let bucket = buckets.entry(key.clone()).or_default();
    if bucket.is_empty() {
      order.push(key);
    }
    bucket.push(component);
  }

  Ok(
    order
      .into_iter()
      .filter_map(|key| {
        let components = buckets.remove(&key)?;
        (components.len() >= 2).then_some(DuplicateGroup { key, components })
      })
      .collect(),
  )
}
