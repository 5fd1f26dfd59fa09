//! Handlers for `/duplicates` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/duplicates` | Run the full catalog scan |
//! | `POST` | `/duplicates/merge` | Body: `{"primary_id": ..., "merge_ids": [...]}` |
//! | `POST` | `/duplicates/ignore` | Body: `{"key": ...}` |

use std::sync::Arc;

use axum::{Json, extract::State};
use quiver_core::{
  component::DuplicateGroup,
  dedup::find_duplicate_groups,
  ignore::ignore_group,
  merge::merge_duplicates,
  store::CatalogStore,
};
use serde::Deserialize;

use crate::{Outcome, error::ApiError};

// ─── Scan ─────────────────────────────────────────────────────────────────────

/// `GET /duplicates` — scan the master catalog for duplicate groups.
pub async fn scan<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<DuplicateGroup>>, ApiError>
where
  S: CatalogStore,
{
  let groups = find_duplicate_groups(store.as_ref()).await?;
  tracing::debug!(groups = groups.len(), "duplicate scan complete");
  Ok(Json(groups))
}

// ─── Merge ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MergeBody {
  pub primary_id: String,
  pub merge_ids:  Vec<String>,
}

/// `POST /duplicates/merge` — collapse a duplicate group into `primary_id`.
pub async fn merge<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<MergeBody>,
) -> Result<Json<Outcome>, ApiError>
where
  S: CatalogStore,
{
  let report =
    merge_duplicates(store.as_ref(), &body.primary_id, &body.merge_ids).await?;

  tracing::info!(
    primary = %body.primary_id,
    deleted = report.masters_deleted,
    rewritten = report.components_rewritten,
    "merged duplicate components"
  );

  Ok(Json(Outcome::ok(format!(
    "merged {} catalog entries into {}; rewrote {} references across {} equipment records",
    report.masters_deleted,
    body.primary_id,
    report.components_rewritten,
    report.equipment_updated,
  ))))
}

// ─── Ignore ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IgnoreBody {
  pub key: String,
}

/// `POST /duplicates/ignore` — mark a group as not-a-duplicate.
pub async fn ignore<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<IgnoreBody>,
) -> Result<Json<Outcome>, ApiError>
where
  S: CatalogStore,
{
  ignore_group(store.as_ref(), &body.key).await?;
  tracing::info!(key = %body.key, "ignored duplicate group");
  Ok(Json(Outcome::ok(format!(
    "duplicate group {:?} will no longer be reported",
    body.key
  ))))
}
