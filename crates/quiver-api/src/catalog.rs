//! Handlers for `/catalog` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use quiver_core::{
  component::MasterComponent,
  seed::{NewMasterComponent, seed_catalog},
  store::CatalogStore,
};
use serde::Deserialize;

use crate::{Outcome, error::ApiError};

/// `GET /catalog` — list every master component.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<MasterComponent>>, ApiError>
where
  S: CatalogStore,
{
  let components = store
    .list_master_components()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(components))
}

/// `GET /catalog/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<MasterComponent>, ApiError>
where
  S: CatalogStore,
{
  let component = store
    .get_master_component(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("master component {id:?} not found")))?;
  Ok(Json(component))
}

#[derive(Debug, Deserialize)]
pub struct SeedBody {
  pub components: Vec<NewMasterComponent>,
}

/// `POST /catalog/seed` — upsert candidate records into the master catalog.
pub async fn seed<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SeedBody>,
) -> Result<Json<Outcome>, ApiError>
where
  S: CatalogStore,
{
  let report = seed_catalog(store.as_ref(), body.components).await?;
  tracing::info!(
    seeded = report.seeded,
    skipped = report.skipped,
    "seeded master catalog"
  );
  Ok(Json(Outcome::ok(format!(
    "seeded {} components, skipped {} without identity",
    report.seeded, report.skipped,
  ))))
}
