//! Catalog seeding: turn candidate records into master components with
//! deterministic slug ids.
//!
//! Records whose identity fields are all absent are skipped rather than
//! written with an empty key; collisions between semantically different
//! records are rare in practice and caught after the fact by the duplicate
//! scanner.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  component::{MasterComponent, System},
  identity,
  store::{CatalogStore, WriteBatch},
};

/// A candidate catalog entry, before id derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMasterComponent {
  pub name:   String,
  pub brand:  Option<String>,
  pub series: Option<String>,
  pub model:  Option<String>,
  pub size:   Option<String>,
  pub system: System,
}

impl NewMasterComponent {
  /// Empty and whitespace-only optional fields become `None` — absence means
  /// unknown, and empty strings must never reach storage.
  fn normalized(mut self) -> Self {
    let strip = |field: &mut Option<String>| {
      if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *field = None;
      }
    };
    strip(&mut self.brand);
    strip(&mut self.series);
    strip(&mut self.model);
    strip(&mut self.size);
    self
  }
}

/// Counts describing a seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
  pub seeded:  usize,
  pub skipped: usize,
}

/// Upsert `records` into the master catalog in one atomic batch.
///
/// Ids derive from `(brand, name, model)`; seeders that key on
/// `(brand, model, size)` call [`identity::component_id`] themselves and
/// build [`MasterComponent`] records directly.
pub async fn seed_catalog<S>(
  store: &S,
  records: Vec<NewMasterComponent>,
) -> Result<SeedReport>
where
  S: CatalogStore,
{
  let mut batch = WriteBatch::new();
  let mut report = SeedReport::default();

  for record in records {
    let record = record.normalized();
    let Some(id) = identity::component_id([
      record.brand.as_deref(),
      Some(record.name.as_str()),
      record.model.as_deref(),
    ]) else {
      report.skipped += 1;
      continue;
    };

    batch.set_master_component(MasterComponent {
      id,
      name: record.name,
      brand: record.brand,
      series: record.series,
      model: record.model,
      size: record.size,
      system: record.system,
      embedding: None,
    });
    report.seeded += 1;
  }

  store.commit(batch).await.map_err(Error::store)?;
  Ok(report)
}
