//! JSON admin API for the Quiver catalog.
//!
//! Exposes an axum [`Router`] backed by any [`quiver_core::store::CatalogStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", quiver_api::api_router(store.clone()))
//! ```

pub mod catalog;
pub mod duplicates;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use quiver_core::store::CatalogStore;
use serde::Serialize;

pub use error::ApiError;

/// The uniform success envelope for mutating endpoints. Failures render the
/// same shape with `success: false` via [`ApiError`].
#[derive(Debug, Serialize)]
pub struct Outcome {
  pub success: bool,
  pub message: String,
}

impl Outcome {
  pub fn ok(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    // Catalog
    .route("/catalog", get(catalog::list::<S>))
    .route("/catalog/seed", post(catalog::seed::<S>))
    .route("/catalog/{id}", get(catalog::get_one::<S>))
    // Duplicates
    .route("/duplicates", get(duplicates::scan::<S>))
    .route("/duplicates/merge", post(duplicates::merge::<S>))
    .route("/duplicates/ignore", post(duplicates::ignore::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
