//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as the uniform `{"success": false, "message": ...}`
//! shape the admin UI expects; store failures are logged here, at the
//! outermost boundary, before being surfaced.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<quiver_core::Error> for ApiError {
  fn from(err: quiver_core::Error) -> Self {
    match err {
      quiver_core::Error::EmptyPrimaryId
      | quiver_core::Error::EmptyMergeSet
      | quiver_core::Error::EmptyGroupKey => ApiError::BadRequest(err.to_string()),
      quiver_core::Error::Store(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (
      status,
      Json(json!({ "success": false, "message": message })),
    )
      .into_response()
  }
}
