//! Error types for `quiver-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// `merge_duplicates` was called with an empty primary id.
  #[error("primary component id must not be empty")]
  EmptyPrimaryId,

  /// `merge_duplicates` was called with an empty merge set.
  #[error("merge set must not be empty")]
  EmptyMergeSet,

  /// `ignore_group` was called with an empty group key.
  #[error("duplicate group key must not be empty")]
  EmptyGroupKey,

  /// A read or commit against the backing store failed. The whole operation
  /// is aborted; the batch semantics of [`crate::store::CatalogStore::commit`]
  /// guarantee nothing was partially applied.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
