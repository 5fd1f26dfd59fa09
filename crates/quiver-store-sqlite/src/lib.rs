//! SQLite backend for the Quiver catalog store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Batch commits run inside a single
//! SQL transaction, which is what gives [`quiver_core::store::CatalogStore::commit`]
//! its all-or-nothing guarantee.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
