//! Core types and trait definitions for the Quiver equipment catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod component;
pub mod dedup;
pub mod error;
pub mod identity;
pub mod ignore;
pub mod merge;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
