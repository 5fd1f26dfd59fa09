//! The `CatalogStore` trait and the staged write batch.
//!
//! The trait is implemented by storage backends (e.g. `quiver-store-sqlite`).
//! Higher layers (`quiver-api`, the maintenance operations in this crate)
//! depend on this abstraction, not on any concrete backend.

use std::{collections::HashSet, future::Future};

use uuid::Uuid;

use crate::component::{
  Equipment, IgnoredDuplicate, MasterComponent, User, UserComponent,
};

// ─── Write batch ─────────────────────────────────────────────────────────────

/// A single staged write against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
  /// Replace the full embedded component list of one equipment record.
  /// Whole-list replacement keeps the rewrite atomic; element-level patches
  /// are not supported.
  ReplaceEquipmentComponents {
    user_id:      Uuid,
    equipment_id: Uuid,
    components:   Vec<UserComponent>,
  },
  /// Delete a master catalog entry. Deleting an absent id is a no-op.
  DeleteMasterComponent { id: String },
  /// Create or overwrite a master catalog entry.
  SetMasterComponent { component: MasterComponent },
  /// Create or overwrite an ignore marker.
  SetIgnored {
    key:    String,
    marker: IgnoredDuplicate,
  },
}

/// An ordered list of staged writes, applied atomically by
/// [`CatalogStore::commit`]: either every operation takes effect or none do.
#[derive(Debug, Default)]
pub struct WriteBatch {
  ops: Vec<WriteOp>,
}

impl WriteBatch {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn replace_equipment_components(
    &mut self,
    user_id: Uuid,
    equipment_id: Uuid,
    components: Vec<UserComponent>,
  ) {
    self.ops.push(WriteOp::ReplaceEquipmentComponents {
      user_id,
      equipment_id,
      components,
    });
  }

  pub fn delete_master_component(&mut self, id: String) {
    self.ops.push(WriteOp::DeleteMasterComponent { id });
  }

  pub fn set_master_component(&mut self, component: MasterComponent) {
    self.ops.push(WriteOp::SetMasterComponent { component });
  }

  pub fn set_ignored(&mut self, key: String, marker: IgnoredDuplicate) {
    self.ops.push(WriteOp::SetIgnored { key, marker });
  }

  pub fn is_empty(&self) -> bool {
    self.ops.is_empty()
  }

  pub fn len(&self) -> usize {
    self.ops.len()
  }

  pub fn ops(&self) -> &[WriteOp] {
    &self.ops
  }

  /// Consume the batch, yielding the staged operations in order.
  pub fn into_ops(self) -> Vec<WriteOp> {
    self.ops
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Quiver catalog store backend.
///
/// Reads are full collection scans — the maintenance operations here are
/// admin tools run at low frequency on bounded data, not a query layer.
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Scan the full master-component collection, in stable scan order.
  fn list_master_components(
    &self,
  ) -> impl Future<Output = Result<Vec<MasterComponent>, Self::Error>> + Send + '_;

  /// Fetch a single master component by id. Returns `None` if absent.
  fn get_master_component<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<MasterComponent>, Self::Error>> + Send + 'a;

  /// The set of grouping keys with an active ignore marker.
  fn ignored_keys(
    &self,
  ) -> impl Future<Output = Result<HashSet<String>, Self::Error>> + Send + '_;

  /// Scan all user accounts.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Scan one user's equipment subcollection.
  fn list_equipment(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Equipment>, Self::Error>> + Send + '_;

  /// Apply a staged batch atomically: all operations or none.
  fn commit(
    &self,
    batch: WriteBatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
