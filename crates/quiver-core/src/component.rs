//! Domain records for the equipment catalog.
//!
//! `MasterComponent` is the canonical catalog entry; users own `Equipment`
//! records whose embedded `UserComponent` entries reference master components
//! by id. Documents are loosely structured: unknown attributes are carried as
//! `None`, never as empty strings, and unrecognised user-component fields are
//! preserved verbatim through rewrites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Subsystem tag ───────────────────────────────────────────────────────────

/// The bike subsystem a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum System {
  Drivetrain,
  Brakes,
  Wheelset,
  Frameset,
  Cockpit,
  Suspension,
  EBike,
  Accessories,
}

// ─── Master catalog ──────────────────────────────────────────────────────────

/// Canonical catalog entry for a component type/variant.
///
/// Created by seeding; read by the duplicate scanner; deleted by merge.
/// Never updated in place by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterComponent {
  /// Stable slug identifier derived from the identifying attributes
  /// (see [`crate::identity::component_id`]). Primary key of the catalog.
  pub id:        String,
  /// Functional category, e.g. "Seatpost" or "Fork".
  pub name:      String,
  pub brand:     Option<String>,
  pub series:    Option<String>,
  pub model:     Option<String>,
  pub size:      Option<String>,
  pub system:    System,
  /// Semantic-search vector, written and consumed by an external
  /// collaborator. Persisted and returned untouched.
  pub embedding: Option<Vec<f32>>,
}

// ─── User equipment ──────────────────────────────────────────────────────────

/// A user's owned instance of a component, embedded in an equipment record.
///
/// Only `master_component_id` is meaningful to the core; everything else
/// (purchase date, wear, ...) rides along in `extra` and survives reference
/// rewrites byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserComponent {
  pub master_component_id: String,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An equipment record (a bike, usually) owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
  pub equipment_id: Uuid,
  pub name:         Option<String>,
  pub components:   Vec<UserComponent>,
}

/// A user account. Only identity metadata is visible to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub created_at: DateTime<Utc>,
}

// ─── Duplicate bookkeeping ───────────────────────────────────────────────────

/// A set of master components that share a grouping key. Computed on demand,
/// never persisted. Always has at least two members.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
  pub key:        String,
  /// Members in catalog scan order; the order carries no meaning.
  pub components: Vec<MasterComponent>,
}

/// Persisted marker suppressing a known-non-duplicate group, keyed by the
/// same grouping key the scanner computes. Never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoredDuplicate {
  pub ignored:    bool,
  pub ignored_at: DateTime<Utc>,
}
