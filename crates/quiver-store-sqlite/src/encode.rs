//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Component lists and
//! embeddings are stored as compact JSON. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use quiver_core::component::{
  Equipment, MasterComponent, System, User, UserComponent,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── System ──────────────────────────────────────────────────────────────────

pub fn encode_system(s: System) -> &'static str {
  match s {
    System::Drivetrain => "drivetrain",
    System::Brakes => "brakes",
    System::Wheelset => "wheelset",
    System::Frameset => "frameset",
    System::Cockpit => "cockpit",
    System::Suspension => "suspension",
    System::EBike => "e-bike",
    System::Accessories => "accessories",
  }
}

pub fn decode_system(s: &str) -> Result<System> {
  match s {
    "drivetrain" => Ok(System::Drivetrain),
    "brakes" => Ok(System::Brakes),
    "wheelset" => Ok(System::Wheelset),
    "frameset" => Ok(System::Frameset),
    "cockpit" => Ok(System::Cockpit),
    "suspension" => Ok(System::Suspension),
    "e-bike" => Ok(System::EBike),
    "accessories" => Ok(System::Accessories),
    other => Err(Error::UnknownSystem(other.to_string())),
  }
}

// ─── Embedded JSON columns ───────────────────────────────────────────────────

pub fn encode_components(components: &[UserComponent]) -> Result<String> {
  Ok(serde_json::to_string(components)?)
}

pub fn decode_components(s: &str) -> Result<Vec<UserComponent>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_embedding(embedding: &[f32]) -> Result<String> {
  Ok(serde_json::to_string(embedding)?)
}

pub fn decode_embedding(s: &str) -> Result<Vec<f32>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `master_components` row.
pub struct RawMasterComponent {
  pub id:        String,
  pub name:      String,
  pub brand:     Option<String>,
  pub series:    Option<String>,
  pub model:     Option<String>,
  pub size:      Option<String>,
  pub system:    String,
  pub embedding: Option<String>,
}

impl RawMasterComponent {
  pub fn into_component(self) -> Result<MasterComponent> {
    let embedding = self
      .embedding
      .as_deref()
      .map(decode_embedding)
      .transpose()?;

    Ok(MasterComponent {
      id:     self.id,
      name:   self.name,
      brand:  self.brand,
      series: self.series,
      model:  self.model,
      size:   self.size,
      system: decode_system(&self.system)?,
      embedding,
    })
  }
}

/// Raw strings read directly from an `equipment` row.
pub struct RawEquipment {
  pub equipment_id:    String,
  pub name:            Option<String>,
  pub components_json: String,
}

impl RawEquipment {
  pub fn into_equipment(self) -> Result<Equipment> {
    Ok(Equipment {
      equipment_id: decode_uuid(&self.equipment_id)?,
      name:         self.name,
      components:   decode_components(&self.components_json)?,
    })
  }
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:    String,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
