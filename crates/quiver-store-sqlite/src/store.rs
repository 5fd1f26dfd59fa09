//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::{collections::HashSet, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quiver_core::{
  component::{Equipment, MasterComponent, User, UserComponent},
  store::{CatalogStore, WriteBatch, WriteOp},
};

use crate::{
  Error, Result,
  encode::{
    RawEquipment, RawMasterComponent, RawUser, encode_components, encode_dt,
    encode_embedding, encode_system, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quiver catalog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Create and persist a new user account.
  ///
  /// Account management proper belongs to an external collaborator; this
  /// exists for fixtures and ingestion glue.
  pub async fn add_user(&self) -> Result<User> {
    let user = User {
      user_id:    Uuid::new_v4(),
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(user.user_id);
    let at_str = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, created_at) VALUES (?1, ?2)",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  /// Create and persist an equipment record in `user_id`'s subcollection.
  pub async fn add_equipment(
    &self,
    user_id: Uuid,
    name: Option<String>,
    components: Vec<UserComponent>,
  ) -> Result<Equipment> {
    let equipment = Equipment {
      equipment_id: Uuid::new_v4(),
      name,
      components,
    };

    let eq_id_str = encode_uuid(equipment.equipment_id);
    let user_id_str = encode_uuid(user_id);
    let name_val = equipment.name.clone();
    let components_json = encode_components(&equipment.components)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO equipment (equipment_id, user_id, name, components_json)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![eq_id_str, user_id_str, name_val, components_json],
        )?;
        Ok(())
      })
      .await?;

    Ok(equipment)
  }
}

// ─── Batch encoding ──────────────────────────────────────────────────────────

/// A [`WriteOp`] with all column values pre-rendered, so the transaction
/// closure only touches plain strings.
enum EncodedOp {
  ReplaceComponents {
    user_id:         String,
    equipment_id:    String,
    components_json: String,
  },
  DeleteMaster {
    id: String,
  },
  SetMaster {
    id:        String,
    name:      String,
    brand:     Option<String>,
    series:    Option<String>,
    model:     Option<String>,
    size:      Option<String>,
    system:    String,
    embedding: Option<String>,
  },
  SetIgnored {
    key:        String,
    ignored_at: String,
  },
}

fn encode_op(op: WriteOp) -> Result<EncodedOp> {
  Ok(match op {
    WriteOp::ReplaceEquipmentComponents {
      user_id,
      equipment_id,
      components,
    } => EncodedOp::ReplaceComponents {
      user_id:         encode_uuid(user_id),
      equipment_id:    encode_uuid(equipment_id),
      components_json: encode_components(&components)?,
    },
    WriteOp::DeleteMasterComponent { id } => EncodedOp::DeleteMaster { id },
    WriteOp::SetMasterComponent { component } => {
      let embedding = component
        .embedding
        .as_deref()
        .map(encode_embedding)
        .transpose()?;
      EncodedOp::SetMaster {
        id: component.id,
        name: component.name,
        brand: component.brand,
        series: component.series,
        model: component.model,
        size: component.size,
        system: encode_system(component.system).to_owned(),
        embedding,
      }
    }
    WriteOp::SetIgnored { key, marker } => EncodedOp::SetIgnored {
      key,
      ignored_at: encode_dt(marker.ignored_at),
    },
  })
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  async fn list_master_components(&self) -> Result<Vec<MasterComponent>> {
    let raws: Vec<RawMasterComponent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, brand, series, model, size, system, embedding
           FROM master_components
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawMasterComponent {
              id:        row.get(0)?,
              name:      row.get(1)?,
              brand:     row.get(2)?,
              series:    row.get(3)?,
              model:     row.get(4)?,
              size:      row.get(5)?,
              system:    row.get(6)?,
              embedding: row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawMasterComponent::into_component)
      .collect()
  }

  async fn get_master_component(&self, id: &str) -> Result<Option<MasterComponent>> {
    let id_owned = id.to_owned();

    let raw: Option<RawMasterComponent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, brand, series, model, size, system, embedding
               FROM master_components WHERE id = ?1",
              rusqlite::params![id_owned],
              |row| {
                Ok(RawMasterComponent {
                  id:        row.get(0)?,
                  name:      row.get(1)?,
                  brand:     row.get(2)?,
                  series:    row.get(3)?,
                  model:     row.get(4)?,
                  size:      row.get(5)?,
                  system:    row.get(6)?,
                  embedding: row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMasterComponent::into_component).transpose()
  }

  async fn ignored_keys(&self) -> Result<HashSet<String>> {
    let keys: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT key FROM ignored_duplicates WHERE ignored = 1")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(keys.into_iter().collect())
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT user_id, created_at FROM users ORDER BY rowid")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawUser {
              user_id:    row.get(0)?,
              created_at: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn list_equipment(&self, user_id: Uuid) -> Result<Vec<Equipment>> {
    let user_id_str = encode_uuid(user_id);

    let raws: Vec<RawEquipment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT equipment_id, name, components_json
           FROM equipment WHERE user_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id_str], |row| {
            Ok(RawEquipment {
              equipment_id:    row.get(0)?,
              name:            row.get(1)?,
              components_json: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEquipment::into_equipment).collect()
  }

  async fn commit(&self, batch: WriteBatch) -> Result<()> {
    let ops = batch
      .into_ops()
      .into_iter()
      .map(encode_op)
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for op in &ops {
          match op {
            EncodedOp::ReplaceComponents {
              user_id,
              equipment_id,
              components_json,
            } => {
              // No-op when the record vanished between scan and commit.
              tx.execute(
                "UPDATE equipment SET components_json = ?1
                 WHERE equipment_id = ?2 AND user_id = ?3",
                rusqlite::params![components_json, equipment_id, user_id],
              )?;
            }
            EncodedOp::DeleteMaster { id } => {
              tx.execute(
                "DELETE FROM master_components WHERE id = ?1",
                rusqlite::params![id],
              )?;
            }
            EncodedOp::SetMaster {
              id,
              name,
              brand,
              series,
              model,
              size,
              system,
              embedding,
            } => {
              tx.execute(
                "INSERT INTO master_components
                   (id, name, brand, series, model, size, system, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   brand = excluded.brand,
                   series = excluded.series,
                   model = excluded.model,
                   size = excluded.size,
                   system = excluded.system,
                   embedding = excluded.embedding",
                rusqlite::params![id, name, brand, series, model, size, system, embedding],
              )?;
            }
            EncodedOp::SetIgnored { key, ignored_at } => {
              tx.execute(
                "INSERT INTO ignored_duplicates (key, ignored, ignored_at)
                 VALUES (?1, 1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                   ignored = 1,
                   ignored_at = excluded.ignored_at",
                rusqlite::params![key, ignored_at],
              )?;
            }
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
