//! Integration tests for `SqliteStore` against an in-memory database.

use quiver_core::{
  component::{MasterComponent, System, UserComponent},
  dedup::find_duplicate_groups,
  ignore::ignore_group,
  merge::merge_duplicates,
  seed::{NewMasterComponent, seed_catalog},
  store::{CatalogStore, WriteBatch},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn master(
  id: &str,
  name: &str,
  brand: Option<&str>,
  model: Option<&str>,
  size: Option<&str>,
) -> MasterComponent {
  MasterComponent {
    id:        id.to_string(),
    name:      name.to_string(),
    brand:     brand.map(str::to_string),
    series:    None,
    model:     model.map(str::to_string),
    size:      size.map(str::to_string),
    system:    System::Drivetrain,
    embedding: None,
  }
}

async fn put_masters(s: &SqliteStore, components: Vec<MasterComponent>) {
  let mut batch = WriteBatch::new();
  for component in components {
    batch.set_master_component(component);
  }
  s.commit(batch).await.unwrap();
}

fn user_component(master_id: &str) -> UserComponent {
  let mut extra = serde_json::Map::new();
  extra.insert("purchased".into(), serde_json::json!("2024-03-01"));
  extra.insert("wear_pct".into(), serde_json::json!(17.5));
  UserComponent {
    master_component_id: master_id.to_string(),
    extra,
  }
}

// ─── Catalog round-trips ─────────────────────────────────────────────────────

#[tokio::test]
async fn master_component_roundtrip() {
  let s = store().await;
  let mut fork = master(
    "rockshox-fork-lyrik",
    "Fork",
    Some("RockShox"),
    Some("Lyrik"),
    Some("29\", 160mm"),
  );
  fork.system = System::Suspension;
  fork.embedding = Some(vec![0.25, -1.0, 0.5]);
  put_masters(&s, vec![fork.clone()]).await;

  let fetched = s
    .get_master_component("rockshox-fork-lyrik")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, fork);

  let all = s.list_master_components().await.unwrap();
  assert_eq!(all, vec![fork]);
}

#[tokio::test]
async fn get_missing_master_returns_none() {
  let s = store().await;
  let result = s.get_master_component("no-such-id").await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn equipment_roundtrip_preserves_extra_fields() {
  let s = store().await;
  let user = s.add_user().await.unwrap();
  let added = s
    .add_equipment(
      user.user_id,
      Some("Hardtail".to_string()),
      vec![user_component("some-component")],
    )
    .await
    .unwrap();

  let items = s.list_equipment(user.user_id).await.unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0], added);
  assert_eq!(items[0].components[0].extra["wear_pct"], serde_json::json!(17.5));
}

#[tokio::test]
async fn list_equipment_is_scoped_to_the_user() {
  let s = store().await;
  let alice = s.add_user().await.unwrap();
  let bob = s.add_user().await.unwrap();
  s.add_equipment(alice.user_id, None, vec![user_component("x")])
    .await
    .unwrap();

  assert_eq!(s.list_equipment(alice.user_id).await.unwrap().len(), 1);
  assert!(s.list_equipment(bob.user_id).await.unwrap().is_empty());
}

// ─── Duplicate scanning ──────────────────────────────────────────────────────

#[tokio::test]
async fn scan_groups_suffix_variants_together() {
  let s = store().await;
  put_masters(&s, vec![
    master("d-sgs", "Rear Derailleur", Some("Shimano"), Some("RD-M8100-SGS"), None),
    master("d-gs", "Rear Derailleur", Some("Shimano"), Some("RD-M8100-GS"), None),
    master("d-base", "Rear Derailleur", Some("Shimano"), Some("RD-M8100"), None),
  ])
  .await;

  let groups = find_duplicate_groups(&s).await.unwrap();
  assert_eq!(groups.len(), 1);
  assert_eq!(groups[0].key, "Rear Derailleur|Shimano|rd-m8100|no-size");
  assert_eq!(groups[0].components.len(), 3);
}

#[tokio::test]
async fn scan_groups_separator_variants_together() {
  let s = store().await;
  put_masters(&s, vec![
    master("f1", "Fork", Some("RockShox"), Some("Lyrik Ultimate RC2"), Some("29\", 160mm")),
    master("f2", "Fork", Some("RockShox"), Some("Lyrik Ultimate-RC2"), Some("29\", 160mm")),
  ])
  .await;

  let groups = find_duplicate_groups(&s).await.unwrap();
  assert_eq!(groups.len(), 1);
  assert_eq!(groups[0].components.len(), 2);
}

#[tokio::test]
async fn scan_never_emits_singleton_groups() {
  let s = store().await;
  put_masters(&s, vec![
    master("f1", "Fork", Some("RockShox"), Some("Lyrik"), None),
    master("p1", "Seatpost", Some("OneUp"), Some("V3"), None),
    master("p2", "Seatpost", Some("OneUp"), Some("V2"), None),
  ])
  .await;

  let groups = find_duplicate_groups(&s).await.unwrap();
  assert!(groups.iter().all(|g| g.components.len() >= 2));
  assert!(groups.is_empty());
}

#[tokio::test]
async fn scan_skips_generic_components() {
  let s = store().await;
  put_masters(&s, vec![
    master("grips-1", "Grips", None, None, None),
    master("grips-2", "Grips", None, None, None),
  ])
  .await;

  assert!(find_duplicate_groups(&s).await.unwrap().is_empty());
}

#[tokio::test]
async fn scan_twice_returns_identical_groups() {
  let s = store().await;
  put_masters(&s, vec![
    master("d1", "Rear Derailleur", Some("Shimano"), Some("RD-M8100-SGS"), None),
    master("d2", "Rear Derailleur", Some("Shimano"), Some("RD-M8100"), None),
    master("f1", "Fork", Some("RockShox"), Some("Lyrik"), None),
    master("f2", "Fork", Some("RockShox"), Some("Lyrik"), None),
  ])
  .await;

  let first = find_duplicate_groups(&s).await.unwrap();
  let second = find_duplicate_groups(&s).await.unwrap();

  assert_eq!(first.len(), 2);
  for (a, b) in first.iter().zip(second.iter()) {
    assert_eq!(a.key, b.key);
    let ids = |g: &quiver_core::component::DuplicateGroup| {
      g.components.iter().map(|c| c.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(a), ids(b));
  }
}

// ─── Ignore registry ─────────────────────────────────────────────────────────

#[tokio::test]
async fn ignored_group_is_suppressed_on_rescan() {
  let s = store().await;
  put_masters(&s, vec![
    master("f1", "Fork", Some("RockShox"), Some("Lyrik"), None),
    master("f2", "Fork", Some("RockShox"), Some("Lyrik"), None),
  ])
  .await;

  let groups = find_duplicate_groups(&s).await.unwrap();
  assert_eq!(groups.len(), 1);

  ignore_group(&s, &groups[0].key).await.unwrap();
  assert!(find_duplicate_groups(&s).await.unwrap().is_empty());
}

#[tokio::test]
async fn re_ignoring_a_key_succeeds() {
  let s = store().await;
  ignore_group(&s, "Fork|RockShox|lyrik|no-size").await.unwrap();
  ignore_group(&s, "Fork|RockShox|lyrik|no-size").await.unwrap();

  let keys = s.ignored_keys().await.unwrap();
  assert_eq!(keys.len(), 1);
  assert!(keys.contains("Fork|RockShox|lyrik|no-size"));
}

// ─── Merge ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn merge_rewrites_references_across_all_users() {
  let s = store().await;
  put_masters(&s, vec![
    master("primary", "Fork", Some("RockShox"), Some("Lyrik"), None),
    master("dupe-1", "Fork", Some("RockShox"), Some("Lyrik "), None),
    master("dupe-2", "Fork", Some("RockShox"), Some("Lyrik-"), None),
  ])
  .await;

  let alice = s.add_user().await.unwrap();
  let bob = s.add_user().await.unwrap();
  s.add_equipment(
    alice.user_id,
    Some("Enduro".to_string()),
    vec![user_component("dupe-1"), user_component("other")],
  )
  .await
  .unwrap();
  s.add_equipment(bob.user_id, None, vec![user_component("dupe-2")])
    .await
    .unwrap();
  s.add_equipment(bob.user_id, None, vec![user_component("primary")])
    .await
    .unwrap();

  let report = merge_duplicates(&s, "primary", &[
    "dupe-1".to_string(),
    "dupe-2".to_string(),
  ])
  .await
  .unwrap();

  assert_eq!(report.users_scanned, 2);
  assert_eq!(report.equipment_updated, 2);
  assert_eq!(report.components_rewritten, 2);
  assert_eq!(report.masters_deleted, 2);

  for user_id in [alice.user_id, bob.user_id] {
    for item in s.list_equipment(user_id).await.unwrap() {
      for component in &item.components {
        assert_ne!(component.master_component_id, "dupe-1");
        assert_ne!(component.master_component_id, "dupe-2");
      }
    }
  }

  // Non-matching references are untouched.
  let alice_items = s.list_equipment(alice.user_id).await.unwrap();
  assert_eq!(alice_items[0].components[1].master_component_id, "other");
  // Extra payload fields survive the whole-list rewrite.
  assert_eq!(
    alice_items[0].components[0].extra["purchased"],
    serde_json::json!("2024-03-01")
  );
}

#[tokio::test]
async fn merge_deletes_merged_masters_and_keeps_the_primary() {
  let s = store().await;
  let primary = master("primary", "Fork", Some("RockShox"), Some("Lyrik"), None);
  put_masters(&s, vec![
    primary.clone(),
    master("dupe-1", "Fork", Some("RockShox"), Some("Lyrik "), None),
    master("dupe-2", "Fork", Some("RockShox"), Some("Lyrik-"), None),
  ])
  .await;

  merge_duplicates(&s, "primary", &["dupe-1".to_string(), "dupe-2".to_string()])
    .await
    .unwrap();

  assert!(s.get_master_component("dupe-1").await.unwrap().is_none());
  assert!(s.get_master_component("dupe-2").await.unwrap().is_none());
  let survivor = s.get_master_component("primary").await.unwrap().unwrap();
  assert_eq!(survivor, primary);
}

#[tokio::test]
async fn merged_group_no_longer_appears_in_scans() {
  let s = store().await;
  put_masters(&s, vec![
    master("f1", "Fork", Some("RockShox"), Some("Lyrik"), None),
    master("f2", "Fork", Some("RockShox"), Some("Lyrik"), None),
  ])
  .await;

  assert_eq!(find_duplicate_groups(&s).await.unwrap().len(), 1);
  merge_duplicates(&s, "f1", &["f2".to_string()]).await.unwrap();
  assert!(find_duplicate_groups(&s).await.unwrap().is_empty());
}

#[tokio::test]
async fn commit_tolerates_stale_targets() {
  let s = store().await;

  // Deleting an absent master and rewriting a vanished equipment record are
  // both safe no-ops, which is what makes a retried merge idempotent.
  let mut batch = WriteBatch::new();
  batch.delete_master_component("never-existed".to_string());
  batch.replace_equipment_components(Uuid::new_v4(), Uuid::new_v4(), vec![]);
  s.commit(batch).await.unwrap();

  let empty = WriteBatch::new();
  s.commit(empty).await.unwrap();
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_catalog_writes_derived_ids() {
  let s = store().await;
  let report = seed_catalog(&s, vec![
    NewMasterComponent {
      name:   "GX Eagle".to_string(),
      brand:  Some("SRAM".to_string()),
      series: None,
      model:  Some("XG-1275".to_string()),
      size:   None,
      system: System::Drivetrain,
    },
    NewMasterComponent {
      name:   "".to_string(),
      brand:  Some("  ".to_string()),
      series: None,
      model:  None,
      size:   None,
      system: System::Accessories,
    },
  ])
  .await
  .unwrap();

  assert_eq!(report.seeded, 1);
  assert_eq!(report.skipped, 1);

  let seeded = s
    .get_master_component("sram-gx-eagle-xg-1275")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(seeded.brand.as_deref(), Some("SRAM"));
  assert_eq!(seeded.system, System::Drivetrain);
}
