//! SQL schema for the Quiver SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Canonical catalog. Rows are created by seeding and deleted by merge;
-- the core never updates them in place.
CREATE TABLE IF NOT EXISTS master_components (
    id         TEXT PRIMARY KEY,  -- slug derived from identity fields
    name       TEXT NOT NULL,     -- functional category ('Fork', 'Seatpost')
    brand      TEXT,              -- NULL means unknown, never ''
    series     TEXT,
    model      TEXT,
    size       TEXT,
    system     TEXT NOT NULL,     -- 'drivetrain' | 'brakes' | ...
    embedding  TEXT               -- JSON float array, external collaborator's
);

-- Operator-confirmed non-duplicates, keyed by the scanner's grouping key.
CREATE TABLE IF NOT EXISTS ignored_duplicates (
    key        TEXT PRIMARY KEY,
    ignored    INTEGER NOT NULL DEFAULT 1,
    ignored_at TEXT NOT NULL      -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS users (
    user_id    TEXT PRIMARY KEY,
    created_at TEXT NOT NULL
);

-- Equipment documents embed their component list as JSON; merge rewrites
-- replace the whole list, never a single element.
CREATE TABLE IF NOT EXISTS equipment (
    equipment_id    TEXT PRIMARY KEY,
    user_id         TEXT NOT NULL REFERENCES users(user_id),
    name            TEXT,
    components_json TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS equipment_user_idx ON equipment(user_id);

PRAGMA user_version = 1;
";
