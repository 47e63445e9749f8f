//! Versioned schema migrations.
//!
//! The version lives in `PRAGMA user_version`. A fresh file gets the full seed
//! script and is stamped with the current version; older files receive each
//! version's delta inside its own transaction. Deltas are additive only:
//! new tables, columns, and indices, never destructive rewrites.

use rusqlite::Connection;

use super::script::split_statements;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 3;

const SCHEMA_SEED: &str = include_str!("schema_seed.sql");

/// Bring a connection's schema up to [`SCHEMA_VERSION`]. Safe to call on
/// every open; a current file is a no-op.
pub(crate) fn migrate(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    if version == 0 {
        return apply_seed(conn);
    }
    if version < 2 {
        apply_v2(conn)?;
    }
    if version < 3 {
        apply_v3(conn)?;
    }
    Ok(())
}

fn apply_seed(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    tracing::info!(version = SCHEMA_VERSION, "seeding fresh schema");
    let tx = conn.transaction()?;
    for stmt in split_statements(SCHEMA_SEED) {
        tx.execute_batch(&stmt)?;
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()
}

/// v2: users table plus per-user ownership of hikes.
fn apply_v2(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    tracing::info!("upgrading schema to version 2");
    let tx = conn.transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name     TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            avatar        TEXT,
            password_hash TEXT NOT NULL DEFAULT '',
            created_at    INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER) * 1000),
            updated_at    INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER) * 1000)
        );",
    )?;
    // Pre-v2 hikes get assigned to the first account.
    ignore_existing(
        tx.execute_batch("ALTER TABLE hikes ADD COLUMN user_id INTEGER NOT NULL DEFAULT 1"),
    )?;
    tx.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
         CREATE INDEX IF NOT EXISTS idx_hikes_user ON hikes(user_id);",
    )?;
    tx.pragma_update(None, "user_version", 2)?;
    tx.commit()
}

/// v3: hike cover images, and password_hash for users tables created before
/// credentials moved into this store.
fn apply_v3(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    tracing::info!("upgrading schema to version 3");
    let tx = conn.transaction()?;
    ignore_existing(tx.execute_batch("ALTER TABLE hikes ADD COLUMN cover_image TEXT"))?;
    ignore_existing(
        tx.execute_batch("ALTER TABLE users ADD COLUMN password_hash TEXT NOT NULL DEFAULT ''"),
    )?;
    tx.pragma_update(None, "user_version", 3)?;
    tx.commit()
}

/// Swallow only the "this delta already ran" class of errors; anything else
/// propagates.
fn ignore_existing(result: Result<(), rusqlite::Error>) -> Result<(), rusqlite::Error> {
    match result {
        Ok(()) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(_, Some(ref msg)))
            if msg.contains("duplicate column name") || msg.contains("already exists") =>
        {
            Ok(())
        }
        Err(e) => Err(e),
    }
}
