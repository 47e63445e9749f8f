//! Database handle and schema management.
//!
//! One `Database` per file. The connection sits behind a mutex: SQLite itself
//! serializes writers, and the single in-process handle keeps the crate's
//! "one logical writer" model simple. All operations are blocking; callers
//! dispatch off their UI thread themselves.

pub mod migrations;
pub(crate) mod script;

pub use migrations::SCHEMA_VERSION;

use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::path::Path;

use crate::config::StoreConfig;
use crate::error::StoreResult;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at the given path and migrate it to the
    /// current schema version.
    pub fn open(db_path: &Path) -> StoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open(db_path)?;

        // Foreign keys are per-connection and must be on before any other
        // statement runs, or cascade deletes silently stop working.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        // WAL mode for concurrent reads + crash safety
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        migrations::migrate(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open at the path a [`StoreConfig`] points to.
    pub fn open_with(config: &StoreConfig) -> StoreResult<Self> {
        Self::open(&config.db_path())
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_parent_dirs_and_schema() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("trail.db");
        let db = Database::open(&path).unwrap();

        let version: i32 = db
            .conn()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn foreign_keys_are_on_for_the_connection() {
        let tmp = TempDir::new().unwrap();
        let db = Database::open(&tmp.path().join("trail.db")).unwrap();

        let fk: i32 = db
            .conn()
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn reopen_is_a_no_op_migration() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trail.db");
        drop(Database::open(&path).unwrap());
        let db = Database::open(&path).unwrap();

        let version: i32 = db
            .conn()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
