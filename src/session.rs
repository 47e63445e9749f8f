//! Durable session identity.
//!
//! A `SessionStore` is an explicit handle over a small JSON file mapping the
//! device to the currently authenticated user id, with no ambient global
//! state. Logged out is the absence of the file (or an unreadable one).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::StoreConfig;
use crate::error::StoreResult;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    user_id: i64,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Session file at the path a [`StoreConfig`] points to.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.session_path())
    }

    /// The authenticated user id, or `None` when logged out. Missing or
    /// corrupt files read as logged out rather than erroring.
    pub fn current_user(&self) -> Option<i64> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let parsed: SessionFile = serde_json::from_str(&raw).ok()?;
        Some(parsed.user_id)
    }

    /// Record the authenticated user. Idempotent; overwrites any previous id.
    pub fn set_current_user(&self, user_id: i64) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string(&SessionFile { user_id }).map_err(std::io::Error::from)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }

    /// Log out. Idempotent; clearing an already-clear session is fine.
    pub fn clear(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(tmp: &TempDir) -> SessionStore {
        SessionStore::new(tmp.path().join("session.json"))
    }

    #[test]
    fn starts_logged_out() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(session_in(&tmp).current_user(), None);
    }

    #[test]
    fn set_then_get_then_clear() {
        let tmp = TempDir::new().unwrap();
        let session = session_in(&tmp);

        session.set_current_user(42).unwrap();
        assert_eq!(session.current_user(), Some(42));

        session.clear().unwrap();
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn set_is_idempotent_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let session = session_in(&tmp);

        session.set_current_user(1).unwrap();
        session.set_current_user(1).unwrap();
        session.set_current_user(2).unwrap();
        assert_eq!(session.current_user(), Some(2));
    }

    #[test]
    fn clear_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let session = session_in(&tmp);

        session.clear().unwrap();
        session.set_current_user(7).unwrap();
        session.clear().unwrap();
        session.clear().unwrap();
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn survives_reopening_the_store() {
        let tmp = TempDir::new().unwrap();
        session_in(&tmp).set_current_user(9).unwrap();

        let reopened = session_in(&tmp);
        assert_eq!(reopened.current_user(), Some(9));
    }

    #[test]
    fn corrupt_file_reads_as_logged_out() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert_eq!(SessionStore::new(path).current_user(), None);
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let session = SessionStore::new(tmp.path().join("deep").join("session.json"));
        session.set_current_user(3).unwrap();
        assert_eq!(session.current_user(), Some(3));
    }
}
