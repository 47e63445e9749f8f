//! Store configuration.
//!
//! Everything has a sensible default; a TOML file can override any field:
//!
//! ```toml
//! data_dir = "/data/app/trailstore"
//! db_file = "hikes.db"
//! pbkdf2_iterations = 200000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::auth::password::DEFAULT_ITERATIONS;

fn default_db_file() -> String {
    "trailstore.db".to_string()
}

fn default_session_file() -> String {
    "session.json".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the database file and the session file.
    #[serde(default = "StoreConfig::default_data_dir")]
    pub data_dir: PathBuf,

    /// Database filename inside `data_dir`.
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// Session filename inside `data_dir`.
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// PBKDF2 iteration count for newly hashed passwords. Existing hashes
    /// embed their own count and verify regardless of this setting.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            db_file: default_db_file(),
            session_file: default_session_file(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

impl StoreConfig {
    fn default_data_dir() -> PathBuf {
        PathBuf::from(".")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(&self.session_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_field() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.db_file, "trailstore.db");
        assert_eq!(cfg.session_file, "session.json");
        assert_eq!(cfg.pbkdf2_iterations, DEFAULT_ITERATIONS);
    }

    #[test]
    fn partial_toml_uses_defaults_for_the_rest() {
        let cfg: StoreConfig = toml::from_str("data_dir = \"/tmp/trail\"").unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/trail"));
        assert_eq!(cfg.db_file, "trailstore.db");
        assert_eq!(cfg.db_path(), PathBuf::from("/tmp/trail/trailstore.db"));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("store.toml");
        std::fs::write(&path, "data_dir = \"/data\"\npbkdf2_iterations = 1000\n").unwrap();

        let cfg = StoreConfig::load(&path).unwrap();
        assert_eq!(cfg.pbkdf2_iterations, 1000);
        assert_eq!(cfg.session_path(), PathBuf::from("/data/session.json"));
    }

    #[test]
    fn load_missing_file_fails_with_path_context() {
        let err = StoreConfig::load(Path::new("/nonexistent/store.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/store.toml"));
    }
}
