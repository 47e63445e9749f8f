//! Entity types stored in the backing database.
//!
//! Timestamps are milliseconds since the Unix epoch throughout. Ids are
//! SQLite rowids; `None` means "not yet inserted".

use serde::{Deserialize, Serialize};

/// A registered account. Emails are stored trimmed and lowercased; uniqueness
/// is enforced at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    /// Packed hash string (`pbkdf2$<iter>$<salt>$<hash>`), never plaintext.
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// Trail difficulty rating as stored in the `difficulty` text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Moderate,
        }
    }
}

/// A logged hike owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Hike {
    pub id: Option<i64>,
    pub user_id: i64,
    pub name: String,
    pub location: String,
    /// Date of the hike, epoch millis.
    pub hike_date: i64,
    pub parking: bool,
    /// Trail length, must be > 0.
    pub length_km: f64,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub elevation_gain_m: Option<i32>,
    pub max_group_size: Option<i32>,
    /// Cover image reference (URI string), owned by the UI layer.
    pub cover_image: Option<String>,
}

/// A timestamped field observation attached to one hike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub id: Option<i64>,
    pub hike_id: i64,
    /// When the observation was made, epoch millis.
    pub observed_at: i64,
    pub note: String,
    pub comments: Option<String>,
}
