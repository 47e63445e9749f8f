//! User account storage: signup, lookup, login.

use rusqlite::params;
use std::sync::Arc;

use super::now_millis;
use crate::auth::password::{self, PasswordHasher};
use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::model::User;

const USER_COLUMNS: &str = "id, full_name, email, avatar, password_hash";

/// Salt burned by the decoy derivation when an email is unknown.
const DUMMY_SALT: [u8; 16] = [0u8; 16];

pub struct UserStore {
    db: Arc<Database>,
    hasher: PasswordHasher,
}

impl UserStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_hasher(db, PasswordHasher::new())
    }

    pub fn with_hasher(db: Arc<Database>, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    /// Register a new account. Returns the user id.
    pub fn create(
        &self,
        full_name: &str,
        email: &str,
        plaintext: &str,
        avatar: Option<&str>,
    ) -> StoreResult<i64> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(StoreError::validation("full name is required"));
        }
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(StoreError::validation("email is required"));
        }
        if plaintext.is_empty() {
            return Err(StoreError::validation("password is required"));
        }

        let packed = self.hasher.hash(plaintext);
        let now = now_millis();

        let conn = self.db.conn();
        let result = conn.execute(
            "INSERT INTO users (full_name, email, avatar, password_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![full_name, email, avatar, packed, now, now],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::validation(format!(
                    "email '{email}' is already registered"
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let conn = self.db.conn();
        let row = conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            map_user,
        );
        optional(row)
    }

    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = normalize_email(email);
        let conn = self.db.conn();
        let row = conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email],
            map_user,
        );
        optional(row)
    }

    pub fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let email = normalize_email(email);
        let conn = self.db.conn();
        let row: Result<i64, _> = conn.query_row(
            "SELECT 1 FROM users WHERE email = ?1 LIMIT 1",
            params![email],
            |row| row.get(0),
        );
        match row {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace (or clear) the avatar reference. Returns rows affected.
    pub fn update_avatar(&self, user_id: i64, avatar: Option<&str>) -> StoreResult<usize> {
        let conn = self.db.conn();
        let rows = conn.execute(
            "UPDATE users SET avatar = ?1, updated_at = ?2 WHERE id = ?3",
            params![avatar, now_millis(), user_id],
        )?;
        Ok(rows)
    }

    /// Authenticate by email + password.
    ///
    /// Wrong email and wrong password return the same validation message, and
    /// an unknown email still burns one derivation so response timing does
    /// not reveal whether the account exists.
    pub fn login(&self, email: &str, plaintext: &str) -> StoreResult<User> {
        match self.find_by_email(email)? {
            Some(user) => {
                if password::verify(plaintext, &user.password_hash) {
                    Ok(user)
                } else {
                    Err(StoreError::validation("wrong email or password"))
                }
            }
            None => {
                let _ = self.hasher.hash_with_salt(plaintext, &DUMMY_SALT);
                Err(StoreError::validation("wrong email or password"))
            }
        }
    }

    pub fn count(&self) -> StoreResult<i64> {
        let conn = self.db.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        avatar: row.get(3)?,
        password_hash: row.get(4)?,
    })
}

fn optional(row: rusqlite::Result<User>) -> StoreResult<Option<User>> {
    match row {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
