//! Error taxonomy for the store core.
//!
//! Two audiences: `Validation` carries a message the UI may show verbatim;
//! `Storage` and `Io` deliberately display a generic "operation failed" so
//! SQL and filesystem detail never reaches the user.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// User-correctable input problem (duplicate email, missing field, ...).
    #[error("{0}")]
    Validation(String),

    /// A lookup by id that the caller expected to succeed came back empty.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Storage-layer fault. Display stays generic; the source error is
    /// preserved for logging.
    #[error("operation failed")]
    Storage(#[from] rusqlite::Error),

    /// Filesystem fault (session file, database directory).
    #[error("operation failed")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_display_is_generic() {
        let err = StoreError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.to_string(), "operation failed");
    }

    #[test]
    fn io_display_is_generic() {
        let err = StoreError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "secret path detail",
        ));
        assert_eq!(err.to_string(), "operation failed");
    }

    #[test]
    fn validation_display_carries_message() {
        let err = StoreError::validation("email is required");
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = StoreError::not_found("hike", 42);
        assert_eq!(err.to_string(), "hike 42 not found");
    }
}
