//! Repository façade over the record stores.
//!
//! Repos add no business logic: each call forwards to a store, logs the
//! outcome with the operation name and key identifiers, and returns the
//! result unchanged. [`OpState`] is the tagged union UI layers hold while an
//! operation is in flight.

mod hikes;
mod observations;

pub use hikes::HikeRepo;
pub use observations::ObservationRepo;

use crate::error::StoreError;

/// UI-facing state of one asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> OpState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The success value, consuming the state.
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }

    /// The error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> From<Result<T, StoreError>> for OpState<T> {
    fn from(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}
