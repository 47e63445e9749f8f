//! Typed CRUD and filtered search over the backing database.
//!
//! Every operation is parameterized and returns `StoreResult`; storage faults
//! never escape as panics. Each store holds a shared [`crate::db::Database`]
//! handle.

mod hikes;
mod observations;
mod users;

pub use hikes::{end_of_day_millis, HikeSearch, HikeStore};
pub use observations::ObservationStore;
pub use users::UserStore;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
