//! Embedded credential and record-store core for hike logging.
//!
//! The UI layer (navigation, forms, image picking) lives elsewhere and calls
//! into this crate through the repository façades:
//!
//! - [`auth`]: PBKDF2 password hashing and packed-hash verification
//! - [`db`]: SQLite handle, versioned schema migrations
//! - [`store`]: typed CRUD and filtered search over users, hikes, observations
//! - [`session`]: durable current-user identity
//! - [`repo`]: logging façades returning uniform results, plus [`repo::OpState`]
//!
//! All operations are blocking and synchronous; a single `Database` handle
//! serializes writers. Callers dispatch long work (hashing, large searches)
//! off their UI thread and feed outcomes back through `OpState`.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod repo;
pub mod session;
pub mod store;

pub use config::StoreConfig;
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use model::{Difficulty, Hike, Observation, User};
pub use repo::{HikeRepo, ObservationRepo, OpState};
pub use session::SessionStore;
pub use store::{end_of_day_millis, HikeSearch, HikeStore, ObservationStore, UserStore};
