//! Credential hashing for signup and login.
//!
//! Provides:
//! - PBKDF2-HMAC-SHA256 password derivation (120k rounds + per-user salt)
//! - Packed hash strings (`pbkdf2$<iter>$<salt>$<hash>`) that embed their own
//!   salt and iteration count
//! - Fail-closed verification with a constant-time comparison
//!
//! ## Design Decisions
//! - No password-hash framework dependency — the packed format is fixed by the
//!   on-disk data this crate must stay compatible with, so it is produced and
//!   parsed directly.
//! - Verification never errors: any malformed packed string is simply `false`.

pub mod password;

pub use password::{verify, PasswordHasher, DEFAULT_ITERATIONS};
