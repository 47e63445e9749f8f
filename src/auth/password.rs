//! PBKDF2 password hashing with packed-string encoding.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

/// PBKDF2 rounds for newly created hashes.
pub const DEFAULT_ITERATIONS: u32 = 120_000;

/// Salt byte length before base64 encoding.
const SALT_BYTES: usize = 16;

/// Derived key length (256 bits).
const KEY_BYTES: usize = 32;

const ALGORITHM_TAG: &str = "pbkdf2";

/// Derives packed password hashes. Verification is a free function because
/// the packed string embeds everything needed to re-derive.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::with_iterations(DEFAULT_ITERATIONS)
    }

    /// Override the round count (config knob; tests use a low value to stay
    /// fast). Existing hashes verify with their own embedded count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> String {
        let mut salt = [0u8; SALT_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut salt);
        self.hash_with_salt(plaintext, &salt)
    }

    /// Deterministic derivation with a caller-supplied salt.
    pub fn hash_with_salt(&self, plaintext: &str, salt: &[u8]) -> String {
        let mut key = [0u8; KEY_BYTES];
        pbkdf2_hmac::<Sha256>(plaintext.as_bytes(), salt, self.iterations, &mut key);
        format!(
            "{ALGORITHM_TAG}${}${}${}",
            self.iterations,
            B64.encode(salt),
            B64.encode(key)
        )
    }
}

/// Check a plaintext password against a packed hash string.
///
/// Fails closed: empty, wrong field count, wrong algorithm tag, non-numeric
/// or zero iteration count, and undecodable base64 all return `false`.
pub fn verify(plaintext: &str, packed: &str) -> bool {
    if packed.is_empty() {
        return false;
    }
    let parts: Vec<&str> = packed.split('$').collect();
    if parts.len() != 4 || parts[0] != ALGORITHM_TAG {
        return false;
    }
    let Ok(iterations) = parts[1].parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }
    let Ok(salt) = B64.decode(parts[2]) else {
        return false;
    };
    let Ok(expected) = B64.decode(parts[3]) else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }

    let mut derived = vec![0u8; expected.len()];
    pbkdf2_hmac::<Sha256>(plaintext.as_bytes(), &salt, iterations, &mut derived);

    constant_time_eq(&derived, &expected)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
