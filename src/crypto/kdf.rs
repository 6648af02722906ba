//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every vault stores a random salt and the iteration count it was
//! created with.  Feeding the master password through PBKDF2 with those
//! two values yields the AES-256 key for every secret file in the vault.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{ConjureError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Iteration count used when nothing else is configured.
pub const DEFAULT_ITERATIONS: u32 = 50_000;

/// Lowest iteration count we are willing to derive with.
pub const MIN_ITERATIONS: u32 = 50_000;

/// Tunable PBKDF2 parameters.
///
/// Only consulted when a vault is created; an existing vault always
/// derives with the iteration count recorded in its state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2 rounds (default: 50 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte key from a password and salt with the default
/// iteration count.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_params(password, salt, &KdfParams::default())
}

/// Derive a 32-byte key with explicit PBKDF2 parameters.
///
/// The same password + salt + params always produce the same key.
/// Iteration counts below `MIN_ITERATIONS` are rejected.
pub fn derive_key_with_params(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<[u8; KEY_LEN]> {
    if params.iterations < MIN_ITERATIONS {
        return Err(ConjureError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut key);
    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_iterations_below_floor() {
        let params = KdfParams { iterations: 1_000 };
        let result = derive_key_with_params(b"pw", &[0u8; SALT_LEN], &params);
        assert!(matches!(
            result,
            Err(ConjureError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn iteration_count_changes_the_key() {
        let salt = [0x11u8; SALT_LEN];
        let low = derive_key_with_params(b"pw", &salt, &KdfParams::default()).unwrap();
        let high =
            derive_key_with_params(b"pw", &salt, &KdfParams { iterations: 50_001 }).unwrap();
        assert_ne!(low, high);
    }

    #[test]
    fn matches_rfc_7914_pbkdf2_sha256_vector() {
        // RFC 7914 section 11, first vector, truncated to 32 bytes.
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(b"passwd", b"salt", 1, &mut key);
        assert_eq!(
            key[..8],
            [0x55u8, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f]
        );
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
