//! AES-256-GCM sealing of individual secret files.
//!
//! A sealed blob is self-contained: the random nonce travels in front of
//! the ciphertext, so a secret file is exactly
//!
//! ```text
//! [ nonce: 12 bytes | ciphertext | GCM tag: 16 bytes ]
//! ```
//!
//! Nonces are drawn at random per call.  With 96-bit random nonces a
//! single key must not seal more than about 2^32 blobs.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};

use super::kdf::KEY_LEN;
use crate::errors::{ConjureError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Seal `plaintext` under `key`, returning `nonce || ciphertext`.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| ConjureError::EncryptionFailed(format!("AES-GCM seal: {e}")))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Open a blob produced by `encrypt`.
///
/// Any failure (short blob, wrong key, flipped bit) is reported as
/// `DecryptionFailed`; the cause is deliberately not distinguished.
pub fn decrypt(key: &[u8; KEY_LEN], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_LEN {
        return Err(ConjureError::DecryptionFailed);
    }

    let (nonce, sealed) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| ConjureError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_blob_is_nonce_plus_tag_longer() {
        let key = [0x01u8; KEY_LEN];
        let blob = encrypt(&key, b"hello").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = [0x02u8; KEY_LEN];
        let blob = encrypt(&key, b"").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);
        assert!(decrypt(&key, &blob).unwrap().is_empty());
    }

    #[test]
    fn bare_nonce_without_tag_is_rejected() {
        let key = [0x03u8; KEY_LEN];
        let blob = encrypt(&key, b"data").unwrap();
        let result = decrypt(&key, &blob[..NONCE_LEN]);
        assert!(matches!(result, Err(ConjureError::DecryptionFailed)));
    }
}
