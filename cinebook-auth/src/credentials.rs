//! Password hashing with PBKDF2-HMAC-SHA-256.
//!
//! The stored blob is base64(salt || derived_key): 16 random salt bytes
//! followed by a 32-byte derived key. The salt is regenerated on every
//! hash, so equal passwords never produce equal blobs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Hash a password into a self-contained blob.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut key);

    let mut combined = Vec::with_capacity(SALT_LEN + KEY_LEN);
    combined.extend_from_slice(&salt);
    combined.extend_from_slice(&key);
    STANDARD.encode(combined)
}

/// Verify a password against a stored blob.
///
/// Returns false on any malformed input; never panics or errors.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let combined = match STANDARD.decode(stored) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    if combined.len() != SALT_LEN + KEY_LEN {
        return false;
    }

    let (salt, expected) = combined.split_at(SALT_LEN);
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);

    constant_time_eq(&key, expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let blob = hash_password("S3cret!pass");
        assert!(verify_password("S3cret!pass", &blob));
        assert!(!verify_password("S3cret!paSS", &blob));
    }

    #[test]
    fn test_fresh_salt_every_call() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_malformed_blob_is_false_not_panic() {
        assert!(!verify_password("anything", "not base64 !!"));
        assert!(!verify_password("anything", ""));
        // Valid base64 but wrong length
        assert!(!verify_password("anything", &STANDARD.encode([0u8; 7])));
    }
}
