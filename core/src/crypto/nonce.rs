//! crypto/nonce.rs
//! Salt and nonce generation.
//!
//! Design:
//! - Both come straight from the OS CSPRNG, fresh for every encryption.
//! - XChaCha20's 192-bit nonce makes random generation safe without a counter.
//!
//! Security notes:
//! - Never reuse a (salt, nonce) pair. Nothing in this crate caches either value.
//! - An all-zero draw is treated as a broken random source and rejected.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::traits::SecureRandom;
use crate::crypto::types::{CryptoError, NONCE_LEN, SALT_LEN};
use crate::utils::is_all_zero;

/// OS-backed provider for the `SecureRandom` capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::Random(e.to_string()))
    }
}

/// Draw a fresh 16-byte salt and 24-byte nonce.
pub fn generate_salt_and_nonce<R: SecureRandom + ?Sized>(
    rng: &R,
) -> Result<([u8; SALT_LEN], [u8; NONCE_LEN]), CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill(&mut salt)?;
    rng.fill(&mut nonce)?;

    validate_salt(&salt)?;
    if is_all_zero(&nonce) {
        return Err(CryptoError::Random("random source produced an all-zero nonce".into()));
    }
    Ok((salt, nonce))
}

/// Salt must not be all zeros.
#[inline]
pub fn validate_salt(salt: &[u8; SALT_LEN]) -> Result<(), CryptoError> {
    if is_all_zero(salt) {
        return Err(CryptoError::Random("random source produced an all-zero salt".into()));
    }
    Ok(())
}
