//! crypto/traits.rs
//! Capabilities the envelope engine is built on.
//!
//! The engine only sees these traits; the default providers live in
//! `aead.rs`, `kdf.rs`, `digest.rs` and `nonce.rs`. Tests swap in
//! instrumented implementations.

use crate::crypto::types::{CryptoError, DerivedKey, KdfCost};
use crate::crypto::types::{KEY_LEN, NONCE_LEN, SALT_LEN};

/// Authenticated encryption with a 256-bit key and a 24-byte nonce.
/// The tag is appended to the ciphertext.
pub trait AeadCipher {
    fn seal(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Must return `CryptoError::AuthenticationFailed` on tag mismatch and
    /// must not release any plaintext in that case.
    fn open(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        ciphertext_and_tag: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}

/// Memory-hard password hashing producing a 32-byte key.
pub trait PasswordKdf {
    fn derive(
        &self,
        password: &[u8],
        salt: &[u8; SALT_LEN],
        cost: &KdfCost,
    ) -> Result<DerivedKey, CryptoError>;
}

/// Cryptographic hash with optional keying for domain separation.
pub trait Hash {
    /// Unkeyed digest; output length is `out.len()`.
    fn digest(&self, data: &[u8], out: &mut [u8]) -> Result<(), CryptoError>;

    /// Keyed digest with a 32-byte output.
    fn keyed_digest(
        &self,
        key: &[u8],
        data: &[u8],
        out: &mut [u8; KEY_LEN],
    ) -> Result<(), CryptoError>;
}

/// Cryptographically secure random bytes.
pub trait SecureRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}
