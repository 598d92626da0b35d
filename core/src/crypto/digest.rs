//! crypto/digest.rs
//! BLAKE2b provider for the `Hash` capability.
//!
//! - Unkeyed, variable output: AAD commitments (16 bytes legacy, 32 bytes current).
//! - Keyed, 32-byte output: raw-key derivation under a domain label.
//!
//! Output matches libsodium's `crypto_generichash` for the same key and length.

use crate::crypto::traits::Hash;
use crate::crypto::types::{CryptoError, KEY_LEN};

#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2bHash;

impl Hash for Blake2bHash {
    fn digest(&self, data: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
        use blake2::digest::{Update, VariableOutput};
        use blake2::Blake2bVar;

        let mut hasher = Blake2bVar::new(out.len())
            .map_err(|_| CryptoError::Hash(format!("unsupported BLAKE2b output length {}", out.len())))?;
        hasher.update(data);
        hasher
            .finalize_variable(out)
            .map_err(|_| CryptoError::Hash("BLAKE2b output buffer mismatch".into()))
    }

    fn keyed_digest(
        &self,
        key: &[u8],
        data: &[u8],
        out: &mut [u8; KEY_LEN],
    ) -> Result<(), CryptoError> {
        use blake2::digest::consts::U32;
        use blake2::digest::Mac;
        use blake2::Blake2bMac;

        let mut mac = <Blake2bMac<U32> as Mac>::new_from_slice(key)
            .map_err(|_| CryptoError::Hash(format!("unsupported BLAKE2b key length {}", key.len())))?;
        mac.update(data);
        out.copy_from_slice(&mac.finalize().into_bytes());
        Ok(())
    }
}
