//! crypto/kdf.rs
//! Key derivation dispatch: password via Argon2id, raw key via keyed BLAKE2b.
//!
//! Design:
//! - Password mode: Argon2id v1.3 over (password, 16-byte salt) with the header's cost.
//! - Raw-key mode: eight u32 words serialized big-endian, hashed under the
//!   `RAW_KEY_DOMAIN` key to 32 bytes. The salt and cost are not used.
//!
//! Security notes:
//! - Every intermediate secret buffer is a zeroizing type, so early returns wipe too.
//! - The derived key is owned by the calling encrypt/decrypt and dropped right after the AEAD step.

use argon2::{Algorithm, Argon2, Params, Version};
use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::{RAW_KEY_DOMAIN, RAW_KEY_WORDS};
use crate::crypto::traits::{Hash, PasswordKdf};
use crate::crypto::types::{CryptoError, DerivedKey, KdfCost, KeyMaterial, KeyMode};
use crate::crypto::types::{KEY_LEN, SALT_LEN};

/// Argon2id (v1.3) provider for the `PasswordKdf` capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2idKdf;

impl PasswordKdf for Argon2idKdf {
    fn derive(
        &self,
        password: &[u8],
        salt: &[u8; SALT_LEN],
        cost: &KdfCost,
    ) -> Result<DerivedKey, CryptoError> {
        let memory_kib = u32::try_from(cost.memory_bytes / 1024).map_err(|_| {
            CryptoError::KeyDerivation(format!("memory cost too large: {} bytes", cost.memory_bytes))
        })?;

        let params = Params::new(memory_kib, cost.time_cost, cost.parallelism, Some(KEY_LEN))
            .map_err(|e| CryptoError::KeyDerivation(format!("invalid Argon2 parameters: {}", e)))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key: DerivedKey = Zeroizing::new([0u8; KEY_LEN]);
        argon2
            .hash_password_into(password, salt, &mut *key)
            .map_err(|e| CryptoError::KeyDerivation(format!("Argon2id failed: {}", e)))?;
        Ok(key)
    }
}

/// Big-endian serialization of a raw key, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
struct RawKeyBytes([u8; RAW_KEY_WORDS * 4]);

/// Hash raw key words into a 32-byte AEAD key under the raw-key domain label.
pub fn derive_raw_key<H: Hash + ?Sized>(
    hash: &H,
    words: &[u32; RAW_KEY_WORDS],
) -> Result<DerivedKey, CryptoError> {
    let mut bytes = RawKeyBytes([0u8; RAW_KEY_WORDS * 4]);
    BigEndian::write_u32_into(words, &mut bytes.0);

    let mut key: DerivedKey = Zeroizing::new([0u8; KEY_LEN]);
    hash.keyed_digest(RAW_KEY_DOMAIN, &bytes.0, &mut key)?;
    Ok(key)
}

/// Derive the 256-bit AEAD key for `mode`.
///
/// # Errors
/// - `KeyMaterialMismatch` when `material` cannot serve `mode`.
/// - `KeyDerivation` when the KDF rejects the cost or fails.
pub fn derive_key<K, H>(
    kdf: &K,
    hash: &H,
    mode: KeyMode,
    material: &KeyMaterial,
    salt: &[u8; SALT_LEN],
    cost: &KdfCost,
) -> Result<DerivedKey, CryptoError>
where
    K: PasswordKdf + ?Sized,
    H: Hash + ?Sized,
{
    match (mode, material) {
        (KeyMode::Password, KeyMaterial::Password(password)) => {
            kdf.derive(password.as_bytes(), salt, cost)
        }
        (KeyMode::RawKey, KeyMaterial::RawKey(words)) => derive_raw_key(hash, words),
        (mode, _) => Err(CryptoError::KeyMaterialMismatch { mode }),
    }
}
