use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::{key_modes, RAW_KEY_WORDS};
use crate::constants::{DEFAULT_KDF_MEMORY_KIB, DEFAULT_KDF_PARALLELISM, DEFAULT_KDF_TIME_COST};
use crate::constants::{INTERACTIVE_KDF_MEMORY_KIB, INTERACTIVE_KDF_TIME_COST};
use crate::constants::{MAX_KDF_MEMORY_KIB, MAX_KDF_PARALLELISM, MAX_KDF_TIME_COST};
use crate::utils::enum_name_or_hex;

pub use crate::constants::{KEY_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};

/// 256-bit AEAD key, wiped when dropped.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// How the symmetric key is established.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum KeyMode {
    Password = key_modes::PASSWORD,
    RawKey = key_modes::RAW_KEY,
}

impl KeyMode {
    pub fn from_wire(raw: u8) -> Result<Self, CryptoError> {
        KeyMode::try_from(raw).map_err(|_| CryptoError::InvalidKeyMode { raw })
    }

    #[inline]
    pub fn as_wire(self) -> u8 {
        self as u8
    }
}

/// Secret input to key derivation.
///
/// Raw keys are held as eight 32-bit words; they are serialized big-endian
/// before hashing. Contents are wiped on drop and never printed.
pub enum KeyMaterial {
    Password(String),
    RawKey([u32; RAW_KEY_WORDS]),
}

impl KeyMaterial {
    pub fn password(password: impl Into<String>) -> Self {
        KeyMaterial::Password(password.into())
    }

    pub fn raw_key(words: [u32; RAW_KEY_WORDS]) -> Self {
        KeyMaterial::RawKey(words)
    }

    /// Build raw key material from its 32-byte big-endian wire form.
    pub fn raw_key_from_bytes(bytes: &[u8; RAW_KEY_WORDS * 4]) -> Self {
        let mut words = [0u32; RAW_KEY_WORDS];
        BigEndian::read_u32_into(bytes, &mut words);
        KeyMaterial::RawKey(words)
    }

    /// The key mode this material can serve.
    pub fn mode(&self) -> KeyMode {
        match self {
            KeyMaterial::Password(_) => KeyMode::Password,
            KeyMaterial::RawKey(_) => KeyMode::RawKey,
        }
    }
}

impl Zeroize for KeyMaterial {
    fn zeroize(&mut self) {
        match self {
            KeyMaterial::Password(p) => p.zeroize(),
            KeyMaterial::RawKey(words) => words.zeroize(),
        }
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Password(p) => f
                .debug_struct("Password")
                .field("len", &p.len())
                .finish(),
            KeyMaterial::RawKey(_) => f.write_str("RawKey([REDACTED])"),
        }
    }
}

/// Argon2id cost parameters as stored in a version 2 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Passes over memory.
    pub time_cost: u32,
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Lanes.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_KDF_TIME_COST,
            memory_kib: DEFAULT_KDF_MEMORY_KIB,
            parallelism: DEFAULT_KDF_PARALLELISM,
        }
    }
}

impl KdfParams {
    pub fn new(time_cost: u32, memory_kib: u32, parallelism: u32) -> Self {
        Self { time_cost, memory_kib, parallelism }
    }

    /// 2 passes over 64 MiB, single lane.
    pub fn interactive() -> Self {
        Self {
            time_cost: INTERACTIVE_KDF_TIME_COST,
            memory_kib: INTERACTIVE_KDF_MEMORY_KIB,
            parallelism: DEFAULT_KDF_PARALLELISM,
        }
    }

    /// Default ceiling for costs read from untrusted headers: 16 passes, 1 GiB, 16 lanes.
    pub fn decrypt_limit() -> Self {
        Self {
            time_cost: MAX_KDF_TIME_COST,
            memory_kib: MAX_KDF_MEMORY_KIB,
            parallelism: MAX_KDF_PARALLELISM,
        }
    }

    #[inline]
    pub fn memory_bytes(&self) -> u64 {
        u64::from(self.memory_kib) * 1024
    }

    pub fn cost(&self) -> KdfCost {
        KdfCost {
            time_cost: self.time_cost,
            memory_bytes: self.memory_bytes(),
            parallelism: self.parallelism,
        }
    }

    /// Reject zero costs before they reach a header.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.time_cost == 0 || self.memory_kib == 0 || self.parallelism == 0 {
            return Err(CryptoError::KeyDerivation(format!(
                "kdf cost parameters must be non-zero: t={}, m={} KiB, p={}",
                self.time_cost, self.memory_kib, self.parallelism
            )));
        }
        Ok(())
    }
}

/// Layout-independent cost handed to the password KDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfCost {
    pub time_cost: u32,
    pub memory_bytes: u64,
    pub parallelism: u32,
}

impl KdfCost {
    /// True when no component exceeds `limit`.
    pub fn fits_within(&self, limit: &KdfParams) -> bool {
        self.time_cost <= limit.time_cost
            && self.memory_bytes <= limit.memory_bytes()
            && self.parallelism <= limit.parallelism
    }
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key-mode byte outside the registry.
    #[error("invalid key mode: {}", key_mode_name(.raw))]
    InvalidKeyMode { raw: u8 },

    /// Key material variant cannot serve the effective key mode.
    #[error("key material does not match key mode {mode:?}")]
    KeyMaterialMismatch { mode: KeyMode },

    /// Password KDF or raw-key hashing failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// AEAD seal failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// AEAD tag mismatch. Wrong secret and tampering look the same.
    #[error("decryption failed")]
    AuthenticationFailed,

    /// Secure random source failed.
    #[error("random source failure: {0}")]
    Random(String),

    /// Hash primitive rejected its parameters.
    #[error("hash failure: {0}")]
    Hash(String),
}

fn key_mode_name(raw: &u8) -> String {
    enum_name_or_hex::<KeyMode>(*raw)
}
