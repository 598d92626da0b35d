//! headers/types.rs
//! Header records for both on-disk layouts.
//!
//! Layout notes:
//! - Version 2 is 96 bytes, packed, multi-byte integers in network (big-endian) order.
//! - Version 1 is 67 bytes, single-byte cost fields, no TLV section.
//! - The two layouts are unrelated byte-wise; each has its own record type and
//!   its own decode function. `Header` tags which one was read.

use std::io;

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{cipher_ids, hash_ids, kdf_ids};
use crate::constants::{AAD_HASH_LEN_V1, AAD_HASH_LEN_V2, NONCE_LEN, SALT_LEN};
use crate::constants::{HEADER_V1, HEADER_V2, MAGIC_LRS, MAGIC_LRS1};
use crate::constants::{V1_MEM_LOG2_MAX, V1_MEM_LOG2_MIN};
use crate::crypto::types::{KdfCost, KdfParams};
use crate::utils::{enum_name_or_hex, fmt_bytes};

/// Fixed version 2 header size in bytes.
pub const HEADER_LEN_V2: usize = 96;
/// Fixed version 1 header size in bytes.
pub const HEADER_LEN_V1: usize = 67;

/// Cipher suites (header registry).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CipherSuite {
    XChaCha20Poly1305 = cipher_ids::XCHACHA20_POLY1305,
}
impl CipherSuite {
    pub fn verify(raw: u8) -> Result<Self, HeaderError> {
        CipherSuite::try_from(raw).map_err(|_| HeaderError::UnsupportedCipherSuite { raw })
    }
}

/// Key derivation functions (header registry).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum KdfAlgorithm {
    Argon2id = kdf_ids::ARGON2ID,
}
impl KdfAlgorithm {
    pub fn verify(raw: u8) -> Result<Self, HeaderError> {
        KdfAlgorithm::try_from(raw).map_err(|_| HeaderError::UnsupportedKdf { raw })
    }
}

/// AAD commitment algorithms (header registry).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum AadHashAlg {
    None = hash_ids::NONE,
    Blake2b256 = hash_ids::BLAKE2B_256,
}
impl AadHashAlg {
    /// Id and length must agree: `None` carries 0 bytes, `Blake2b256` carries 32.
    pub fn verify(id: u8, len: u8) -> Result<Self, HeaderError> {
        let alg = AadHashAlg::try_from(id).map_err(|_| HeaderError::InvalidAadHash { id, len })?;
        let expected = match alg {
            AadHashAlg::None => 0,
            AadHashAlg::Blake2b256 => AAD_HASH_LEN_V2,
        };
        if usize::from(len) != expected {
            return Err(HeaderError::InvalidAadHash { id, len });
        }
        Ok(alg)
    }
}

/// Current header layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV2 {
    pub magic: [u8; 3],             // "LRS"
    pub version: u8,                // 2
    pub cipher_suite: u8,           // CipherSuite id
    pub kdf: u8,                    // KdfAlgorithm id
    pub kdf_time_cost: u32,         // passes
    pub kdf_memory_kib: u32,        // memory cost in KiB
    pub kdf_parallelism: u32,       // lanes
    pub salt_len: u8,               // always 16
    pub salt: [u8; SALT_LEN],       // random per envelope
    pub nonce_len: u8,              // always 24
    pub nonce: [u8; NONCE_LEN],     // random per envelope
    pub aad_hash_id: u8,            // AadHashAlg id
    pub aad_hash_len: u8,           // 0 or 32
    pub aad_hash: [u8; AAD_HASH_LEN_V2], // AAD commitment, zero when absent
    pub tlv_len: u16,               // bytes of TLV following the header
}

impl Default for HeaderV2 {
    fn default() -> Self {
        Self::new([0u8; SALT_LEN], [0u8; NONCE_LEN], &KdfParams::default())
    }
}

impl HeaderV2 {
    pub const LEN: usize = HEADER_LEN_V2;

    /// Header with registry defaults, no AAD commitment and no TLV.
    pub fn new(salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN], kdf: &KdfParams) -> Self {
        Self {
            magic: MAGIC_LRS,
            version: HEADER_V2,
            cipher_suite: CipherSuite::XChaCha20Poly1305 as u8,
            kdf: KdfAlgorithm::Argon2id as u8,
            kdf_time_cost: kdf.time_cost,
            kdf_memory_kib: kdf.memory_kib,
            kdf_parallelism: kdf.parallelism,
            salt_len: SALT_LEN as u8,
            salt,
            nonce_len: NONCE_LEN as u8,
            nonce,
            aad_hash_id: AadHashAlg::None as u8,
            aad_hash_len: 0,
            aad_hash: [0u8; AAD_HASH_LEN_V2],
            tlv_len: 0,
        }
    }

    /// Record an AAD commitment.
    pub fn set_aad_hash(&mut self, hash: [u8; AAD_HASH_LEN_V2]) {
        self.aad_hash_id = AadHashAlg::Blake2b256 as u8;
        self.aad_hash_len = AAD_HASH_LEN_V2 as u8;
        self.aad_hash = hash;
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams::new(self.kdf_time_cost, self.kdf_memory_kib, self.kdf_parallelism)
    }

    /// Checks in wire order; the first failure wins.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.magic != MAGIC_LRS {
            return Err(HeaderError::InvalidMagic { have: self.magic.to_vec() });
        }
        if self.version != HEADER_V2 {
            return Err(HeaderError::UnsupportedVersion { have: self.version });
        }
        CipherSuite::verify(self.cipher_suite)?;
        KdfAlgorithm::verify(self.kdf)?;
        if usize::from(self.salt_len) != SALT_LEN {
            return Err(HeaderError::InvalidSaltLength { have: self.salt_len });
        }
        if usize::from(self.nonce_len) != NONCE_LEN {
            return Err(HeaderError::InvalidNonceLength { have: self.nonce_len });
        }
        AadHashAlg::verify(self.aad_hash_id, self.aad_hash_len)?;
        Ok(())
    }
}

/// Legacy header layout. Password mode only, implied XChaCha20-Poly1305 + Argon2id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV1 {
    pub magic: [u8; 4],             // "LRS1"
    pub version: u8,                // 1
    pub kdf_mem_log2: u8,           // memory cost = 2^n bytes
    pub kdf_time_cost: u8,
    pub kdf_parallelism: u8,
    pub reserved: [u8; 3],
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub aad_hash: [u8; AAD_HASH_LEN_V1], // BLAKE2b-128 of AAD, zero when absent
}

impl HeaderV1 {
    pub const LEN: usize = HEADER_LEN_V1;

    /// Header with the reference encoder's costs (2^28 bytes, 3 passes, 1 lane).
    pub fn new(salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN]) -> Self {
        Self {
            magic: MAGIC_LRS1,
            version: HEADER_V1,
            kdf_mem_log2: 28,
            kdf_time_cost: 3,
            kdf_parallelism: 1,
            reserved: [0u8; 3],
            salt,
            nonce,
            aad_hash: [0u8; AAD_HASH_LEN_V1],
        }
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.magic != MAGIC_LRS1 {
            return Err(HeaderError::InvalidMagic { have: self.magic.to_vec() });
        }
        if self.version != HEADER_V1 {
            return Err(HeaderError::UnsupportedVersion { have: self.version });
        }
        Ok(())
    }

    /// `2^kdf_mem_log2`, or `None` when the exponent is outside the sane range.
    pub fn memory_bytes(&self) -> Option<u64> {
        if (V1_MEM_LOG2_MIN..=V1_MEM_LOG2_MAX).contains(&self.kdf_mem_log2) {
            Some(1u64 << self.kdf_mem_log2)
        } else {
            None
        }
    }
}

/// A decoded header, tagged by the layout it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    V1(HeaderV1),
    V2(HeaderV2),
}

impl Header {
    pub fn version(&self) -> u8 {
        match self {
            Header::V1(h) => h.version,
            Header::V2(h) => h.version,
        }
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        match self {
            Header::V1(h) => &h.salt,
            Header::V2(h) => &h.salt,
        }
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        match self {
            Header::V1(h) => &h.nonce,
            Header::V2(h) => &h.nonce,
        }
    }

    /// Size of the fixed header record on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Header::V1(_) => HeaderV1::LEN,
            Header::V2(_) => HeaderV2::LEN,
        }
    }

    /// TLV bytes that follow the header. Always 0 for version 1.
    pub fn tlv_len(&self) -> usize {
        match self {
            Header::V1(_) => 0,
            Header::V2(h) => usize::from(h.tlv_len),
        }
    }

    /// Stored AAD commitment; empty when the header carries none.
    pub fn aad_hash(&self) -> &[u8] {
        match self {
            Header::V1(h) => &h.aad_hash,
            Header::V2(h) => &h.aad_hash[..usize::from(h.aad_hash_len)],
        }
    }

    /// Password-KDF cost for this header.
    ///
    /// Version 2 stores KiB; version 1 stores log2 of the byte count.
    pub fn kdf_cost(&self) -> Option<KdfCost> {
        match self {
            Header::V2(h) => Some(h.kdf_params().cost()),
            Header::V1(h) => h.memory_bytes().map(|memory_bytes| KdfCost {
                time_cost: u32::from(h.kdf_time_cost),
                memory_bytes,
                parallelism: u32::from(h.kdf_parallelism),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        match self {
            Header::V1(h) => h.validate(),
            Header::V2(h) => h.validate(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HeaderError {
    /// Buffer too short to contain the declared layout.
    #[error("header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Leading bytes are not an LRS magic marker.
    #[error("invalid magic: {}", fmt_bytes(.have))]
    InvalidMagic { have: Vec<u8> },

    /// Neither the current version nor the legacy one.
    #[error("unsupported version: {have}")]
    UnsupportedVersion { have: u8 },

    #[error("unsupported cipher suite: {}", cipher_suite_name(.raw))]
    UnsupportedCipherSuite { raw: u8 },

    #[error("unsupported KDF: {}", kdf_name(.raw))]
    UnsupportedKdf { raw: u8 },

    #[error("invalid salt length: {have}")]
    InvalidSaltLength { have: u8 },

    #[error("invalid nonce length: {have}")]
    InvalidNonceLength { have: u8 },

    /// AAD hash id unknown or inconsistent with its length.
    #[error("invalid AAD hash: id={id}, len={len}")]
    InvalidAadHash { id: u8, len: u8 },

    /// Reader or writer failure inside the fixed-size codec.
    #[error("header I/O error: {0}")]
    Io(#[from] io::Error),
}

fn cipher_suite_name(raw: &u8) -> String {
    enum_name_or_hex::<CipherSuite>(*raw)
}

fn kdf_name(raw: &u8) -> String {
    enum_name_or_hex::<KdfAlgorithm>(*raw)
}

