//! constants.rs
//! Wire-format registry for the LRS envelope.
//!
//! Every id written into a header or TLV entry lives here so encoder,
//! decoder and tests agree on one table.

/// Magic marker of the current (version 2) header.
pub const MAGIC_LRS: [u8; 3] = *b"LRS";
/// Magic marker of the legacy (version 1) header. Its first three bytes
/// are `MAGIC_LRS`, the fourth is the ASCII digit `1`.
pub const MAGIC_LRS1: [u8; 4] = *b"LRS1";

pub const HEADER_V1: u8 = 1;
pub const HEADER_V2: u8 = 2;
/// Version every encoder in this crate writes by default.
pub const CURRENT_VERSION: u8 = HEADER_V2;

/// Stable primitive sizes (bytes).
pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 24;
pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;

/// AAD commitment sizes per header layout.
pub const AAD_HASH_LEN_V2: usize = 32;
pub const AAD_HASH_LEN_V1: usize = 16;

/// Raw keys are eight 32-bit words.
pub const RAW_KEY_WORDS: usize = 8;

/// BLAKE2b key used when hashing raw key material into an AEAD key.
/// Not used for any other hash in the format.
pub const RAW_KEY_DOMAIN: &[u8] = b"LRS-AEAD-KEY";

/// Default Argon2id cost as written by the reference encoder.
pub const DEFAULT_KDF_TIME_COST: u32 = 3;
pub const DEFAULT_KDF_MEMORY_KIB: u32 = 512 * 1024; // 512 MiB
pub const DEFAULT_KDF_PARALLELISM: u32 = 1;

/// Lighter preset for interactive callers.
pub const INTERACTIVE_KDF_TIME_COST: u32 = 2;
pub const INTERACTIVE_KDF_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB

/// Highest Argon2id cost the decryptor will honor from a header.
pub const MAX_KDF_TIME_COST: u32 = 16;
pub const MAX_KDF_MEMORY_KIB: u32 = 1024 * 1024; // 1 GiB
pub const MAX_KDF_PARALLELISM: u32 = 16;

/// Legacy headers store memory cost as log2(bytes).
pub const V1_MEM_LOG2_MIN: u8 = 10;
pub const V1_MEM_LOG2_MAX: u8 = 30; // 1 GiB, same ceiling as MAX_KDF_MEMORY_KIB

/// Fixed working buffer for the TLV section.
pub const DEFAULT_TLV_CAPACITY: usize = 64;
/// type + length prefix of every TLV entry.
pub const TLV_ENTRY_OVERHEAD: usize = 2;
/// Space a timestamp entry needs (prefix + u64).
pub const TIMESTAMP_TLV_LEN: usize = TLV_ENTRY_OVERHEAD + 8;

/// Cipher suite identifiers (header byte 4).
pub mod cipher_ids {
    pub const XCHACHA20_POLY1305: u8 = 0x01;
}

/// KDF identifiers (header byte 5).
pub mod kdf_ids {
    pub const ARGON2ID: u8 = 0x01;
}

/// AAD commitment hash identifiers (header byte 60).
pub mod hash_ids {
    pub const NONE: u8 = 0x00;
    pub const BLAKE2B_256: u8 = 0x01;
}

/// TLV entry types.
pub mod tlv_types {
    pub const KEY_MODE: u8 = 0x01;
    pub const TIMESTAMP: u8 = 0x02;
    pub const FILE_ID: u8 = 0x03;
    pub const COMMENT: u8 = 0x04;
}

/// Key-mode values carried in the key-mode TLV entry.
pub mod key_modes {
    pub const PASSWORD: u8 = 0x00;
    pub const RAW_KEY: u8 = 0x01;
}
