//! lrs-core
//!
//! Versioned, self-describing encrypted envelopes.
//! Password (Argon2id) or raw-key (keyed BLAKE2b) key establishment,
//! XChaCha20-Poly1305 sealing, TLV metadata, legacy version 1 reading.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Wire format
pub mod headers;
pub mod tlv;

// Primitives and the engine over them
pub mod crypto;
pub mod envelope;
pub mod telemetry;

pub use config::{EnvelopeConfig, KeyModePolicy};
pub use crypto::{KdfParams, KeyMaterial, KeyMode};
pub use envelope::{EncryptOptions, Envelope, EnvelopeEngine};
pub use types::{EnvelopeError, EnvelopeResult, ErrorKind};

/// Encrypt with the default providers and the given KDF cost.
pub fn encrypt(
    plaintext: &[u8],
    material: &KeyMaterial,
    mode: KeyMode,
    aad: &[u8],
    kdf: KdfParams,
) -> EnvelopeResult<Vec<u8>> {
    EnvelopeEngine::new(EnvelopeConfig::new(kdf))?.encrypt(plaintext, material, mode, aad)
}

/// Decrypt with the default providers. The KDF cost comes from the header.
pub fn decrypt(
    envelope: &[u8],
    material: &KeyMaterial,
    mode: KeyMode,
    aad: &[u8],
) -> EnvelopeResult<Vec<u8>> {
    EnvelopeEngine::default().decrypt(envelope, material, mode, aad)
}

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{EnvelopeConfig, KeyModePolicy};
    pub use crate::crypto::{AeadCipher, Hash, PasswordKdf, SecureRandom};
    pub use crate::crypto::{KdfParams, KeyMaterial, KeyMode};
    pub use crate::envelope::{EncryptOptions, Envelope, EnvelopeEngine};
    pub use crate::types::{EnvelopeError, EnvelopeResult, ErrorKind};
}
