//! config.rs
//! Engine configuration.
//!
//! Notes:
//! - Loadable from JSON so callers can keep KDF cost next to their own settings.
//! - `validate` runs before any envelope is built; a bad config never reaches a header.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TLV_CAPACITY, TLV_ENTRY_OVERHEAD};
use crate::crypto::types::KdfParams;
use crate::types::{EnvelopeError, EnvelopeResult};

/// How the decryptor treats a key-mode entry found in the TLV section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyModePolicy {
    /// A declared key mode replaces the caller's for that call.
    #[default]
    AutoDetect,
    /// The caller's mode is authoritative; a differing declaration fails closed.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Argon2id cost written into every new version 2 header.
    pub kdf: KdfParams,
    /// Size of the TLV working buffer in bytes.
    pub tlv_capacity: usize,
    pub key_mode_policy: KeyModePolicy,
    /// Highest Argon2id cost accepted from a header on decrypt.
    pub max_kdf: KdfParams,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            tlv_capacity: DEFAULT_TLV_CAPACITY,
            key_mode_policy: KeyModePolicy::AutoDetect,
            max_kdf: KdfParams::decrypt_limit(),
        }
    }
}

impl EnvelopeConfig {
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf, ..Self::default() }
    }

    pub fn with_tlv_capacity(mut self, capacity: usize) -> Self {
        self.tlv_capacity = capacity;
        self
    }

    pub fn with_key_mode_policy(mut self, policy: KeyModePolicy) -> Self {
        self.key_mode_policy = policy;
        self
    }

    pub fn with_max_kdf(mut self, max_kdf: KdfParams) -> Self {
        self.max_kdf = max_kdf;
        self
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> EnvelopeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| EnvelopeError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> EnvelopeResult<()> {
        // Must hold at least the mandatory one-byte key-mode entry.
        let min = TLV_ENTRY_OVERHEAD + 1;
        if self.tlv_capacity < min {
            return Err(EnvelopeError::InvalidConfig(format!(
                "tlv_capacity {} is below the minimum of {}",
                self.tlv_capacity, min
            )));
        }
        if self.tlv_capacity > usize::from(u16::MAX) {
            return Err(EnvelopeError::InvalidConfig(format!(
                "tlv_capacity {} exceeds the 16-bit length field",
                self.tlv_capacity
            )));
        }
        self.kdf
            .validate()
            .and_then(|()| self.max_kdf.validate())
            .map_err(|e| EnvelopeError::InvalidConfig(e.to_string()))?;
        // Envelopes this engine writes must stay openable by it.
        if !self.kdf.cost().fits_within(&self.max_kdf) {
            return Err(EnvelopeError::InvalidConfig(format!(
                "kdf cost {:?} exceeds max_kdf {:?}",
                self.kdf, self.max_kdf
            )));
        }
        Ok(())
    }
}
