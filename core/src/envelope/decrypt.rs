//! envelope/decrypt.rs
//!
//! Decrypt flow:
//! 1. parse and validate the header (no key work on any format error)
//! 2. resolve the effective key mode from the TLV section and the policy
//! 3. bound the header's KDF cost by `max_kdf`
//! 4. derive key, open, drop key
//!
//! Terminal states are the plaintext or one error; there is no retry.

use tracing::{debug, warn};

use crate::config::KeyModePolicy;
use crate::constants::TAG_LEN;
use crate::crypto::{derive_key, AeadCipher, CryptoError, Hash, KeyMaterial, KeyMode, PasswordKdf};
use crate::envelope::types::{Envelope, EnvelopeEngine};
use crate::headers::Header;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::tlv::{find_tlv, TlvType};
use crate::types::{EnvelopeError, EnvelopeResult};

impl<K, H, A, R> EnvelopeEngine<K, H, A, R>
where
    K: PasswordKdf,
    H: Hash,
    A: AeadCipher,
{
    /// Decrypt envelope bytes of either supported version.
    ///
    /// `mode` is the caller's key mode. Under `KeyModePolicy::AutoDetect` a
    /// key-mode entry in the envelope takes precedence over it.
    pub fn decrypt(
        &self,
        envelope: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
    ) -> EnvelopeResult<Vec<u8>> {
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        self.open_bytes(envelope, material, mode, aad, &mut counters, &mut timer)
    }

    /// Decrypt an already parsed envelope.
    pub fn decrypt_envelope(
        &self,
        envelope: &Envelope,
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
    ) -> EnvelopeResult<Vec<u8>> {
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        self.open_parsed(envelope, material, mode, aad, &mut counters, &mut timer)
    }

    /// Like `decrypt`, also reporting counters and stage times.
    /// The snapshot is produced on failure too.
    pub fn decrypt_with_telemetry(
        &self,
        envelope: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
    ) -> (EnvelopeResult<Vec<u8>>, TelemetrySnapshot) {
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        let res = self.open_bytes(envelope, material, mode, aad, &mut counters, &mut timer);
        timer.finish();
        (res, TelemetrySnapshot::from(&counters, &timer))
    }

    /// Key mode this call will derive with.
    ///
    /// Version 1 envelopes are always password mode. For version 2 only a
    /// one-byte key-mode entry counts as a declaration; anything else leaves
    /// the caller's mode in place.
    pub fn resolve_key_mode(&self, envelope: &Envelope, caller: KeyMode) -> EnvelopeResult<KeyMode> {
        if let Header::V1(_) = envelope.header() {
            return Ok(KeyMode::Password);
        }
        let declared = find_tlv(envelope.tlv(), TlvType::KeyMode)
            .filter(|v| v.len() == 1)
            .map(|v| v[0]);
        let Some(raw) = declared else {
            return Ok(caller);
        };

        match self.config.key_mode_policy {
            KeyModePolicy::AutoDetect => {
                let declared = KeyMode::from_wire(raw)?;
                if declared != caller {
                    debug!(?caller, ?declared, "key mode taken from envelope");
                }
                Ok(declared)
            }
            KeyModePolicy::Strict => {
                if raw != caller.as_wire() {
                    warn!(caller = caller.as_wire(), declared = raw, "key mode mismatch");
                    return Err(EnvelopeError::KeyModeMismatch { caller: caller.as_wire(), declared: raw });
                }
                Ok(caller)
            }
        }
    }

    fn open_bytes(
        &self,
        bytes: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
        counters: &mut TelemetryCounters,
        timer: &mut TelemetryTimer,
    ) -> EnvelopeResult<Vec<u8>> {
        let envelope = timer.time(Stage::Parse, || Envelope::parse(bytes)).map_err(|e| {
            warn!(error = %e, len = bytes.len(), "envelope rejected");
            e
        })?;
        self.open_parsed(&envelope, material, mode, aad, counters, timer)
    }

    fn open_parsed(
        &self,
        envelope: &Envelope,
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
        counters: &mut TelemetryCounters,
        timer: &mut TelemetryTimer,
    ) -> EnvelopeResult<Vec<u8>> {
        let header = envelope.header();
        debug!(
            version = header.version(),
            tlv_len = header.tlv_len(),
            ciphertext_len = envelope.ciphertext().len(),
            "header parsed"
        );

        let effective = self.resolve_key_mode(envelope, mode)?;
        let cost = header.kdf_cost().ok_or_else(|| {
            EnvelopeError::KeyDerivationFailed("legacy memory cost out of range".into())
        })?;
        if effective == KeyMode::Password && !cost.fits_within(&self.config.max_kdf) {
            warn!(
                time_cost = cost.time_cost,
                memory_bytes = cost.memory_bytes,
                parallelism = cost.parallelism,
                "kdf cost above limit"
            );
            return Err(EnvelopeError::KeyDerivationFailed(format!(
                "kdf cost exceeds limit: t={}, m={} bytes, p={}",
                cost.time_cost, cost.memory_bytes, cost.parallelism
            )));
        }

        if material.mode() == effective {
            counters.add_kdf();
        }
        let key = timer.time(Stage::Derive, || {
            derive_key(&self.kdf, &self.hash, effective, material, header.salt(), &cost)
        })?;

        counters.add_aead();
        let opened = timer.time(Stage::Open, || {
            self.cipher.open(&key, header.nonce(), aad, envelope.ciphertext())
        });
        drop(key);

        let plaintext = match opened {
            Ok(pt) => pt,
            Err(CryptoError::AuthenticationFailed) => {
                warn!(version = header.version(), "authentication failed");
                return Err(EnvelopeError::AuthenticationFailed);
            }
            Err(e) => return Err(e.into()),
        };

        counters.add_envelope(
            plaintext.len(),
            envelope.ciphertext().len(),
            header.encoded_len() + header.tlv_len() + TAG_LEN,
        );
        Ok(plaintext)
    }
}
