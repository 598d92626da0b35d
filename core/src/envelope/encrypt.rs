//! envelope/encrypt.rs
//!
//! Encrypt flow:
//! 1. fresh salt and nonce
//! 2. AAD commitment into the header
//! 3. TLV: key mode (mandatory), then timestamp / file id / comment when they fit
//! 4. derive key, seal, drop key
//! 5. assemble `header ‖ TLV ‖ ciphertext`
//!
//! No partial envelope is returned on any failure path.

use byteorder::{BigEndian, ByteOrder};
use chrono::Utc;
use tracing::debug;

use crate::constants::{TAG_LEN, TIMESTAMP_TLV_LEN, V1_MEM_LOG2_MAX, V1_MEM_LOG2_MIN};
use crate::crypto::{aad_commitment_v1, aad_commitment_v2, derive_key, generate_salt_and_nonce};
use crate::crypto::{AeadCipher, Hash, KdfParams, KeyMaterial, KeyMode, PasswordKdf, SecureRandom};
use crate::envelope::types::{EncryptOptions, EnvelopeEngine};
use crate::headers::{encode_header_v1, encode_header_v2, Header, HeaderV1, HeaderV2};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::tlv::{TlvBuffer, TlvType};
use crate::types::{EnvelopeError, EnvelopeResult};

impl<K, H, A, R> EnvelopeEngine<K, H, A, R>
where
    K: PasswordKdf,
    H: Hash,
    A: AeadCipher,
    R: SecureRandom,
{
    /// Encrypt into a version 2 envelope with the default metadata.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
    ) -> EnvelopeResult<Vec<u8>> {
        self.encrypt_with_options(plaintext, material, mode, aad, &EncryptOptions::default())
    }

    pub fn encrypt_with_options(
        &self,
        plaintext: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
        opts: &EncryptOptions,
    ) -> EnvelopeResult<Vec<u8>> {
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        self.seal_v2(plaintext, material, mode, aad, opts, &mut counters, &mut timer)
    }

    /// Like `encrypt_with_options`, also reporting counters and stage times.
    /// The snapshot is produced on failure too.
    pub fn encrypt_with_telemetry(
        &self,
        plaintext: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
        opts: &EncryptOptions,
    ) -> (EnvelopeResult<Vec<u8>>, TelemetrySnapshot) {
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        let res = self.seal_v2(plaintext, material, mode, aad, opts, &mut counters, &mut timer);
        timer.finish();
        (res, TelemetrySnapshot::from(&counters, &timer))
    }

    #[allow(clippy::too_many_arguments)]
    fn seal_v2(
        &self,
        plaintext: &[u8],
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
        opts: &EncryptOptions,
        counters: &mut TelemetryCounters,
        timer: &mut TelemetryTimer,
    ) -> EnvelopeResult<Vec<u8>> {
        let (salt, nonce) = generate_salt_and_nonce(&self.rng)?;

        let mut header = HeaderV2::new(salt, nonce, &self.config.kdf);
        if let Some(commitment) = aad_commitment_v2(&self.hash, aad)? {
            header.set_aad_hash(commitment);
        }

        let tlv = self.build_tlv(mode, opts)?;
        header.tlv_len = u16::try_from(tlv.len()).map_err(|_| {
            EnvelopeError::InvalidFieldLength { field: "TLV section", have: tlv.len() }
        })?;

        let cost = header.kdf_params().cost();
        if material.mode() == mode {
            counters.add_kdf();
        }
        let key = timer.time(Stage::Derive, || {
            derive_key(&self.kdf, &self.hash, mode, material, &salt, &cost)
        })?;

        counters.add_aead();
        let sealed = timer.time(Stage::Seal, || self.cipher.seal(&key, &nonce, aad, plaintext));
        drop(key);
        let ciphertext = sealed?;

        let out = timer.time(Stage::Assemble, || -> EnvelopeResult<Vec<u8>> {
            let header_bytes = encode_header_v2(&header)?;
            let mut out = Vec::with_capacity(header_bytes.len() + tlv.len() + ciphertext.len());
            out.extend_from_slice(&header_bytes);
            out.extend_from_slice(&tlv);
            out.extend_from_slice(&ciphertext);
            Ok(out)
        })?;

        counters.add_envelope(
            plaintext.len(),
            ciphertext.len(),
            HeaderV2::LEN + tlv.len() + TAG_LEN,
        );
        debug!(
            version = header.version,
            key_mode = ?mode,
            tlv_len = tlv.len(),
            ciphertext_len = ciphertext.len(),
            "envelope sealed"
        );
        Ok(out)
    }

    /// Mandatory key-mode entry, then optional entries while space remains.
    fn build_tlv(&self, mode: KeyMode, opts: &EncryptOptions) -> EnvelopeResult<Vec<u8>> {
        let mut tlv = TlvBuffer::with_capacity(self.config.tlv_capacity);
        tlv.append(TlvType::KeyMode, &[mode.as_wire()])?;

        if opts.timestamp && tlv.remaining() >= TIMESTAMP_TLV_LEN {
            let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
            let mut value = [0u8; 8];
            BigEndian::write_u64(&mut value, now);
            tlv.append(TlvType::Timestamp, &value)?;
        }

        let optional = [
            (TlvType::FileId, opts.file_id.as_deref()),
            (TlvType::Comment, opts.comment.as_deref()),
        ];
        for (tlv_type, value) in optional {
            let Some(value) = value else { continue };
            if let Err(e) = tlv.append(tlv_type, value) {
                debug!(?tlv_type, error = %e, "optional TLV entry skipped");
            }
        }

        Ok(tlv.into_bytes())
    }

    /// Encrypt into the legacy version 1 layout (password mode, no TLV).
    ///
    /// The configured Argon2 cost is stored the legacy way: memory as
    /// log2 of the byte count (rounded down), time and lanes as single bytes.
    pub fn encrypt_legacy_v1(
        &self,
        plaintext: &[u8],
        password: &str,
        aad: &[u8],
    ) -> EnvelopeResult<Vec<u8>> {
        let (salt, nonce) = generate_salt_and_nonce(&self.rng)?;

        let mut header = HeaderV1::new(salt, nonce);
        let (mem_log2, time_cost, parallelism) = legacy_cost(&self.config.kdf)?;
        header.kdf_mem_log2 = mem_log2;
        header.kdf_time_cost = time_cost;
        header.kdf_parallelism = parallelism;
        header.aad_hash = aad_commitment_v1(&self.hash, aad)?;

        let cost = Header::V1(header.clone()).kdf_cost().ok_or_else(|| {
            EnvelopeError::KeyDerivationFailed(format!("legacy memory cost 2^{}", mem_log2))
        })?;
        let key = self.kdf.derive(password.as_bytes(), &salt, &cost)?;
        let ciphertext = self.cipher.seal(&key, &nonce, aad, plaintext)?;
        drop(key);

        let header_bytes = encode_header_v1(&header)?;
        let mut out = Vec::with_capacity(header_bytes.len() + ciphertext.len());
        out.extend_from_slice(&header_bytes);
        out.extend_from_slice(&ciphertext);

        debug!(version = header.version, mem_log2, "legacy envelope sealed");
        Ok(out)
    }
}

fn legacy_cost(kdf: &KdfParams) -> EnvelopeResult<(u8, u8, u8)> {
    // Validated configs have memory_kib >= 1, so bytes >= 1024.
    let log2 = (63 - kdf.memory_bytes().leading_zeros()) as u8;
    let mem_log2 = log2.clamp(V1_MEM_LOG2_MIN, V1_MEM_LOG2_MAX);

    let time_cost = u8::try_from(kdf.time_cost).map_err(|_| {
        EnvelopeError::InvalidConfig(format!("time cost {} does not fit the legacy header", kdf.time_cost))
    })?;
    let parallelism = u8::try_from(kdf.parallelism).map_err(|_| {
        EnvelopeError::InvalidConfig(format!("parallelism {} does not fit the legacy header", kdf.parallelism))
    })?;
    Ok((mem_log2, time_cost, parallelism))
}
