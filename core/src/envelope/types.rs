//! envelope/types.rs
//!
//! Parsed envelope, encrypt options, and the engine that owns the providers.

use crate::config::EnvelopeConfig;
use crate::constants::TAG_LEN;
use crate::crypto::{aad_commitment_v1, aad_commitment_v2};
use crate::crypto::{Argon2idKdf, Blake2bHash, OsRandom, XChaCha20Poly1305Cipher};
use crate::headers::{decode_header, encode_header, AadHashAlg, Header};
use crate::tlv::TlvMetadata;
use crate::types::{EnvelopeError, EnvelopeResult};

/// A parsed envelope. Header fields are validated; nothing is decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub(crate) header: Header,
    pub(crate) tlv: Vec<u8>,
    pub(crate) ciphertext: Vec<u8>,
}

impl Envelope {
    /// Split raw bytes into header, TLV section and ciphertext.
    ///
    /// # Errors
    /// - Header errors in wire order (magic, version, cipher suite, KDF, lengths).
    /// - `Truncated` when the TLV section or the tag is cut short.
    pub fn parse(bytes: &[u8]) -> EnvelopeResult<Self> {
        let header = decode_header(bytes)?;

        let header_len = header.encoded_len();
        let tlv_end = header_len + header.tlv_len();
        if bytes.len() < tlv_end {
            return Err(EnvelopeError::Truncated { have: bytes.len(), need: tlv_end });
        }
        if bytes.len() - tlv_end < TAG_LEN {
            return Err(EnvelopeError::Truncated { have: bytes.len(), need: tlv_end + TAG_LEN });
        }

        Ok(Self {
            header,
            tlv: bytes[header_len..tlv_end].to_vec(),
            ciphertext: bytes[tlv_end..].to_vec(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> EnvelopeResult<Self> {
        Self::parse(bytes)
    }

    pub fn to_bytes(&self) -> EnvelopeResult<Vec<u8>> {
        let header = encode_header(&self.header)?;
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&header);
        out.extend_from_slice(&self.tlv);
        out.extend_from_slice(&self.ciphertext);
        Ok(out)
    }

    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + self.tlv.len() + self.ciphertext.len()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> u8 {
        self.header.version()
    }

    pub fn tlv(&self) -> &[u8] {
        &self.tlv
    }

    /// Ciphertext with the tag appended.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Plaintext length implied by the ciphertext.
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len() - TAG_LEN
    }

    pub fn metadata(&self) -> TlvMetadata {
        TlvMetadata::parse(&self.tlv)
    }

    /// Check the stored AAD commitment against `aad`.
    ///
    /// Decryption never calls this; the AEAD authenticates the raw AAD itself.
    pub fn aad_commitment_matches(&self, aad: &[u8]) -> EnvelopeResult<bool> {
        let hash = Blake2bHash;
        match &self.header {
            Header::V2(h) => match AadHashAlg::verify(h.aad_hash_id, h.aad_hash_len)? {
                AadHashAlg::None => Ok(aad.is_empty()),
                AadHashAlg::Blake2b256 => Ok(aad_commitment_v2(&hash, aad)? == Some(h.aad_hash)),
            },
            Header::V1(h) => Ok(aad_commitment_v1(&hash, aad)? == h.aad_hash),
        }
    }
}

/// Optional TLV metadata written after the mandatory key-mode entry.
///
/// Each entry is best-effort: it is skipped when the working buffer has no room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptOptions {
    pub timestamp: bool,
    pub file_id: Option<Vec<u8>>,
    pub comment: Option<Vec<u8>>,
}

impl Default for EncryptOptions {
    fn default() -> Self {
        Self { timestamp: true, file_id: None, comment: None }
    }
}

impl EncryptOptions {
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = false;
        self
    }

    pub fn with_file_id(mut self, file_id: impl Into<Vec<u8>>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<Vec<u8>>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Envelope encryptor/decryptor over pluggable providers.
///
/// Holds no per-call state, so one engine can serve many calls; each call
/// owns its own key buffer.
#[derive(Debug, Clone)]
pub struct EnvelopeEngine<
    K = Argon2idKdf,
    H = Blake2bHash,
    A = XChaCha20Poly1305Cipher,
    R = OsRandom,
> {
    pub(crate) kdf: K,
    pub(crate) hash: H,
    pub(crate) cipher: A,
    pub(crate) rng: R,
    pub(crate) config: EnvelopeConfig,
}

impl EnvelopeEngine {
    /// Engine with the default providers.
    pub fn new(config: EnvelopeConfig) -> EnvelopeResult<Self> {
        Self::with_providers(
            config,
            Argon2idKdf,
            Blake2bHash,
            XChaCha20Poly1305Cipher,
            OsRandom,
        )
    }
}

impl Default for EnvelopeEngine {
    fn default() -> Self {
        Self {
            kdf: Argon2idKdf,
            hash: Blake2bHash,
            cipher: XChaCha20Poly1305Cipher,
            rng: OsRandom,
            config: EnvelopeConfig::default(),
        }
    }
}

impl<K, H, A, R> EnvelopeEngine<K, H, A, R> {
    pub fn with_providers(
        config: EnvelopeConfig,
        kdf: K,
        hash: H,
        cipher: A,
        rng: R,
    ) -> EnvelopeResult<Self> {
        config.validate()?;
        Ok(Self { kdf, hash, cipher, rng, config })
    }

    /// Swap the password KDF, keeping everything else.
    pub fn with_kdf<K2>(self, kdf: K2) -> EnvelopeEngine<K2, H, A, R> {
        EnvelopeEngine {
            kdf,
            hash: self.hash,
            cipher: self.cipher,
            rng: self.rng,
            config: self.config,
        }
    }

    /// Swap the random source, keeping everything else.
    pub fn with_rng<R2>(self, rng: R2) -> EnvelopeEngine<K, H, A, R2> {
        EnvelopeEngine {
            kdf: self.kdf,
            hash: self.hash,
            cipher: self.cipher,
            rng,
            config: self.config,
        }
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    pub fn kdf(&self) -> &K {
        &self.kdf
    }
}
