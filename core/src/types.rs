use std::io;

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::headers::HeaderError;
use crate::tlv::TlvError;

/// Unified envelope error covering format, key-derivation, AEAD and I/O failures.
/// - `From<T>` impls let `?` flow from headers, TLV and crypto into the engine.
/// - Format errors are raised before any key material is touched.
/// - `AuthenticationFailed` never says whether the secret or the data was wrong.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid magic")]
    InvalidMagic,

    #[error("unsupported version: {have}")]
    UnsupportedVersion { have: u8 },

    #[error("unsupported cipher suite: {raw}")]
    UnsupportedCipherSuite { raw: u8 },

    #[error("unsupported KDF: {raw}")]
    UnsupportedKdf { raw: u8 },

    /// A length or descriptor field disagrees with the registry.
    #[error("invalid {field} length: {have}")]
    InvalidFieldLength { field: &'static str, have: usize },

    /// Input ends before the declared layout does.
    #[error("truncated envelope: {have} < {need}")]
    Truncated { have: usize, need: usize },

    #[error("invalid key mode: {raw}")]
    InvalidKeyMode { raw: u8 },

    /// Strict policy: the TLV declares a key mode other than the caller's.
    #[error("key mode mismatch: caller {caller}, envelope {declared}")]
    KeyModeMismatch { caller: u8, declared: u8 },

    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed")]
    AuthenticationFailed,

    /// Hex transport or UTF-8 text could not be decoded.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TLV error: {0}")]
    Tlv(#[from] TlvError),
}

/// Fieldless discriminant of `EnvelopeError`, for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidMagic,
    UnsupportedVersion,
    UnsupportedCipherSuite,
    UnsupportedKdf,
    InvalidFieldLength,
    Truncated,
    InvalidKeyMode,
    KeyModeMismatch,
    KeyDerivationFailed,
    EncryptionFailed,
    AuthenticationFailed,
    InvalidEncoding,
    InvalidConfig,
    Io,
    Tlv,
}

impl EnvelopeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvelopeError::InvalidMagic => ErrorKind::InvalidMagic,
            EnvelopeError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            EnvelopeError::UnsupportedCipherSuite { .. } => ErrorKind::UnsupportedCipherSuite,
            EnvelopeError::UnsupportedKdf { .. } => ErrorKind::UnsupportedKdf,
            EnvelopeError::InvalidFieldLength { .. } => ErrorKind::InvalidFieldLength,
            EnvelopeError::Truncated { .. } => ErrorKind::Truncated,
            EnvelopeError::InvalidKeyMode { .. } => ErrorKind::InvalidKeyMode,
            EnvelopeError::KeyModeMismatch { .. } => ErrorKind::KeyModeMismatch,
            EnvelopeError::KeyDerivationFailed(_) => ErrorKind::KeyDerivationFailed,
            EnvelopeError::EncryptionFailed(_) => ErrorKind::EncryptionFailed,
            EnvelopeError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            EnvelopeError::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            EnvelopeError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            EnvelopeError::Io(_) => ErrorKind::Io,
            EnvelopeError::Tlv(_) => ErrorKind::Tlv,
        }
    }

    /// Format errors are detected from the bytes alone, before any key work.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidMagic
                | ErrorKind::UnsupportedVersion
                | ErrorKind::UnsupportedCipherSuite
                | ErrorKind::UnsupportedKdf
                | ErrorKind::InvalidFieldLength
                | ErrorKind::Truncated
        )
    }
}

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

impl From<HeaderError> for EnvelopeError {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::BufferTooShort { have, need } => EnvelopeError::Truncated { have, need },
            HeaderError::InvalidMagic { .. } => EnvelopeError::InvalidMagic,
            HeaderError::UnsupportedVersion { have } => EnvelopeError::UnsupportedVersion { have },
            HeaderError::UnsupportedCipherSuite { raw } => EnvelopeError::UnsupportedCipherSuite { raw },
            HeaderError::UnsupportedKdf { raw } => EnvelopeError::UnsupportedKdf { raw },
            HeaderError::InvalidSaltLength { have } => EnvelopeError::InvalidFieldLength {
                field: "salt",
                have: usize::from(have),
            },
            HeaderError::InvalidNonceLength { have } => EnvelopeError::InvalidFieldLength {
                field: "nonce",
                have: usize::from(have),
            },
            HeaderError::InvalidAadHash { len, .. } => EnvelopeError::InvalidFieldLength {
                field: "AAD hash",
                have: usize::from(len),
            },
            HeaderError::Io(e) => EnvelopeError::Io(e),
        }
    }
}

impl From<CryptoError> for EnvelopeError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidKeyMode { raw } => EnvelopeError::InvalidKeyMode { raw },
            CryptoError::KeyMaterialMismatch { mode } => {
                EnvelopeError::InvalidKeyMode { raw: mode.as_wire() }
            }
            CryptoError::KeyDerivation(msg) => EnvelopeError::KeyDerivationFailed(msg),
            CryptoError::Hash(msg) => EnvelopeError::KeyDerivationFailed(msg),
            CryptoError::Encryption(msg) => EnvelopeError::EncryptionFailed(msg),
            CryptoError::Random(msg) => EnvelopeError::EncryptionFailed(msg),
            CryptoError::AuthenticationFailed => EnvelopeError::AuthenticationFailed,
        }
    }
}
