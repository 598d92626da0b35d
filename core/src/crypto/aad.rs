//! crypto/aad.rs
//! AAD commitments stored in headers.
//!
//! The commitment is provenance only. AEAD authentication always binds the
//! raw AAD bytes supplied at call time, never this hash.

use crate::constants::{AAD_HASH_LEN_V1, AAD_HASH_LEN_V2};
use crate::crypto::traits::Hash;
use crate::crypto::types::CryptoError;

/// BLAKE2b-256 of `aad`, or `None` when there is no AAD.
pub fn aad_commitment_v2<H: Hash + ?Sized>(
    hash: &H,
    aad: &[u8],
) -> Result<Option<[u8; AAD_HASH_LEN_V2]>, CryptoError> {
    if aad.is_empty() {
        return Ok(None);
    }
    let mut out = [0u8; AAD_HASH_LEN_V2];
    hash.digest(aad, &mut out)?;
    Ok(Some(out))
}

/// BLAKE2b-128 of `aad` for the legacy header; all zero when there is no AAD.
pub fn aad_commitment_v1<H: Hash + ?Sized>(
    hash: &H,
    aad: &[u8],
) -> Result<[u8; AAD_HASH_LEN_V1], CryptoError> {
    let mut out = [0u8; AAD_HASH_LEN_V1];
    if !aad.is_empty() {
        hash.digest(aad, &mut out)?;
    }
    Ok(out)
}
