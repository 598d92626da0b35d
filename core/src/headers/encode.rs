//! headers/encode.rs
//!
//! Header encoding.
//!
//! Design notes:
//! - Field order must match `decode.rs` exactly.
//! - Integers are written with `byteorder` in network order.
//! - Returns fixed-size arrays so callers cannot mis-size the record.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

use crate::headers::types::{Header, HeaderError, HeaderV1, HeaderV2};
use crate::headers::types::{HEADER_LEN_V1, HEADER_LEN_V2};

/// Serialize a version 2 header into its 96-byte wire form.
#[inline]
pub fn encode_header_v2(h: &HeaderV2) -> Result<[u8; HEADER_LEN_V2], HeaderError> {
    let mut out = [0u8; HEADER_LEN_V2];
    let mut w: &mut [u8] = &mut out;

    w.write_all(&h.magic)?;                          // 0..3   magic
    w.write_u8(h.version)?;                          // 3      version
    w.write_u8(h.cipher_suite)?;                     // 4      cipher suite
    w.write_u8(h.kdf)?;                              // 5      KDF id
    w.write_u32::<BigEndian>(h.kdf_time_cost)?;      // 6..10  time cost
    w.write_u32::<BigEndian>(h.kdf_memory_kib)?;     // 10..14 memory (KiB)
    w.write_u32::<BigEndian>(h.kdf_parallelism)?;    // 14..18 parallelism
    w.write_u8(h.salt_len)?;                         // 18     salt length
    w.write_all(&h.salt)?;                           // 19..35 salt
    w.write_u8(h.nonce_len)?;                        // 35     nonce length
    w.write_all(&h.nonce)?;                          // 36..60 nonce
    w.write_u8(h.aad_hash_id)?;                      // 60     AAD hash id
    w.write_u8(h.aad_hash_len)?;                     // 61     AAD hash length
    w.write_all(&h.aad_hash)?;                       // 62..94 AAD commitment
    w.write_u16::<BigEndian>(h.tlv_len)?;            // 94..96 TLV length

    debug_assert!(w.is_empty(), "encoding wrote incorrect length");
    Ok(out)
}

/// Serialize a legacy version 1 header into its 67-byte wire form.
///
/// Only the legacy encoder uses this; the default encoder writes version 2.
#[inline]
pub fn encode_header_v1(h: &HeaderV1) -> Result<[u8; HEADER_LEN_V1], HeaderError> {
    let mut out = [0u8; HEADER_LEN_V1];
    let mut w: &mut [u8] = &mut out;

    w.write_all(&h.magic)?;          // 0..4   magic
    w.write_u8(h.version)?;          // 4      version
    w.write_u8(h.kdf_mem_log2)?;     // 5      memory cost log2
    w.write_u8(h.kdf_time_cost)?;    // 6      time cost
    w.write_u8(h.kdf_parallelism)?;  // 7      parallelism
    w.write_all(&h.reserved)?;       // 8..11  reserved
    w.write_all(&h.salt)?;           // 11..27 salt
    w.write_all(&h.nonce)?;          // 27..51 nonce
    w.write_all(&h.aad_hash)?;       // 51..67 AAD commitment

    debug_assert!(w.is_empty(), "encoding wrote incorrect length");
    Ok(out)
}

/// Serialize whichever layout the header carries.
pub fn encode_header(h: &Header) -> Result<Vec<u8>, HeaderError> {
    match h {
        Header::V1(h) => Ok(encode_header_v1(h)?.to_vec()),
        Header::V2(h) => Ok(encode_header_v2(h)?.to_vec()),
    }
}
