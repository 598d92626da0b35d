//! headers/decode.rs
//!
//! Header decoding.
//!
//! Design notes:
//! - `decode_header` reads the magic and version bytes first and picks the layout
//!   from them; a newer layout is never overlaid onto older bytes.
//! - Validation order: magic, version, cipher suite, KDF, salt length, nonce
//!   length, AAD hash descriptor. The first failure is returned.
//! - Nothing here touches key material.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::constants::{HEADER_V1, HEADER_V2, MAGIC_LRS, MAGIC_LRS1};
use crate::headers::types::{Header, HeaderError, HeaderV1, HeaderV2};

/// Offset of the version byte in the version 2 layout.
const V2_VERSION_OFFSET: usize = 3;
/// Offset of the version byte in the legacy layout.
const V1_VERSION_OFFSET: usize = 4;

/// Decode and validate a header of either supported version.
///
/// # Returns
/// - `Ok(Header::V2)` when bytes `0..3` are `"LRS"` and byte 3 is `2`.
/// - `Ok(Header::V1)` when bytes `0..4` are `"LRS1"` and byte 4 is `1`.
/// - `Err(InvalidMagic)` when the first three bytes are not `"LRS"`.
/// - `Err(UnsupportedVersion)` for any other version byte.
pub fn decode_header(buf: &[u8]) -> Result<Header, HeaderError> {
    if buf.len() < MAGIC_LRS.len() || buf[..MAGIC_LRS.len()] != MAGIC_LRS {
        let n = buf.len().min(MAGIC_LRS.len());
        return Err(HeaderError::InvalidMagic { have: buf[..n].to_vec() });
    }

    let Some(&tag) = buf.get(V2_VERSION_OFFSET) else {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: V2_VERSION_OFFSET + 1 });
    };

    if tag == HEADER_V2 {
        return decode_header_v2(buf).map(Header::V2);
    }

    if tag == MAGIC_LRS1[V2_VERSION_OFFSET] {
        let Some(&version) = buf.get(V1_VERSION_OFFSET) else {
            return Err(HeaderError::BufferTooShort { have: buf.len(), need: V1_VERSION_OFFSET + 1 });
        };
        if version != HEADER_V1 {
            return Err(HeaderError::UnsupportedVersion { have: version });
        }
        return decode_header_v1(buf).map(Header::V1);
    }

    // A three-byte magic followed by anything but 2 is not a layout any encoder writes.
    Err(HeaderError::UnsupportedVersion { have: tag })
}

/// Deserialize a 96-byte version 2 header.
pub fn decode_header_v2(buf: &[u8]) -> Result<HeaderV2, HeaderError> {
    if buf.len() < HeaderV2::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HeaderV2::LEN });
    }

    let mut r = Cursor::new(&buf[..HeaderV2::LEN]);

    let mut magic = [0u8; 3];
    r.read_exact(&mut magic)?;                           // 0..3   magic
    let version = r.read_u8()?;                          // 3      version
    let cipher_suite = r.read_u8()?;                     // 4      cipher suite
    let kdf = r.read_u8()?;                              // 5      KDF id
    let kdf_time_cost = r.read_u32::<BigEndian>()?;      // 6..10  time cost
    let kdf_memory_kib = r.read_u32::<BigEndian>()?;     // 10..14 memory (KiB)
    let kdf_parallelism = r.read_u32::<BigEndian>()?;    // 14..18 parallelism
    let salt_len = r.read_u8()?;                         // 18     salt length
    let mut salt = [0u8; 16];
    r.read_exact(&mut salt)?;                            // 19..35 salt
    let nonce_len = r.read_u8()?;                        // 35     nonce length
    let mut nonce = [0u8; 24];
    r.read_exact(&mut nonce)?;                           // 36..60 nonce
    let aad_hash_id = r.read_u8()?;                      // 60     AAD hash id
    let aad_hash_len = r.read_u8()?;                     // 61     AAD hash length
    let mut aad_hash = [0u8; 32];
    r.read_exact(&mut aad_hash)?;                        // 62..94 AAD commitment
    let tlv_len = r.read_u16::<BigEndian>()?;            // 94..96 TLV length

    debug_assert_eq!(r.position() as usize, HeaderV2::LEN);

    let h = HeaderV2 {
        magic,
        version,
        cipher_suite,
        kdf,
        kdf_time_cost,
        kdf_memory_kib,
        kdf_parallelism,
        salt_len,
        salt,
        nonce_len,
        nonce,
        aad_hash_id,
        aad_hash_len,
        aad_hash,
        tlv_len,
    };
    h.validate()?;
    Ok(h)
}

/// Deserialize a 67-byte legacy header.
pub fn decode_header_v1(buf: &[u8]) -> Result<HeaderV1, HeaderError> {
    if buf.len() < HeaderV1::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HeaderV1::LEN });
    }

    let mut r = Cursor::new(&buf[..HeaderV1::LEN]);

    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;               // 0..4   magic
    let version = r.read_u8()?;              // 4      version
    let kdf_mem_log2 = r.read_u8()?;         // 5      memory cost log2
    let kdf_time_cost = r.read_u8()?;        // 6      time cost
    let kdf_parallelism = r.read_u8()?;      // 7      parallelism
    let mut reserved = [0u8; 3];
    r.read_exact(&mut reserved)?;            // 8..11  reserved
    let mut salt = [0u8; 16];
    r.read_exact(&mut salt)?;                // 11..27 salt
    let mut nonce = [0u8; 24];
    r.read_exact(&mut nonce)?;               // 27..51 nonce
    let mut aad_hash = [0u8; 16];
    r.read_exact(&mut aad_hash)?;            // 51..67 AAD commitment

    let h = HeaderV1 {
        magic,
        version,
        kdf_mem_log2,
        kdf_time_cost,
        kdf_parallelism,
        reserved,
        salt,
        nonce,
        aad_hash,
    };
    h.validate()?;
    Ok(h)
}
