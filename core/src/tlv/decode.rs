//! tlv/decode.rs
//!
//! TLV scanning. Never errors: malformed input simply ends the scan.

use byteorder::{BigEndian, ByteOrder};

use crate::tlv::types::{TlvEntry, TlvType, TLV_ENTRY_OVERHEAD};

/// Iterator over well-formed entries of a TLV section.
///
/// Stops at the first entry whose header or value would run past the end
/// of the buffer.
#[derive(Debug, Clone)]
pub struct TlvIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for TlvIter<'a> {
    type Item = TlvEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.buf.get(self.pos..)?;
        if rest.len() < TLV_ENTRY_OVERHEAD {
            return None;
        }
        let tlv_type = rest[0];
        let len = usize::from(rest[1]);
        let Some(value) = rest.get(TLV_ENTRY_OVERHEAD..TLV_ENTRY_OVERHEAD + len) else {
            // Overrun: treat the section as ending here.
            self.pos = self.buf.len();
            return None;
        };
        self.pos += TLV_ENTRY_OVERHEAD + len;
        Some(TlvEntry { tlv_type, value })
    }
}

pub fn iter_tlv(buf: &[u8]) -> TlvIter<'_> {
    TlvIter { buf, pos: 0 }
}

/// First value stored under `tlv_type`, or `None`.
pub fn find_tlv(buf: &[u8], tlv_type: impl Into<u8>) -> Option<&[u8]> {
    let tlv_type = tlv_type.into();
    iter_tlv(buf).find(|e| e.tlv_type == tlv_type).map(|e| e.value)
}

/// Typed view of the recognized entries of a TLV section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlvMetadata {
    /// Raw key-mode byte, present only when the entry is exactly one byte long.
    pub key_mode: Option<u8>,
    /// Unix seconds, present only when the entry is exactly eight bytes long.
    pub timestamp: Option<u64>,
    pub file_id: Option<Vec<u8>>,
    pub comment: Option<Vec<u8>>,
}

impl TlvMetadata {
    pub fn parse(buf: &[u8]) -> Self {
        let key_mode = find_tlv(buf, TlvType::KeyMode)
            .filter(|v| v.len() == 1)
            .map(|v| v[0]);
        let timestamp = find_tlv(buf, TlvType::Timestamp)
            .filter(|v| v.len() == 8)
            .map(BigEndian::read_u64);

        Self {
            key_mode,
            timestamp,
            file_id: find_tlv(buf, TlvType::FileId).map(<[u8]>::to_vec),
            comment: find_tlv(buf, TlvType::Comment).map(<[u8]>::to_vec),
        }
    }
}
