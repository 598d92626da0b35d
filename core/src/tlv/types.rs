use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::tlv_types;

pub use crate::constants::TLV_ENTRY_OVERHEAD;

/// Recognized TLV entry types.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum TlvType {
    /// 1 byte: 0 = password, 1 = raw key.
    KeyMode = tlv_types::KEY_MODE,
    /// 8 bytes: big-endian Unix seconds.
    Timestamp = tlv_types::TIMESTAMP,
    /// Opaque caller-supplied identifier.
    FileId = tlv_types::FILE_ID,
    /// Free-form, unvalidated.
    Comment = tlv_types::COMMENT,
}

impl From<TlvType> for u8 {
    fn from(t: TlvType) -> u8 {
        t as u8
    }
}

/// One borrowed entry from a TLV section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvEntry<'a> {
    pub tlv_type: u8,
    pub value: &'a [u8],
}

impl TlvEntry<'_> {
    /// Bytes this entry occupies on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        TLV_ENTRY_OVERHEAD + self.value.len()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TlvError {
    /// Not enough room left in the working buffer; nothing was written.
    #[error("insufficient TLV space: need {need}, remaining {remaining}")]
    InsufficientSpace { need: usize, remaining: usize },

    /// Values are length-prefixed by a single byte.
    #[error("TLV value too long: {len} > 255")]
    ValueTooLong { len: usize },
}
