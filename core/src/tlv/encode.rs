//! tlv/encode.rs
//!
//! Fixed-capacity TLV writer.

use crate::tlv::types::{TlvError, TLV_ENTRY_OVERHEAD};

/// Owned TLV working buffer with a hard capacity.
///
/// `append` either writes a whole entry or nothing; the caller decides
/// whether running out of space is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl TlvBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity), capacity }
    }

    /// Append one entry.
    ///
    /// # Returns
    /// - `Ok(n)` with the number of bytes written (`2 + value.len()`).
    /// - `Err(InsufficientSpace)` when the entry does not fit; the buffer is unchanged.
    /// - `Err(ValueTooLong)` when the value exceeds 255 bytes.
    pub fn append(&mut self, tlv_type: impl Into<u8>, value: &[u8]) -> Result<usize, TlvError> {
        let len = u8::try_from(value.len())
            .map_err(|_| TlvError::ValueTooLong { len: value.len() })?;

        let need = TLV_ENTRY_OVERHEAD + value.len();
        if need > self.remaining() {
            return Err(TlvError::InsufficientSpace { need, remaining: self.remaining() });
        }

        self.buf.push(tlv_type.into());
        self.buf.push(len);
        self.buf.extend_from_slice(value);
        Ok(need)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
