//! tlv/mod.rs
//! Type-length-value metadata section carried after a version 2 header.
//!
//! Notes:
//! - Entries are `[type: u8][length: u8][value: length bytes]`, written in
//!   insertion order into a fixed-capacity working buffer.
//! - Lookup is a linear scan, first match wins.
//! - A truncated or overrunning entry ends the scan quietly; everything after
//!   the malformed point is treated as absent.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
