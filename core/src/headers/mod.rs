//! headers/mod.rs
//! Public module export for the envelope header codec.
//!
//! Notes:
//! - Two fixed-size layouts: version 2 (current, written by every encoder) and
//!   version 1 (legacy, read for compatibility, written only by the legacy encoder).
//! - Magic and version are checked before any other byte is trusted.
//! - Multi-byte integers are big-endian on the wire regardless of host order.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
