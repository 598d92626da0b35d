//! envelope/mod.rs
//! Encrypt/decrypt state machine over the header, TLV and AEAD layers.
//!
//! Notes:
//! - Wire form is `header ‖ TLV (version 2 only) ‖ ciphertext+tag`.
//! - Every call is synchronous and self-contained: one KDF run, one AEAD run.
//! - Plaintext is released only after the tag verifies.

pub mod types;
pub mod encrypt;
pub mod decrypt;
pub mod transport;

pub use types::*;
