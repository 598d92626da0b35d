//! telemetry/counters.rs
//! Mutable counters filled during a single envelope operation.
//!
//! Converted into an immutable `TelemetrySnapshot` when the call ends.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Password-KDF or raw-key hash runs.
    pub kdf_invocations: u64,
    /// AEAD seal/open runs, successful or not.
    pub aead_invocations: u64,
    pub bytes_plaintext: u64,
    /// Ciphertext including the tag.
    pub bytes_ciphertext: u64,
    /// Header + TLV + tag.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    pub fn add_kdf(&mut self) {
        self.kdf_invocations += 1;
    }

    pub fn add_aead(&mut self) {
        self.aead_invocations += 1;
    }

    /// Record one sealed envelope.
    ///
    /// - `pt_len`: plaintext length
    /// - `ct_len`: ciphertext length including the tag
    /// - `overhead_len`: header + TLV + tag
    pub fn add_envelope(&mut self, pt_len: usize, ct_len: usize, overhead_len: usize) {
        self.bytes_plaintext += pt_len as u64;
        self.bytes_ciphertext += ct_len as u64;
        self.bytes_overhead += overhead_len as u64;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.kdf_invocations += other.kdf_invocations;
        self.aead_invocations += other.aead_invocations;
        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_ciphertext += other.bytes_ciphertext;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
