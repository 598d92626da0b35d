//! telemetry/snapshot.rs
//!
//! Immutable end-of-call view of counters and timers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub kdf_invocations: u64,
    pub aead_invocations: u64,
    pub bytes_plaintext: u64,
    pub bytes_ciphertext: u64,
    pub bytes_overhead: u64,
    /// Envelope bytes per plaintext byte; 0 for an empty plaintext.
    pub expansion_ratio: f64,
    pub throughput_plaintext_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let expansion_ratio = if counters.bytes_plaintext > 0 {
            (counters.bytes_plaintext + counters.bytes_overhead) as f64
                / counters.bytes_plaintext as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_plaintext as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            kdf_invocations: counters.kdf_invocations,
            aead_invocations: counters.aead_invocations,
            bytes_plaintext: counters.bytes_plaintext,
            bytes_ciphertext: counters.bytes_ciphertext,
            bytes_overhead: counters.bytes_overhead,
            expansion_ratio,
            throughput_plaintext_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Invariants of a single call:
    /// - at most one KDF run and one AEAD run
    /// - stage times fit inside the elapsed time
    pub fn sanity_check(&self) -> bool {
        self.kdf_invocations <= 1
            && self.aead_invocations <= 1
            && self.total_stage_time() <= self.elapsed
    }
}
