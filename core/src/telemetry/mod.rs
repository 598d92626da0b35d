//! telemetry/mod.rs
//! Per-call telemetry: counters, stage timers, and immutable snapshots.
//!
//! Notes:
//! - One encrypt or decrypt call fills one counter set and one timer.
//! - Snapshots are taken at the end of the call and never mutated afterwards.
//! - Nothing secret is recorded: byte counts, invocation counts and durations only.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
