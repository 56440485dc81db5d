#![doc = "Drift-compensating periodic tick scheduling for the Metronome workspace."]
//!
//! Computes how long a periodic task should wait before its next tick,
//! keeping ticks aligned to an epoch modulo the target interval.
//!
//! The core never sleeps and performs no I/O: every operation is a pure
//! computation over floating-point state plus one or two clock reads. The
//! caller owns the actual suspension — sleep for the returned duration, then
//! ask again.
//!
//! Two configurations of one design:
//!
//! - [`EpochTracker`] / [`PeriodicScheduler`]: a single time source.
//! - [`DualClockScheduler`]: a monotonic counter cross-checked against the
//!   wall clock, falling back to wall time for calls where the counter did
//!   not advance monotonically.
//!
//! # Example
//!
//! ```
//! use metronome_sched::EpochTracker;
//!
//! let mut tracker = EpochTracker::new(1.0).unwrap();
//! tracker.reset(0.0);
//! // 0.3s into the first period: wait 0.7s to land on the 1.0s boundary.
//! assert!((tracker.calc(0.3).unwrap() - 0.7).abs() < 1e-12);
//! ```

pub mod scheduler;
pub mod tracker;

pub use scheduler::*;
pub use tracker::*;
