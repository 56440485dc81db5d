//! Clock source abstraction.
//!
//! Schedulers consume timestamps as plain `f64` seconds and hold no reference
//! to the underlying clock device. Two system sources are provided:
//!
//! - [`MonotonicClock`]: non-decreasing under normal operation, may stall
//!   (e.g. across process suspension)
//! - [`WallClock`]: reflects real time, may jump forward or backward due to
//!   external correction (NTP)

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A readable time source.
///
/// The only capability schedulers need: read the current timestamp as a real
/// number in consistent units (seconds). Readings from different sources are
/// never compared with each other, so each source may pick its own origin.
pub trait ClockSource {
    /// Current timestamp in seconds.
    fn now(&self) -> f64;
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Monotonic time source with a per-instance origin.
///
/// Readings are seconds elapsed since the instance was created. The value
/// never decreases, but it can stay flat across a counter stall.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a monotonic source anchored at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Wall-clock time source.
///
/// Readings are seconds since the Unix epoch. Timestamps before the epoch
/// map to negative seconds rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl WallClock {
    /// Create a wall-clock source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for WallClock {
    fn now(&self) -> f64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        }
    }
}
