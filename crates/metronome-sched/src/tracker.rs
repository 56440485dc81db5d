//! Epoch tracking: remainder-until-next-tick against a fixed anchor.
//!
//! An [`EpochTracker`] holds the anchor timestamp (epoch start) and the target
//! interval. Given a current timestamp it computes the remaining wait until
//! the next tick boundary `epoch_start + k * interval`, and decides when the
//! schedule is broken badly enough that the anchor must be re-established.

use metronome_common::{SchedError, SchedResult};
use tracing::{debug, warn};

/// Live epoch state: the anchor and the last observed timestamp.
#[derive(Debug, Clone, Copy)]
struct Epoch {
    /// Anchor from which tick boundaries are measured.
    start: f64,
    /// Timestamp seen on the last call.
    previous: f64,
}

/// Computes the remaining wait until the next aligned tick.
///
/// Tick boundaries are multiples of `interval` measured from the epoch
/// anchor. A healthy call returns `interval - ((now - start) mod interval)`,
/// which compensates for drift accumulated from variable work time between
/// calls: however late the call is, the result lands the caller back on the
/// original grid. When the gap since the previous call reaches the drift
/// threshold (`coefficient * interval`), the schedule is considered broken —
/// the anchor moves to `now` and the tick fires immediately.
///
/// One instance serves one periodic schedule and must not be shared across
/// concurrent callers without external synchronization.
///
/// # Boundary behavior
///
/// A timestamp landing exactly on a tick boundary waits a *full* interval
/// rather than zero: the healthy branch computes `interval - 0`. Zero is only
/// returned by a drift resynchronization.
#[derive(Debug, Clone)]
pub struct EpochTracker {
    /// Target period. Immutable after construction.
    interval: f64,
    /// `coefficient * interval`. Immutable after construction.
    drift_threshold: f64,
    /// `None` until `reset` establishes a valid epoch.
    epoch: Option<Epoch>,
}

impl EpochTracker {
    /// Default drift tolerance multiplier for a single-source tracker.
    pub const DEFAULT_COEFFICIENT: f64 = 1.5;

    /// Create a tracker with the default coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`SchedError::InvalidConfiguration`] if `interval` is not a
    /// positive finite number.
    pub fn new(interval: f64) -> SchedResult<Self> {
        Self::with_coefficient(interval, Self::DEFAULT_COEFFICIENT)
    }

    /// Create a tracker with an explicit drift tolerance multiplier.
    ///
    /// The drift threshold is `coefficient * interval`. A coefficient above
    /// 1.0 tolerates some lateness before resynchronizing; a coefficient at
    /// or below 1.0 is accepted but makes calls spaced a full period apart
    /// always resynchronize.
    ///
    /// # Errors
    ///
    /// Returns [`SchedError::InvalidConfiguration`] if either argument is
    /// non-positive or non-finite.
    pub fn with_coefficient(interval: f64, coefficient: f64) -> SchedResult<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(SchedError::InvalidConfiguration {
                parameter: "interval",
                value: interval,
            });
        }
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(SchedError::InvalidConfiguration {
                parameter: "coefficient",
                value: coefficient,
            });
        }
        if coefficient <= 1.0 {
            warn!(
                coefficient,
                "drift threshold does not exceed the interval; \
                 calls spaced a full period apart will always resynchronize"
            );
        }

        Ok(Self {
            interval,
            drift_threshold: coefficient * interval,
            epoch: None,
        })
    }

    /// Establish (or re-establish) the epoch at `now`.
    ///
    /// Must be called once before the first [`calc`](Self::calc).
    pub fn reset(&mut self, now: f64) {
        self.epoch = Some(Epoch {
            start: now,
            previous: now,
        });
    }

    /// Compute the wait until the next aligned tick boundary.
    ///
    /// Returns a value in `[0.0, interval]`: `0.0` exactly when the gap since
    /// the previous call reached the drift threshold and the epoch was
    /// resynchronized to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedError::NotInitialized`] if no epoch has been
    /// established yet.
    pub fn calc(&mut self, now: f64) -> SchedResult<f64> {
        let wait = self.evaluate(now)?;
        self.observe(now);
        Ok(wait)
    }

    /// The drift decision and remainder computation, without updating the
    /// last-observed timestamp. Re-anchors the epoch on a drift exceed.
    pub(crate) fn evaluate(&mut self, now: f64) -> SchedResult<f64> {
        let epoch = self.epoch.as_mut().ok_or(SchedError::NotInitialized)?;
        let elapsed = now - epoch.previous;

        if elapsed < self.drift_threshold {
            // rem_euclid keeps the remainder in [0, interval) even when the
            // timestamp sits before the anchor after a backward clock jump.
            Ok(self.interval - (now - epoch.start).rem_euclid(self.interval))
        } else {
            debug!(
                gap = elapsed,
                threshold = self.drift_threshold,
                at = now,
                "drift threshold exceeded, resynchronizing epoch"
            );
            epoch.start = now;
            Ok(0.0)
        }
    }

    /// Record `now` as the last observed timestamp. No-op before `reset`.
    pub(crate) fn observe(&mut self, now: f64) {
        if let Some(epoch) = self.epoch.as_mut() {
            epoch.previous = now;
        }
    }

    /// Target period.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Maximum tolerated gap between consecutive calls.
    #[must_use]
    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }

    /// The current anchor, if an epoch has been established.
    #[must_use]
    pub fn epoch_start(&self) -> Option<f64> {
        self.epoch.map(|e| e.start)
    }

    /// The timestamp seen on the last call, if any.
    #[must_use]
    pub fn previous_value(&self) -> Option<f64> {
        self.epoch.map(|e| e.previous)
    }

    /// True once `reset` has established an epoch.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.epoch.is_some()
    }
}
