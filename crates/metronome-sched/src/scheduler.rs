//! Single- and dual-source tick schedulers.
//!
//! [`PeriodicScheduler`] binds one [`EpochTracker`] to one clock and passes
//! calls straight through. [`DualClockScheduler`] keeps a tracker per time
//! source and arbitrates between them on every call: the monotonic counter is
//! trusted whenever its reading did not regress, otherwise the call falls
//! back to the wall-clock tracker. This tolerates a stalled or rolled-back
//! counter without losing schedule alignment.

use crate::tracker::EpochTracker;
use metronome_common::{ClockSource, MonotonicClock, SchedResult, SchedulerConfig, WallClock};
use tracing::debug;

/// Periodic tick scheduler over a single time source.
///
/// A direct pass-through to one [`EpochTracker`]: `reset` anchors the epoch
/// at the clock's current reading, `next_wait` runs the tracker against a
/// fresh reading. The scheduler never sleeps; the caller suspends for the
/// returned duration and calls again.
#[derive(Debug, Clone)]
pub struct PeriodicScheduler<C> {
    clock: C,
    tracker: EpochTracker,
}

impl<C: ClockSource> PeriodicScheduler<C> {
    /// Create a scheduler with the single-source default coefficient (1.5).
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if
    /// `interval` is not a positive finite number.
    pub fn new(clock: C, interval: f64) -> SchedResult<Self> {
        Self::with_coefficient(clock, interval, EpochTracker::DEFAULT_COEFFICIENT)
    }

    /// Create a scheduler with an explicit drift tolerance multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if
    /// either argument is non-positive or non-finite.
    pub fn with_coefficient(clock: C, interval: f64, coefficient: f64) -> SchedResult<Self> {
        Ok(Self {
            clock,
            tracker: EpochTracker::with_coefficient(interval, coefficient)?,
        })
    }

    /// Build a scheduler from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if the
    /// configuration fails validation.
    pub fn from_config(clock: C, config: &SchedulerConfig) -> SchedResult<Self> {
        config.validate()?;
        Self::with_coefficient(
            clock,
            config.interval_secs(),
            config
                .coefficient
                .unwrap_or(EpochTracker::DEFAULT_COEFFICIENT),
        )
    }

    /// Establish (or re-establish) the epoch at the clock's current reading.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.tracker.reset(now);
    }

    /// Wait until the next aligned tick, in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::NotInitialized`] before the
    /// first `reset`.
    pub fn next_wait(&mut self) -> SchedResult<f64> {
        let now = self.clock.now();
        self.tracker.calc(now)
    }

    /// The underlying tracker, for observation.
    #[must_use]
    pub fn tracker(&self) -> &EpochTracker {
        &self.tracker
    }
}

/// Drift-compensating scheduler over a monotonic counter and a wall clock.
///
/// Each source gets its own [`EpochTracker`] with an independent anchor. On
/// every call the counter reading is compared against the previous one: a
/// reading that moved forward or stayed flat means the counter behaved
/// monotonically and its tracker handles the call; a regressed reading
/// signals a counter malfunction or wraparound, and the wall tracker handles
/// the call instead.
///
/// When the selected tracker's drift branch fires, only that tracker's epoch
/// is re-anchored. Both trackers' last-observed readings, and the raw
/// previous readings used for arbitration, advance unconditionally on every
/// call. Under long runs of alternating fallback the two anchors can drift
/// apart from each other; this is an accepted limitation of keeping the
/// sources independent.
#[derive(Debug, Clone)]
pub struct DualClockScheduler<M, W> {
    counter_clock: M,
    wall_clock: W,
    counter: EpochTracker,
    wall: EpochTracker,
    previous_counter: f64,
    previous_wall: f64,
}

impl DualClockScheduler<MonotonicClock, WallClock> {
    /// Create a scheduler over the system monotonic and wall clocks.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if
    /// `interval` is not a positive finite number.
    pub fn system(interval: f64) -> SchedResult<Self> {
        Self::new(MonotonicClock::new(), WallClock::new(), interval)
    }
}

impl<M: ClockSource, W: ClockSource> DualClockScheduler<M, W> {
    /// Default drift tolerance multiplier for the two-source scheduler.
    pub const DEFAULT_COEFFICIENT: f64 = 1.1;

    /// Create a scheduler with the two-source default coefficient (1.1).
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if
    /// `interval` is not a positive finite number.
    pub fn new(counter_clock: M, wall_clock: W, interval: f64) -> SchedResult<Self> {
        Self::with_coefficient(counter_clock, wall_clock, interval, Self::DEFAULT_COEFFICIENT)
    }

    /// Create a scheduler with an explicit drift tolerance multiplier,
    /// applied to both trackers.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if
    /// either argument is non-positive or non-finite.
    pub fn with_coefficient(
        counter_clock: M,
        wall_clock: W,
        interval: f64,
        coefficient: f64,
    ) -> SchedResult<Self> {
        Ok(Self {
            counter_clock,
            wall_clock,
            counter: EpochTracker::with_coefficient(interval, coefficient)?,
            wall: EpochTracker::with_coefficient(interval, coefficient)?,
            previous_counter: 0.0,
            previous_wall: 0.0,
        })
    }

    /// Build a scheduler from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::InvalidConfiguration`] if the
    /// configuration fails validation.
    pub fn from_config(
        counter_clock: M,
        wall_clock: W,
        config: &SchedulerConfig,
    ) -> SchedResult<Self> {
        config.validate()?;
        Self::with_coefficient(
            counter_clock,
            wall_clock,
            config.interval_secs(),
            config.coefficient.unwrap_or(Self::DEFAULT_COEFFICIENT),
        )
    }

    /// Read both clocks and anchor both trackers at the fresh readings.
    pub fn reset(&mut self) {
        let counter_now = self.counter_clock.now();
        let wall_now = self.wall_clock.now();

        self.counter.reset(counter_now);
        self.wall.reset(wall_now);
        self.previous_counter = counter_now;
        self.previous_wall = wall_now;
    }

    /// Wait until the next aligned tick, in seconds.
    ///
    /// Arbitrates between the two sources, runs the selected tracker, then
    /// advances all previous readings regardless of which branch was taken.
    ///
    /// # Errors
    ///
    /// Returns [`metronome_common::SchedError::NotInitialized`] before the
    /// first `reset`.
    pub fn next_wait(&mut self) -> SchedResult<f64> {
        let counter_now = self.counter_clock.now();
        let wall_now = self.wall_clock.now();

        let wait = if counter_now >= self.previous_counter {
            self.counter.evaluate(counter_now)?
        } else {
            debug!(
                counter = counter_now,
                previous = self.previous_counter,
                "counter reading regressed, falling back to wall clock"
            );
            self.wall.evaluate(wall_now)?
        };

        self.counter.observe(counter_now);
        self.wall.observe(wall_now);
        self.previous_counter = counter_now;
        self.previous_wall = wall_now;

        Ok(wait)
    }

    /// The counter-source tracker, for observation.
    #[must_use]
    pub fn counter_tracker(&self) -> &EpochTracker {
        &self.counter
    }

    /// The wall-source tracker, for observation.
    #[must_use]
    pub fn wall_tracker(&self) -> &EpochTracker {
        &self.wall
    }
}
