//! Common utilities for integration tests.
//!
//! Provides a settable clock for driving schedulers deterministically and
//! tracing setup for test output.

#![allow(dead_code)] // Some utilities are shared across test modules

use metronome_common::ClockSource;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Settable clock shared between a test and the scheduler under test.
///
/// Clones share the same reading, so the test keeps one handle and hands the
/// other to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    /// Create a clock reading `start`.
    pub fn at(start: f64) -> Self {
        let clock = Self::default();
        clock.set(start);
        clock
    }

    /// Set the reading.
    pub fn set(&self, now: f64) {
        self.0.set(now);
    }

    /// Move the reading forward (or backward, with a negative delta).
    pub fn advance(&self, by: f64) {
        self.0.set(self.0.get() + by);
    }

    /// Current reading.
    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> f64 {
        self.0.get()
    }
}

/// Install a tracing subscriber for test output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
