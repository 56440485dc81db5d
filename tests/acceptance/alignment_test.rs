//! Tick alignment acceptance tests.
//!
//! A scheduling loop that sleeps exactly what the scheduler recommends must
//! keep landing on the epoch grid `epoch + k * interval`, however uneven the
//! work time between ticks. A stall beyond the drift threshold abandons the
//! old grid and starts a fresh one at the stalled timestamp.

use super::common::{init_tracing, ManualClock};
use metronome_sched::PeriodicScheduler;
use std::time::Duration;

#[test]
fn test_ticks_land_on_grid_despite_uneven_work() {
    init_tracing();

    let interval = 0.1;
    let clock = ManualClock::at(50.0);
    let mut scheduler = PeriodicScheduler::new(clock.clone(), interval).unwrap();
    scheduler.reset();

    // Work times vary per tick; consecutive call gaps (remaining wait plus
    // the next work time) all stay under the 0.15 drift threshold.
    let work = [0.01, 0.04, 0.02, 0.05, 0.005, 0.04, 0.03, 0.06];
    for (k, w) in work.iter().cycle().take(32).enumerate() {
        clock.advance(*w);
        let wait = scheduler.next_wait().unwrap();
        clock.advance(wait);

        let boundary = 50.0 + (k as f64 + 1.0) * interval;
        assert!(
            (clock.get() - boundary).abs() < 1e-9,
            "tick {k} landed at {}, expected {boundary}",
            clock.get()
        );
    }
}

#[test]
fn test_stall_starts_a_fresh_grid() {
    init_tracing();

    let clock = ManualClock::at(0.0);
    let mut scheduler = PeriodicScheduler::with_coefficient(clock.clone(), 1.0, 1.5).unwrap();
    scheduler.reset();

    clock.set(0.3);
    assert!((scheduler.next_wait().unwrap() - 0.7).abs() < 1e-12);

    // A 2-second stall exceeds the 1.5 threshold: fire immediately and
    // re-anchor at the stalled timestamp.
    clock.set(2.3);
    assert_eq!(scheduler.next_wait().unwrap(), 0.0);
    assert_eq!(scheduler.tracker().epoch_start(), Some(2.3));

    // Subsequent ticks align to the new grid.
    clock.set(2.8);
    assert!((scheduler.next_wait().unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn test_live_pacing_smoke() {
    init_tracing();

    // The test plays the caller: sleep for whatever the scheduler
    // recommends, a handful of short ticks against the real clocks.
    let interval = 0.02;
    let mut scheduler = metronome_sched::DualClockScheduler::system(interval).unwrap();
    scheduler.reset();

    for _ in 0..5 {
        let wait = scheduler.next_wait().unwrap();
        assert!(
            (0.0..=interval).contains(&wait),
            "wait {wait} outside [0, {interval}]"
        );
        std::thread::sleep(Duration::from_secs_f64(wait));
    }
}
