//! Statistics collection acceptance tests.
//!
//! The recorder is the optional sink a scheduling loop feeds: register
//! series, record timing samples per tick, export once everything is
//! complete. These tests run a real loop against a driven clock and check
//! the exported table.

use super::common::{init_tracing, ManualClock};
use metronome_common::StatsRecorder;
use metronome_sched::PeriodicScheduler;
use std::io::Read;

#[test]
fn test_loop_feeds_recorder_to_completion() {
    init_tracing();

    let clock = ManualClock::at(0.0);
    let mut scheduler = PeriodicScheduler::new(clock.clone(), 0.5).unwrap();
    scheduler.reset();

    let mut recorder = StatsRecorder::new();
    recorder.add_series("wait", 8).unwrap();
    recorder.add_series("work", 8).unwrap();

    let work = 0.05;
    while !recorder.all_complete() {
        clock.advance(work);
        let wait = scheduler.next_wait().unwrap();
        clock.advance(wait);

        recorder.record("work", work).unwrap();
        recorder.record("wait", wait).unwrap();
    }

    let summaries = recorder.summarize();
    assert_eq!(summaries[0].name, "wait");
    assert_eq!(summaries[0].count, 8);
    // Every tick does 0.05 of work in a 0.5 period: wait is always 0.45.
    assert!((summaries[0].mean.unwrap() - 0.45).abs() < 1e-9);
    assert!(summaries[0].stdev.unwrap() < 1e-9);
    assert_eq!(summaries[1].name, "work");
    assert_eq!(summaries[1].max, Some(0.05));
}

#[test]
fn test_csv_export_to_file() {
    init_tracing();

    let mut recorder = StatsRecorder::new();
    recorder.add_series("tick", 3).unwrap();
    for v in [0.2, 0.4, 0.6] {
        recorder.record("tick", v).unwrap();
    }
    assert!(recorder.all_complete());

    let mut file = tempfile::tempfile().unwrap();
    recorder.write_csv(&mut file).unwrap();

    use std::io::Seek;
    file.rewind().unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();

    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("name,count,max,min,mean,stdev"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("tick,3,0.6,0.2,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_summaries_serialize_for_reporting() {
    init_tracing();

    let mut recorder = StatsRecorder::new();
    recorder.add_series("latency", 2).unwrap();
    recorder.record("latency", 1.0).unwrap();
    recorder.record("latency", 3.0).unwrap();

    let json = serde_json::to_string(&recorder.summarize()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["name"], "latency");
    assert_eq!(parsed[0]["mean"], 2.0);
    assert_eq!(parsed[0]["count"], 2);
}
