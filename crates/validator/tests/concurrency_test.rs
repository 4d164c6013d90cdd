//! A built tree is shared read-only between threads.

use std::thread;

use pretty_assertions::assert_eq;
use verity_validator::prelude::*;

#[derive(Clone)]
struct Reading {
    sensor: String,
    value: i64,
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_sets_are_send_and_sync() {
    assert_send_sync::<MemberConstraintSet<Reading>>();
    assert_send_sync::<ErrorReport>();
}

#[test]
fn test_concurrent_runs_are_independent() {
    let mut set = MemberConstraintSet::<Reading>::new();
    set.verify_that("sensor", |r: &Reading| r.sensor.clone())
        .unwrap()
        .satisfies(matches("^[a-z]+-[0-9]+$").unwrap());
    set.verify_that("value", |r: &Reading| r.value)
        .unwrap()
        .satisfies(in_range(-40, 125));
    let set = &set;

    let reports: Vec<ErrorReport> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8i64)
            .map(|i| {
                scope.spawn(move || {
                    let reading = Reading {
                        sensor: if i % 2 == 0 { format!("probe-{i}") } else { "??".into() },
                        value: i * 40,
                    };
                    set.validate(&reading).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, report) in reports.iter().enumerate() {
        assert_eq!(report.contains("sensor"), i % 2 == 1, "run {i}");
        assert_eq!(report.contains("value"), i * 40 > 125, "run {i}");
    }
}
