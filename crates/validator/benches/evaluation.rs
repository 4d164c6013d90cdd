//! Benchmarks for tree evaluation
//!
//! Measures:
//! - Flat trees of growing width, all members passing
//! - The same trees with every member failing (message rendering)
//! - A nested scope behind a narrowing chain

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use verity_validator::prelude::*;

#[derive(Clone)]
struct Row {
    fields: Vec<i64>,
}

#[derive(Clone)]
struct Envelope {
    payload: String,
}

#[derive(Clone)]
struct Payload {
    id: String,
    score: i64,
}

fn flat_tree(width: usize) -> MemberConstraintSet<Row> {
    let mut set = MemberConstraintSet::new();
    for i in 0..width {
        set.verify_that(format!("field{i}"), move |row: &Row| row.fields[i])
            .unwrap()
            .satisfies(in_range(0, 100));
    }
    set
}

fn flat_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate/flat");

    for width in [1usize, 8, 64] {
        let set = flat_tree(width);
        let passing = Row {
            fields: vec![50; width],
        };
        let failing = Row {
            fields: vec![-1; width],
        };

        group.bench_with_input(BenchmarkId::new("passing", width), &passing, |b, row| {
            b.iter(|| black_box(set.validate(black_box(row)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("failing", width), &failing, |b, row| {
            b.iter(|| black_box(set.validate(black_box(row)).unwrap()));
        });
    }

    group.finish();
}

fn nested_evaluation(c: &mut Criterion) {
    let mut set = MemberConstraintSet::<Envelope>::new();
    set.verify_that("payload", |e: &Envelope| e.payload.clone())
        .unwrap()
        .satisfies(not_blank())
        .satisfies(Predicate::<Envelope, String, Payload>::try_map(|raw: String| {
            let (id, score) = raw.split_once(':')?;
            Some(Payload {
                id: id.to_owned(),
                score: score.parse().ok()?,
            })
        })
        .build()
        .unwrap())
        .and(|payload| {
            payload
                .verify_that("id", |p: &Payload| p.id.clone())?
                .satisfies(not_empty());
            payload
                .verify_that("score", |p: &Payload| p.score)?
                .satisfies(at_least(0));
            Ok(())
        })
        .unwrap();

    let envelope = Envelope {
        payload: "abc:42".into(),
    };

    c.bench_function("evaluate/nested", |b| {
        b.iter(|| black_box(set.validate(black_box(&envelope)).unwrap()));
    });
}

criterion_group!(benches, flat_evaluation, nested_evaluation);
criterion_main!(benches);
