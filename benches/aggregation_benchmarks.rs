//! Performance benchmarks for the timesheet aggregator.
//!
//! Targets:
//! - 100 entries: < 1ms mean
//! - 1,000 entries: < 5ms mean
//! - 10,000 entries: < 50ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use timesheet_summary::calculation::TimesheetAggregator;
use timesheet_summary::config::SummaryConfig;
use timesheet_summary::models::{RawEntry, RawRate};

const LAST_NAMES: [&str; 5] = ["Doe", "Smith", "Brown", "Nguyen", "Garcia"];
const FIRST_NAMES: [&str; 4] = ["Jane", "Al", "Maria", "Sam"];
const ACTIVITY_CODES: [&str; 6] = ["100;EXT", "210", "330;ELEC", "410;PLMB", "520", "610;HVAC"];

/// Creates `count` entries spread across employees, activities and a two week period.
fn create_entries(count: usize) -> Vec<RawEntry> {
    let start = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();

    (0..count)
        .map(|i| RawEntry {
            row: i + 2,
            last_name: LAST_NAMES[i % LAST_NAMES.len()].to_string(),
            first_name: FIRST_NAMES[(i / 7) % FIRST_NAMES.len()].to_string(),
            job_description: "Plant Expansion".to_string(),
            activity_code: ACTIVITY_CODES[(i / 3) % ACTIVITY_CODES.len()].to_string(),
            activity_description: "Exterior".to_string(),
            date: start + Duration::days((i % 14) as i64),
            earning_category: if i % 4 == 0 { "Overtime" } else { "Regular" }.to_string(),
            hours: Decimal::new(800, 2),
            rate: RawRate::from(if i % 4 == 0 { "$37.50" } else { "$25.00" }),
        })
        .collect()
}

/// Benchmark: aggregation into Overtime/Regular rows.
fn bench_aggregate(c: &mut Criterion) {
    let aggregator = TimesheetAggregator::new(SummaryConfig::new("2277"));
    let mut group = c.benchmark_group("aggregate");

    for size in [100usize, 1_000, 10_000] {
        let entries = create_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| black_box(aggregator.aggregate(black_box(entries)).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: aggregation plus formatting of output records.
fn bench_summarize(c: &mut Criterion) {
    let aggregator = TimesheetAggregator::new(SummaryConfig::new("2277"));
    let entries = create_entries(1_000);

    c.bench_function("summarize_1000", |b| {
        b.iter(|| black_box(aggregator.summarize(black_box(&entries)).unwrap()))
    });
}

criterion_group!(benches, bench_aggregate, bench_summarize);
criterion_main!(benches);
