//! Benchmarks for parsing and aggregating JMH result files.
//!
//! Run: cargo bench --bench aggregate

use benchplot::record::parse_records;
use benchplot::{PlotConfig, aggregate, plan_charts};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write;
use std::hint::black_box;
use std::path::Path;

const ALGORITHMS: [&str; 6] = [
    "testHashCodeJavaWithoutIntrinsic",
    "testHashCodeJava",
    "testHashCodeUnroll8",
    "testHashCodeSWAR",
    "testHashCodeSIMD",
    "testHashCodeExperimental",
];

fn generate_results(tests: usize, lengths: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut records = Vec::new();

    for test in 0..tests {
        for algorithm in ALGORITHMS {
            for exp in 0..lengths {
                let mut record = String::new();
                write!(
                    record,
                    r#"{{"benchmark":"com.dynatrace.Test{}.{}","mode":"avgt","params":{{"maxLength":"{}","numExamples":"10000"}},"primaryMetric":{{"score":{:.3},"scoreUnit":"ns/op"}}}}"#,
                    test,
                    algorithm,
                    10u64.pow(exp as u32),
                    rng.random_range(1_000.0..10_000_000.0)
                )
                .unwrap();
                records.push(record);
            }
        }
    }

    format!("[{}]", records.join(","))
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for tests in [1, 10, 100].iter() {
        let json = generate_results(*tests, 6);

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tests), tests, |b, _| {
            b.iter(|| parse_records(black_box(&json), Path::new("bench.json")))
        });
    }

    group.finish();
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let config = PlotConfig::default();

    for tests in [1, 10, 100].iter() {
        let json = generate_results(*tests, 6);
        let records = parse_records(&json, Path::new("bench.json")).unwrap();

        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::new("table", tests), tests, |b, _| {
            b.iter(|| aggregate(black_box(&records)))
        });

        let table = aggregate(&records).unwrap();
        group.bench_with_input(BenchmarkId::new("plan", tests), tests, |b, _| {
            b.iter(|| plan_charts(black_box(&table), Path::new("bench.json"), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_aggregate);
criterion_main!(benches);
