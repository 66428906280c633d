//! Grouping of benchmark records into per-test, per-algorithm series.

use crate::error::{BenchPlotError, Result};
use crate::record::BenchmarkRecord;
use std::collections::BTreeMap;

/// Input length to normalized time, ascending by length.
pub type Series = BTreeMap<u64, f64>;

/// Results of one file: test name to algorithm name to series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    tests: BTreeMap<String, BTreeMap<String, Series>>,
}

impl AggregateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a time, replacing any earlier value for the same key.
    pub fn insert(&mut self, test: &str, algorithm: &str, length: u64, time: f64) {
        self.tests
            .entry(test.to_string())
            .or_default()
            .entry(algorithm.to_string())
            .or_default()
            .insert(length, time);
    }

    /// Returns true if the table has no tests.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Returns the number of tests.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Iterates over the test names in sorted order.
    pub fn tests(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    /// Returns the sorted algorithm names recorded for a test.
    pub fn algorithms(&self, test: &str) -> Vec<&str> {
        self.tests
            .get(test)
            .map(|algos| algos.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the series of one algorithm within a test.
    pub fn series(&self, test: &str, algorithm: &str) -> Option<&Series> {
        self.tests.get(test)?.get(algorithm)
    }
}

/// Splits `<test>.<algorithm>` on the last dot.
pub fn split_benchmark(benchmark: &str) -> Result<(&str, &str)> {
    benchmark
        .rsplit_once('.')
        .ok_or_else(|| BenchPlotError::InvalidBenchmarkName(benchmark.to_string()))
}

/// Builds the table for the records of one file.
pub fn aggregate(records: &[BenchmarkRecord]) -> Result<AggregateTable> {
    let mut table = AggregateTable::new();

    for record in records {
        let (test, algorithm) = split_benchmark(&record.benchmark)?;
        let time = record.normalized_time()?;
        table.insert(test, algorithm, record.params.max_length, time);
    }

    Ok(table)
}
