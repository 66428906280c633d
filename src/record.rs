//! Loading JMH result files.
//!
//! JMH writes its results as a JSON array with one object per benchmark
//! and parameter combination. Parameters are always strings; scores are
//! numbers, but stringified scores are accepted as well.

use crate::error::{BenchPlotError, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One entry of a result file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRecord {
    /// Dotted identifier, `<test>.<algorithm>`.
    pub benchmark: String,
    /// Benchmark parameters.
    pub params: BenchmarkParams,
    /// Primary measurement.
    pub primary_metric: PrimaryMetric,
}

/// The `params` object of a record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkParams {
    /// Maximum input length in bytes.
    #[serde(deserialize_with = "number_or_string")]
    pub max_length: u64,
    /// Number of inputs processed per measured invocation.
    #[serde(deserialize_with = "number_or_string")]
    pub num_examples: u64,
}

/// The `primaryMetric` object of a record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMetric {
    /// Raw measurement for all examples of one invocation.
    #[serde(deserialize_with = "number_or_string")]
    pub score: f64,
    /// Unit of `score`, e.g. `ns/op`.
    #[serde(default)]
    pub score_unit: Option<String>,
}

impl BenchmarkRecord {
    /// Returns the score divided by the number of examples.
    pub fn normalized_time(&self) -> Result<f64> {
        if self.params.num_examples == 0 {
            return Err(BenchPlotError::ZeroExamples {
                benchmark: self.benchmark.clone(),
            });
        }
        #[allow(clippy::cast_precision_loss)]
        let examples = self.params.num_examples as f64;
        Ok(self.primary_metric.score / examples)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: std::fmt::Display,
{
    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Parses the records of one result file from a JSON string.
pub fn parse_records(json: &str, path: &Path) -> Result<Vec<BenchmarkRecord>> {
    serde_json::from_str(json).map_err(|source| BenchPlotError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses one result file.
pub fn load_records(path: &Path) -> Result<Vec<BenchmarkRecord>> {
    let json = fs::read_to_string(path).map_err(|source| BenchPlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&json, path)
}

/// Expands a glob pattern into the matching files, sorted by path.
pub fn find_result_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| BenchPlotError::Pattern(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BenchPlotError::Pattern(e.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}
