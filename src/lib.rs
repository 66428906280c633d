//! # benchplot
//!
//! Renders runtime charts from JMH benchmark result files.
//!
//! Every result file is a JSON array of benchmark records. Records are
//! grouped by benchmark test (the `benchmark` identifier without its last
//! segment) and algorithm (the last segment), and their scores are divided
//! by the number of examples per invocation. Each test becomes one
//! log-log PNG chart of runtime over maximum input length, with one line
//! per known algorithm.
//!
//! ## Quick Start
//!
//! ```no_run
//! use benchplot::{PlotConfig, find_result_files, plot_file};
//!
//! let config = PlotConfig::default();
//! for path in find_result_files(&config.pattern).unwrap() {
//!     let report = plot_file(&path, &config).unwrap();
//!     println!("{}: {} charts", path.display(), report.charts.len());
//! }
//! ```
//!
//! ## Output Names
//!
//! The chart for test `com.dynatrace.ArrayHashCodePerformanceTest` of
//! `benchmark-results/run.json` is written to
//! `benchmark-results/run-ArrayHashCodePerformanceTest.png`: the first
//! [`config::TEST_NAME_PREFIX_LEN`] characters of the test name are
//! dropped.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod config;
mod error;
pub mod record;
pub mod render;

pub use aggregate::{AggregateTable, aggregate};
pub use config::{AlgorithmStyle, LineStyle, PlotConfig};
pub use error::{BenchPlotError, Result};
pub use record::{BenchmarkRecord, find_result_files, load_records};
pub use render::{ChartPlan, SeriesPlan, output_path, plan_charts, render_chart};

use std::path::{Path, PathBuf};

/// Charts produced from one result file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// The result file.
    pub input: PathBuf,
    /// One plan per benchmark test, sorted by test name.
    pub charts: Vec<ChartPlan>,
}

/// Loads and aggregates a result file and plans its charts without
/// drawing anything.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, if a benchmark name has no
/// `.`, if a record has zero examples, or if a test name is too short to
/// derive an output name from.
pub fn plan_file(path: &Path, config: &PlotConfig) -> Result<FileReport> {
    let records = load_records(path)?;
    let table = aggregate(&records)?;
    let charts = plan_charts(&table, path, config)?;

    Ok(FileReport {
        input: path.to_path_buf(),
        charts,
    })
}

/// Plans and renders all charts of a result file.
///
/// Charts are written next to the input file. Processing stops at the
/// first error.
///
/// # Errors
///
/// Everything [`plan_file`] reports, plus drawing and PNG write failures.
pub fn plot_file(path: &Path, config: &PlotConfig) -> Result<FileReport> {
    let report = plan_file(path, config)?;
    for chart in &report.charts {
        render_chart(chart, config)?;
    }
    Ok(report)
}
