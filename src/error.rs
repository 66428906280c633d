//! Error types for benchplot operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type for benchplot operations.
pub type Result<T> = std::result::Result<T, BenchPlotError>;

/// Errors that can occur while loading, aggregating or rendering results.
#[derive(Debug)]
pub enum BenchPlotError {
    /// A file could not be read or written.
    Io {
        /// Path of the file involved
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A result file is not a JSON array of benchmark records.
    Json {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// The glob pattern is malformed or a match could not be read.
    Pattern(String),

    /// A `benchmark` identifier has no `.` separating test and algorithm.
    InvalidBenchmarkName(String),

    /// A record reports zero examples, so its time cannot be normalized.
    ZeroExamples {
        /// Full `benchmark` identifier of the record
        benchmark: String,
    },

    /// A test name is shorter than the prefix stripped from output names.
    TestNameTooShort {
        /// The test name
        test: String,
        /// Number of leading characters that should be stripped
        strip: usize,
    },

    /// Drawing the chart failed.
    Render(String),

    /// Encoding the PNG failed.
    Encode(String),
}

impl BenchPlotError {
    /// Returns true for errors caused by the content of a result file
    /// rather than by the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            BenchPlotError::Json { .. }
                | BenchPlotError::InvalidBenchmarkName(_)
                | BenchPlotError::ZeroExamples { .. }
                | BenchPlotError::TestNameTooShort { .. }
        )
    }
}

impl fmt::Display for BenchPlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchPlotError::Io { path, source } => {
                write!(f, "I/O error for '{}': {}", path.display(), source)
            }
            BenchPlotError::Json { path, source } => {
                write!(f, "Invalid benchmark results in '{}': {}", path.display(), source)
            }
            BenchPlotError::Pattern(msg) => write!(f, "Invalid file pattern: {}", msg),
            BenchPlotError::InvalidBenchmarkName(name) => write!(
                f,
                "Invalid benchmark name '{}': expected '<test>.<algorithm>'",
                name
            ),
            BenchPlotError::ZeroExamples { benchmark } => {
                write!(f, "Benchmark '{}' reports numExamples = 0", benchmark)
            }
            BenchPlotError::TestNameTooShort { test, strip } => write!(
                f,
                "Test name '{}' is shorter than the {} character prefix stripped from chart names",
                test, strip
            ),
            BenchPlotError::Render(msg) => write!(f, "Chart rendering failed: {}", msg),
            BenchPlotError::Encode(msg) => write!(f, "PNG encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for BenchPlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchPlotError::Io { source, .. } => Some(source),
            BenchPlotError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
