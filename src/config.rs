//! Fixed plotting parameters and the algorithm allow-list.

use plotters::style::RGBColor;

/// Glob pattern matching the benchmark result files.
pub const DEFAULT_PATTERN: &str = "benchmark-results/*.json";

/// Number of leading characters removed from a test name when naming charts.
///
/// JMH test names start with the package path (`com.dynatrace.`), which is
/// exactly this long.
pub const TEST_NAME_PREFIX_LEN: usize = 14;

/// Line style of a plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous line
    Solid,
    /// Dashed line
    Dashed,
}

/// Display metadata for one algorithm variant.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmStyle {
    /// Algorithm name as it appears as the last segment of `benchmark`.
    pub key: String,
    /// Legend label.
    pub label: String,
    /// Line color.
    pub color: RGBColor,
    /// Line style.
    pub style: LineStyle,
}

impl AlgorithmStyle {
    /// Creates a new allow-list entry.
    pub fn new(key: &str, label: &str, color: RGBColor, style: LineStyle) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            color,
            style,
        }
    }
}

/// All tunables used when turning result files into charts.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Glob pattern of the input files.
    pub pattern: String,
    /// Characters stripped from the front of a test name for the output file name.
    pub test_name_strip: usize,
    /// Lower and upper bound of the X axis.
    pub x_range: (f64, f64),
    /// Figure edge length in inches (the chart is square).
    pub figure_inches: f64,
    /// Output resolution.
    pub dpi: u32,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Algorithms that are drawn, in legend order.
    pub algorithms: Vec<AlgorithmStyle>,
}

impl PlotConfig {
    /// Returns the edge length of the rendered image in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> u32 {
        (self.figure_inches * f64::from(self.dpi)).round() as u32
    }

    /// Looks up the display metadata for an algorithm.
    pub fn style_for(&self, algorithm: &str) -> Option<&AlgorithmStyle> {
        self.algorithms.iter().find(|a| a.key == algorithm)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            test_name_strip: TEST_NAME_PREFIX_LEN,
            x_range: (1e0, 1e5),
            figure_inches: 5.0,
            dpi: 300,
            x_label: "maximum byte array length (bytes)".to_string(),
            y_label: "runtime (ns)".to_string(),
            algorithms: default_algorithms(),
        }
    }
}

/// The hash code variants compared in the charts.
pub fn default_algorithms() -> Vec<AlgorithmStyle> {
    vec![
        AlgorithmStyle::new(
            "testHashCodeJavaWithoutIntrinsic",
            "OpenJDK 24 default implementation",
            RGBColor(0xe7, 0x6f, 0x51),
            LineStyle::Solid,
        ),
        AlgorithmStyle::new(
            "testHashCodeJava",
            "OpenJDK 24 intrinsic implementation",
            RGBColor(0xf4, 0xa2, 0x61),
            LineStyle::Solid,
        ),
        AlgorithmStyle::new(
            "testHashCodeUnroll8",
            "loop unrolling",
            RGBColor(0xe9, 0xc4, 0x6a),
            LineStyle::Solid,
        ),
        AlgorithmStyle::new(
            "testHashCodeSWAR",
            "new SWAR approach",
            RGBColor(0x2a, 0x9d, 0x8f),
            LineStyle::Solid,
        ),
        AlgorithmStyle::new(
            "testHashCodeSIMD",
            "new SIMD approach",
            RGBColor(0x26, 0x46, 0x53),
            LineStyle::Solid,
        ),
    ]
}
