//! Chart planning, drawing and PNG output.
//!
//! Rendering is split in two steps. [`plan_charts`] decides what goes into
//! each chart (output path, series, styles) without touching the file
//! system; [`render_chart`] draws a plan with plotters into an in-memory
//! RGB buffer and writes it as a PNG.

use crate::aggregate::AggregateTable;
use crate::config::{LineStyle, PlotConfig};
use crate::error::{BenchPlotError, Result};
use plotters::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Metres per inch, for the PNG `pHYs` chunk.
const METRES_PER_INCH: f64 = 0.0254;

/// Half a decade, used to pad the Y axis around the plotted values.
const Y_PADDING: f64 = 3.162_277_660_168_38;

/// One line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPlan {
    /// Algorithm name from the data.
    pub algorithm: String,
    /// Legend label.
    pub label: String,
    /// Line color.
    pub color: RGBColor,
    /// Line style.
    pub style: LineStyle,
    /// (input length, normalized time), ascending by length.
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw the chart of one benchmark test.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    /// Benchmark test name.
    pub test: String,
    /// Where the PNG is written.
    pub output: PathBuf,
    /// Sorted names of all algorithms found for this test.
    pub algorithms_found: Vec<String>,
    /// Algorithms found in the data but missing from the allow-list.
    pub skipped: Vec<String>,
    /// Lines to draw, in allow-list order.
    pub series: Vec<SeriesPlan>,
}

impl ChartPlan {
    /// Returns the Y axis range covering all positive plotted values.
    pub fn y_range(&self) -> (f64, f64) {
        let mut values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .filter(|y| y.is_finite() && *y > 0.0)
            .peekable();

        if values.peek().is_none() {
            return (1.0, 10.0);
        }

        let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        (min / Y_PADDING, max * Y_PADDING)
    }
}

/// Derives the chart path for a test from the input file path.
///
/// `benchmark-results/foo.json` and `com.dynatrace.Perf` give
/// `benchmark-results/foo-Perf.png` when `strip` is 14.
pub fn output_path(input: &Path, test: &str, strip: usize) -> Result<PathBuf> {
    if test.chars().count() < strip {
        return Err(BenchPlotError::TestNameTooShort {
            test: test.to_string(),
            strip,
        });
    }
    let suffix: String = test.chars().skip(strip).collect();

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".json").unwrap_or(&file_name);

    Ok(input.with_file_name(format!("{}-{}.png", stem, suffix)))
}

/// Plans one chart per test of the table.
pub fn plan_charts(
    table: &AggregateTable,
    input: &Path,
    config: &PlotConfig,
) -> Result<Vec<ChartPlan>> {
    table
        .tests()
        .map(|test| plan_chart(table, test, input, config))
        .collect()
}

fn plan_chart(
    table: &AggregateTable,
    test: &str,
    input: &Path,
    config: &PlotConfig,
) -> Result<ChartPlan> {
    let output = output_path(input, test, config.test_name_strip)?;
    let algorithms_found = table.algorithms(test);

    let skipped = algorithms_found
        .iter()
        .filter(|algorithm| config.style_for(algorithm).is_none())
        .map(|algorithm| algorithm.to_string())
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let series = config
        .algorithms
        .iter()
        .filter_map(|style| {
            let data = table.series(test, &style.key)?;
            Some(SeriesPlan {
                algorithm: style.key.clone(),
                label: style.label.clone(),
                color: style.color,
                style: style.style,
                points: data.iter().map(|(&len, &time)| (len as f64, time)).collect(),
            })
        })
        .collect();

    Ok(ChartPlan {
        test: test.to_string(),
        output,
        algorithms_found: algorithms_found.into_iter().map(str::to_string).collect(),
        skipped,
        series,
    })
}

/// Draws a chart and writes it to `plan.output`.
pub fn render_chart(plan: &ChartPlan, config: &PlotConfig) -> Result<()> {
    let size = config.pixel_size();
    let mut buffer = vec![0u8; size as usize * size as usize * 3];

    draw_chart(plan, config, &mut buffer, size)
        .map_err(|e| BenchPlotError::Render(e.to_string()))?;

    write_png(&plan.output, &buffer, size, config.dpi)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_chart(
    plan: &ChartPlan,
    config: &PlotConfig,
    buffer: &mut [u8],
    size: u32,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Typographic points to pixels at the configured resolution.
    let dpi = f64::from(config.dpi);
    let pt = |points: f64| (points * dpi / 72.0).round() as u32;

    let root = BitMapBackend::with_buffer(buffer, (size, size)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = config.x_range;
    let (y_min, y_max) = plan.y_range();

    let mut chart = ChartBuilder::on(&root)
        .margin(pt(8.0))
        .x_label_area_size(pt(34.0))
        .y_label_area_size(pt(40.0))
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_label_formatter(&|x| format_tick(*x))
        .y_label_formatter(&|y| format_tick(*y))
        .label_style(("sans-serif", pt(9.0)))
        .axis_desc_style(("sans-serif", pt(10.0)))
        .draw()?;

    let line_width = pt(1.5);
    let legend_len = pt(20.0) as i32;

    for series in &plan.series {
        let style = series.color.stroke_width(line_width);
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .copied()
            .filter(|&(_, y)| y.is_finite() && y > 0.0)
            .collect();

        let anno = match series.style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(points, style))?,
            LineStyle::Dashed => {
                chart.draw_series(DashedLineSeries::new(points, pt(4.0), pt(2.0), style))?
            }
        };
        anno.label(series.label.as_str()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + legend_len, y)], style)
        });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", pt(9.0)))
        .draw()?;

    root.present()?;
    Ok(())
}

fn format_tick(value: f64) -> String {
    if value >= 1e4 || value < 1e-2 {
        format!("{:.0e}", value)
    } else {
        format!("{}", value)
    }
}

/// Writes an RGB buffer as PNG with a `pHYs` chunk and no timestamp.
fn write_png(path: &Path, rgb: &[u8], size: u32, dpi: u32) -> Result<()> {
    let file = File::create(path).map_err(|source| BenchPlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pixels_per_metre = (f64::from(dpi) / METRES_PER_INCH).round() as u32;

    let mut encoder = png::Encoder::new(BufWriter::new(file), size, size);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_metre,
        yppu: pixels_per_metre,
        unit: png::Unit::Meter,
    }));

    let encode_err = |e: png::EncodingError| BenchPlotError::Encode(e.to_string());
    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(rgb).map_err(encode_err)?;
    writer.finish().map_err(encode_err)?;

    Ok(())
}
