//! benchplot CLI - render JMH benchmark results as charts
//!
//! Usage:
//!   benchplot [PATTERN] [OPTIONS]
//!
//! Without arguments every `benchmark-results/*.json` file in the current
//! directory is plotted.

use anyhow::{Context, Result};
use benchplot::{BenchPlotError, FileReport, PlotConfig, find_result_files, plot_file};
use clap::Parser;
use owo_colors::OwoColorize;
use std::process;

/// Render JMH benchmark results as log-log runtime charts
#[derive(Parser)]
#[command(name = "benchplot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Glob pattern of the result files
    #[arg(default_value = benchplot::config::DEFAULT_PATTERN)]
    pattern: String,

    /// Suppress output except errors
    #[arg(short, long)]
    quiet: bool,
}

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_INVALID_DATA: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let config = PlotConfig {
        pattern: cli.pattern,
        ..PlotConfig::default()
    };

    match run(&config, cli.quiet) {
        Ok(()) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);

            let exit_code = match e.downcast_ref::<BenchPlotError>() {
                Some(err) if err.is_data_error() => EXIT_INVALID_DATA,
                _ => EXIT_ERROR,
            };

            process::exit(exit_code);
        }
    }
}

fn run(config: &PlotConfig, quiet: bool) -> Result<()> {
    let files = find_result_files(&config.pattern)?;

    if files.is_empty() {
        if !quiet {
            println!("{} No files match {}", "Info:".bright_cyan(), config.pattern);
        }
        return Ok(());
    }

    let mut charts = 0;
    for path in &files {
        if !quiet {
            println!("{}", path.display().bold());
        }

        let report = plot_file(path, config)
            .with_context(|| format!("Failed to plot {}", path.display()))?;

        if !quiet {
            print_report(&report);
        }
        charts += report.charts.len();
    }

    if !quiet {
        println!();
        println!(
            "{} Plotted {} {} from {} {}",
            "Success:".bright_green().bold(),
            charts,
            plural(charts, "chart"),
            files.len(),
            plural(files.len(), "file")
        );
    }

    Ok(())
}

fn print_report(report: &FileReport) {
    for chart in &report.charts {
        println!("   {:?}", chart.algorithms_found);
        if !chart.skipped.is_empty() {
            println!(
                "   {}",
                format!("skipped (no style): {}", chart.skipped.join(", ")).dimmed()
            );
        }
        println!("   {} {}", "Created".bright_cyan(), chart.output.display());
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
