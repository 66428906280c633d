//! Integration tests for benchplot.

use benchplot::{BenchPlotError, PlotConfig, find_result_files, plan_file, plot_file};
use std::fs;
use std::path::Path;

fn record(benchmark: &str, max_length: u64, num_examples: u64, score: f64) -> String {
    format!(
        r#"{{"benchmark":"{}","mode":"avgt","params":{{"maxLength":"{}","numExamples":"{}"}},"primaryMetric":{{"score":{},"scoreUnit":"ns/op"}}}}"#,
        benchmark, max_length, num_examples, score
    )
}

fn write_results(dir: &Path, name: &str, records: &[String]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("[{}]", records.join(","))).unwrap();
    path
}

#[test]
fn test_end_to_end_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo.json");
    fs::write(
        &path,
        r#"[
        {"benchmark":"pkg.Test.testHashCodeSWAR","params":{"maxLength":"10","numExamples":"1000"},"primaryMetric":{"score":"5000"}},
        {"benchmark":"pkg.Test.testHashCodeSWAR","params":{"maxLength":"100","numExamples":"1000"},"primaryMetric":{"score":"50000"}}
    ]"#,
    )
    .unwrap();

    // "pkg.Test" is shorter than the default prefix, so strip less here.
    let config = PlotConfig {
        test_name_strip: 4,
        ..PlotConfig::default()
    };
    let report = plan_file(&path, &config).unwrap();

    assert_eq!(report.charts.len(), 1);
    let chart = &report.charts[0];
    assert_eq!(chart.test, "pkg.Test");
    assert_eq!(chart.output, dir.path().join("foo-Test.png"));
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].label, "new SWAR approach");
    assert_eq!(chart.series[0].points, [(10.0, 5.0), (100.0, 50.0)]);
}

#[test]
fn test_short_test_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(
        dir.path(),
        "foo.json",
        &[record("pkg.Test.testHashCodeSWAR", 10, 1000, 5000.0)],
    );

    let err = plan_file(&path, &PlotConfig::default()).unwrap_err();
    assert!(matches!(err, BenchPlotError::TestNameTooShort { strip: 14, .. }));
}

#[test]
fn test_multiple_tests_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(
        dir.path(),
        "run.json",
        &[
            record("com.dynatrace.Small.testHashCodeJava", 10, 100, 1000.0),
            record("com.dynatrace.Large.testHashCodeJava", 10, 100, 2000.0),
            record("com.dynatrace.Large.testHashCodeSIMD", 10, 100, 500.0),
        ],
    );

    let report = plan_file(&path, &PlotConfig::default()).unwrap();
    let outputs: Vec<_> = report.charts.iter().map(|c| c.output.clone()).collect();
    assert_eq!(
        outputs,
        [dir.path().join("run-Large.png"), dir.path().join("run-Small.png")]
    );
    assert_eq!(report.charts[0].series.len(), 2);
    assert_eq!(report.charts[1].series.len(), 1);
}

#[test]
fn test_files_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    write_results(
        dir.path(),
        "a.json",
        &[record("com.dynatrace.Perf.testHashCodeJava", 10, 10, 100.0)],
    );
    write_results(
        dir.path(),
        "b.json",
        &[record("com.dynatrace.Perf.testHashCodeSWAR", 10, 10, 50.0)],
    );

    let pattern = format!("{}/*.json", dir.path().display());
    let files = find_result_files(&pattern).unwrap();
    assert_eq!(files.len(), 2);

    let config = PlotConfig::default();
    let a = plan_file(&files[0], &config).unwrap();
    let b = plan_file(&files[1], &config).unwrap();

    assert_eq!(a.charts[0].output, dir.path().join("a-Perf.png"));
    assert_eq!(b.charts[0].output, dir.path().join("b-Perf.png"));
    assert_eq!(a.charts[0].algorithms_found, ["testHashCodeJava"]);
    assert_eq!(b.charts[0].algorithms_found, ["testHashCodeSWAR"]);
}

#[test]
fn test_find_result_files_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c.json", "a.json", "b.txt"] {
        fs::write(dir.path().join(name), "[]").unwrap();
    }
    fs::create_dir(dir.path().join("d.json")).unwrap();

    let files = find_result_files(&format!("{}/*.json", dir.path().display())).unwrap();
    assert_eq!(files, [dir.path().join("a.json"), dir.path().join("c.json")]);
}

#[test]
fn test_invalid_pattern() {
    let err = find_result_files("[unclosed").unwrap_err();
    assert!(matches!(err, BenchPlotError::Pattern(_)));
}

#[test]
fn test_malformed_json_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"[{"benchmark": "a.b""#).unwrap();

    let err = plot_file(&path, &PlotConfig::default()).unwrap_err();
    assert!(err.is_data_error());
}

#[test]
fn test_empty_file_produces_no_charts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(dir.path(), "empty.json", &[]);

    let report = plot_file(&path, &PlotConfig::default()).unwrap();
    assert!(report.charts.is_empty());
}

#[test]
#[ignore = "rasterizing text needs system fonts"]
fn test_plot_file_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(
        dir.path(),
        "run.json",
        &[
            record("com.dynatrace.Perf.testHashCodeJava", 1, 1000, 2000.0),
            record("com.dynatrace.Perf.testHashCodeJava", 1000, 1000, 400_000.0),
            record("com.dynatrace.Perf.testHashCodeSWAR", 1, 1000, 1500.0),
            record("com.dynatrace.Perf.testHashCodeSWAR", 1000, 1000, 90_000.0),
            record("com.dynatrace.Perf.testHashCodeOther", 1000, 1000, 1.0),
        ],
    );

    let config = PlotConfig::default();
    let report = plot_file(&path, &config).unwrap();

    let output = &report.charts[0].output;
    let decoder = png::Decoder::new(fs::File::open(output).unwrap());
    let reader = decoder.read_info().unwrap();
    assert_eq!(reader.info().width, config.pixel_size());
    assert_eq!(reader.info().height, config.pixel_size());

    // Same input, same bytes.
    let first = fs::read(output).unwrap();
    plot_file(&path, &config).unwrap();
    assert_eq!(fs::read(output).unwrap(), first);
}
