//! End-to-end runs of the `validate-data` binary in a scratch directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const FEATURE_HEADERS: [&str; 30] = [
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean smoothness",
    "mean compactness",
    "mean concavity",
    "mean concave points",
    "mean symmetry",
    "mean fractal dimension",
    "radius error",
    "texture error",
    "perimeter error",
    "area error",
    "smoothness error",
    "compactness error",
    "concavity error",
    "concave points error",
    "symmetry error",
    "fractal dimension error",
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "worst compactness",
    "worst concavity",
    "worst concave points",
    "worst symmetry",
    "worst fractal dimension",
];

fn csv_with_targets(targets: &[&str]) -> String {
    let mut text = FEATURE_HEADERS.join(",");
    text.push_str(",target\n");
    for (row, target) in targets.iter().enumerate() {
        let cells: Vec<String> = (0..30)
            .map(|i| format!("{:.3}", 1.0 + (row * 30 + i) as f64 * 0.25))
            .collect();
        text.push_str(&cells.join(","));
        text.push(',');
        text.push_str(target);
        text.push('\n');
    }
    text
}

fn write_default_input(dir: &Path, content: &str) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data/breast_cancer.csv"), content).unwrap();
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_validate-data"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn validate-data")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn missing_input_prints_not_found_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_of(&output).trim_end(),
        "Error: 'data/breast_cancer.csv' not found. Please ensure the file exists."
    );
}

#[test]
fn two_valid_rows_succeed() {
    let dir = tempfile::tempdir().unwrap();
    write_default_input(dir.path(), &csv_with_targets(&["0", "1"]));

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output).trim_end(), "Data validation successful!");
}

#[test]
fn bad_target_reports_one_error_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_default_input(dir.path(), &csv_with_targets(&["1", "abc"]));

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Data validation failed:",
            "Error: row 1, field 'target': type mismatch: expected int, got abc",
        ]
    );
}

#[test]
fn explicit_path_and_json_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.csv");
    fs::write(&path, csv_with_targets(&["1", "abc"])).unwrap();

    let output = run_in(dir.path(), &["custom.csv", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(value["valid"], false);
    assert_eq!(value["error_count"], 1);
    assert_eq!(value["errors"][0]["field"], "target");
    assert_eq!(value["errors"][0]["row_index"], 1);
    assert_eq!(value["errors"][0]["input"], "abc");
}

#[test]
fn malformed_csv_is_an_unexpected_error() {
    let dir = tempfile::tempdir().unwrap();
    write_default_input(dir.path(), "a,b\n1,2\n1,2,3\n");

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).starts_with("An unexpected error occurred:"));
}

#[test]
fn config_file_sets_input_and_policy() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("other.csv"),
        csv_with_targets(&["1"]).replacen("1.000", "NaN", 1),
    )
    .unwrap();
    fs::write(
        dir.path().join("validate.toml"),
        "input = \"other.csv\"\nnon_finite = \"allow\"\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["--config", "validate.toml"]);
    assert_eq!(output.status.code(), Some(0));

    let output = run_in(dir.path(), &["other.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("got NaN"));
}

#[test]
fn logs_stay_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    write_default_input(dir.path(), &csv_with_targets(&["0"]));

    let output = Command::new(env!("CARGO_BIN_EXE_validate-data"))
        .current_dir(dir.path())
        .env("RUST_LOG", "debug")
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output).trim_end(), "Data validation successful!");
    assert!(!output.stderr.is_empty());
}

#[test]
fn zero_byte_input_is_an_unexpected_error() {
    let dir = tempfile::tempdir().unwrap();
    write_default_input(dir.path(), "");

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_of(&output).trim_end(),
        "An unexpected error occurred: no columns to parse from input"
    );
}

#[test]
fn allow_non_finite_flag_accepts_nan() {
    let dir = tempfile::tempdir().unwrap();
    write_default_input(
        dir.path(),
        &csv_with_targets(&["0"]).replacen("1.000", "NaN", 1),
    );

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));

    let output = run_in(dir.path(), &["--allow-non-finite"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output).trim_end(), "Data validation successful!");
}

#[test]
fn first_error_per_row_flag_reports_one_line_per_row() {
    let dir = tempfile::tempdir().unwrap();
    let content = csv_with_targets(&["abc"])
        .replacen("1.000", "x", 1)
        .replacen("1.250", "y", 1);
    write_default_input(dir.path(), &content);

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output).lines().count(), 4);

    let output = run_in(dir.path(), &["--first-error-per-row"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Data validation failed:",
            "Error: row 0, field 'mean_radius': type mismatch: expected float, got x",
        ]
    );
}

#[test]
fn parallel_flag_matches_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let targets: Vec<&str> = (0..40)
        .map(|i| if i % 7 == 3 { "abc" } else { "1" })
        .collect();
    write_default_input(dir.path(), &csv_with_targets(&targets));
    // Drop the row-count floor so the parallel path runs on a small table.
    fs::write(dir.path().join("parallel.toml"), "parallel_threshold = 1\n").unwrap();

    let serial = run_in(dir.path(), &[]);
    let parallel = run_in(dir.path(), &["--config", "parallel.toml", "--parallel"]);

    assert_eq!(serial.status.code(), Some(1));
    assert_eq!(parallel.status.code(), Some(1));
    assert_eq!(stdout_of(&parallel), stdout_of(&serial));
    assert_eq!(stdout_of(&serial).lines().count(), 7);
}

#[test]
fn unknown_flag_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn help_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("validate-data"));
}
