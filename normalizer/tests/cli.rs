mod common;

use common::{normalizer, write_csv, BAD_ZIP, GOOD, HEADER};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_arguments_prints_usage() {
    normalizer()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_rejected_row_reported_and_written_to_cwd_error_file() {
    let dir = tempdir().unwrap();
    write_csv(&dir.path().join("input.csv"), &[HEADER, GOOD, BAD_ZIP]);

    normalizer()
        .current_dir(dir.path())
        .args(["input.csv", "output.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invalid data for input record 3: Zip code cannot be greater than 5 digits",
        ))
        .stdout(predicate::str::contains("Invalid data for input record 2").not());

    let errors = fs::read_to_string(dir.path().join("errorFile")).unwrap();
    assert_eq!(errors, format!("{BAD_ZIP}\r\n"));

    let output = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    assert_eq!(
        output,
        format!(
            "{HEADER}\r\n2023-01-05T06:15:30-05:00,123 Main St,09501,JANE DOE,90,45,135,ok\r\n"
        )
    );
}

#[test]
fn test_clean_run_leaves_no_error_file() {
    let dir = tempdir().unwrap();
    write_csv(&dir.path().join("input.csv"), &[HEADER, GOOD]);

    normalizer()
        .current_dir(dir.path())
        .args(["input.csv", "output.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid data").not());

    assert!(dir.path().join("output.csv").exists());
    assert!(!dir.path().join("errorFile").exists());
}

#[test]
fn test_error_file_override() {
    let dir = tempdir().unwrap();
    write_csv(&dir.path().join("input.csv"), &[HEADER, BAD_ZIP]);

    normalizer()
        .current_dir(dir.path())
        .args(["input.csv", "output.csv", "--error-file", "rejects.csv"])
        .assert()
        .success();

    assert!(dir.path().join("rejects.csv").exists());
    assert!(!dir.path().join("errorFile").exists());
}

#[test]
fn test_missing_input_exits_with_one() {
    let dir = tempdir().unwrap();

    normalizer()
        .current_dir(dir.path())
        .args(["missing.csv", "output.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.csv"));

    assert!(!dir.path().join("output.csv").exists());
}

#[test]
fn test_bad_delimiter_exits_with_one() {
    let dir = tempdir().unwrap();
    write_csv(&dir.path().join("input.csv"), &[HEADER, GOOD]);

    normalizer()
        .current_dir(dir.path())
        .args(["input.csv", "output.csv", "--delimiter", "é"])
        .assert()
        .failure()
        .code(1);
}
