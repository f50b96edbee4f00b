#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

pub const HEADER: &str =
    "Timestamp,Address,ZIP,Fullname,FooDuration,BarDuration,TotalDuration,Notes";

pub const GOOD: &str =
    "1/5/23 3:15:30 AM,123 Main St,9501,jane doe,00:01:30.000,00:00:45.500,zzsasdfa,ok";

pub const BAD_ZIP: &str =
    "1/5/23 3:15:30 AM,123 Main St,123456,jane doe,00:01:30.000,00:00:45.500,zzsasdfa,ok";

pub fn normalizer() -> Command {
    cargo_bin_cmd!("normalizer")
}

/// Write `lines` as a newline-terminated file at `path`.
pub fn write_csv(path: &Path, lines: &[&str]) {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}
