//! File-backed row sinks.
//!
//! The normalized output is opened when the run starts. The error output is
//! only opened when the first row is rejected, so a clean run never creates
//! it. Both are opened in append mode.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Terminator, Writer, WriterBuilder};

use crate::error::{RunError, RunResult, ValidationError};
use crate::models::{Field, NormalizedRow, RawRow};
use crate::transform::pipeline::RowSink;

/// Writes accepted rows to the output file and rejected rows to the error
/// file.
pub struct FileSinks {
    normalized: Writer<File>,
    errors: Option<Writer<File>>,
    error_path: PathBuf,
    delimiter: u8,
}

impl FileSinks {
    /// Open the normalized output and write its header row.
    ///
    /// The error file is not touched here.
    pub fn create(output: &Path, error_path: &Path, delimiter: u8) -> RunResult<Self> {
        let file = open_append(output).map_err(|source| RunError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;

        let mut normalized = writer(file, delimiter);
        normalized
            .write_record(Field::header())
            .map_err(RunError::Write)?;

        Ok(Self {
            normalized,
            errors: None,
            error_path: error_path.to_path_buf(),
            delimiter,
        })
    }

    /// Whether the error file has been opened.
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// Flush both outputs. Returns whether the error file was created.
    pub fn finish(mut self) -> RunResult<bool> {
        self.normalized.flush()?;
        if let Some(errors) = self.errors.as_mut() {
            errors.flush()?;
        }
        Ok(self.errors.is_some())
    }

    fn error_writer(&mut self) -> RunResult<&mut Writer<File>> {
        match self.errors {
            Some(ref mut errors) => Ok(errors),
            None => {
                let file = open_append(&self.error_path).map_err(|source| {
                    RunError::CreateErrorFile {
                        path: self.error_path.clone(),
                        source,
                    }
                })?;
                tracing::debug!(path = %self.error_path.display(), "opened error file");
                Ok(self.errors.insert(writer(file, self.delimiter)))
            }
        }
    }
}

impl RowSink for FileSinks {
    fn accept(&mut self, row: &NormalizedRow) -> RunResult<()> {
        self.normalized.serialize(row).map_err(RunError::Write)
    }

    fn reject(&mut self, row: &RawRow, _error: &ValidationError) -> RunResult<()> {
        self.error_writer()?
            .write_byte_record(row.values())
            .map_err(RunError::Write)
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn writer(file: File, delimiter: u8) -> Writer<File> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationKind;
    use tempfile::tempdir;

    fn normalized() -> NormalizedRow {
        NormalizedRow {
            timestamp: "2023-01-05T06:15:30-05:00".into(),
            address: "1 Way, Apt 2".into(),
            zip: "09501".into(),
            fullname: "JANE DOE".into(),
            foo_duration: 90,
            bar_duration: 45,
            total_duration: 135,
            notes: "ok".into(),
        }
    }

    #[test]
    fn test_header_written_without_rows() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let err = dir.path().join("errorFile");

        let sinks = FileSinks::create(&out, &err, b',').unwrap();
        assert!(!sinks.finish().unwrap());

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "Timestamp,Address,ZIP,Fullname,FooDuration,BarDuration,TotalDuration,Notes\r\n"
        );
        assert!(!err.exists());
    }

    #[test]
    fn test_accept_serializes_in_field_order() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let err = dir.path().join("errorFile");

        let mut sinks = FileSinks::create(&out, &err, b',').unwrap();
        sinks.accept(&normalized()).unwrap();
        sinks.finish().unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[1],
            "2023-01-05T06:15:30-05:00,\"1 Way, Apt 2\",09501,JANE DOE,90,45,135,ok"
        );
    }

    #[test]
    fn test_reject_opens_error_file_lazily() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let err = dir.path().join("errorFile");

        let mut sinks = FileSinks::create(&out, &err, b',').unwrap();
        assert!(!sinks.has_errors());
        assert!(!err.exists());

        let raw = RawRow::from_strs(1, [&b"a"[..], &b"b,c"[..], &b"caf\xe9"[..]]);
        let reason = ValidationError::new(ValidationKind::EmptyZip, Field::Zip, "");
        sinks.reject(&raw, &reason).unwrap();
        assert!(sinks.has_errors());
        assert!(sinks.finish().unwrap());

        // Raw bytes go back out untouched, invalid UTF-8 included.
        let content = std::fs::read(&err).unwrap();
        assert_eq!(content, b"a,\"b,c\",caf\xe9\r\n");
    }

    #[test]
    fn test_outputs_are_appended() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let err = dir.path().join("errorFile");
        std::fs::write(&out, "previous\r\n").unwrap();
        std::fs::write(&err, "old,error\r\n").unwrap();

        let mut sinks = FileSinks::create(&out, &err, b',').unwrap();
        let raw = RawRow::from_strs(1, ["x"]);
        let reason = ValidationError::new(ValidationKind::EmptyZip, Field::Zip, "");
        sinks.reject(&raw, &reason).unwrap();
        sinks.finish().unwrap();

        let out_content = std::fs::read_to_string(&out).unwrap();
        assert!(out_content.starts_with("previous\r\nTimestamp,"));
        let err_content = std::fs::read_to_string(&err).unwrap();
        assert_eq!(err_content, "old,error\r\nx\r\n");
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("missing").join("out.csv");
        let err = dir.path().join("errorFile");

        let result = FileSinks::create(&out, &err, b',');
        assert!(matches!(result, Err(RunError::CreateOutput { .. })));
    }

    #[test]
    fn test_unwritable_error_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let err = dir.path().join("missing").join("errorFile");

        let mut sinks = FileSinks::create(&out, &err, b',').unwrap();
        let raw = RawRow::from_strs(1, ["x"]);
        let reason = ValidationError::new(ValidationKind::EmptyZip, Field::Zip, "");
        let result = sinks.reject(&raw, &reason);
        assert!(matches!(result, Err(RunError::CreateErrorFile { .. })));
    }
}
