//! Error types for the normalizer.
//!
//! Two layers:
//!
//! - [`ValidationError`] - a single row failed a field rule. Always row-local:
//!   the row goes to the error output and the run continues.
//! - [`RunError`] - the run itself cannot continue (input unreadable, output
//!   unwritable). Always fatal.
//!
//! Nothing converts a [`ValidationError`] into a [`RunError`], so a bad row can
//! never abort a run through `?`.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Field;

// =============================================================================
// Row-level validation errors
// =============================================================================

/// Which of the two duration columns failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Foo,
    Bar,
}

impl DurationField {
    /// The column this duration is read from.
    pub fn field(self) -> Field {
        match self {
            DurationField::Foo => Field::FooDuration,
            DurationField::Bar => Field::BarDuration,
        }
    }
}

impl std::fmt::Display for DurationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationField::Foo => f.write_str("Foo"),
            DurationField::Bar => f.write_str("Bar"),
        }
    }
}

/// The rule a row broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationKind {
    /// Timestamp does not match `M/d/yy h:mm:ss a`.
    #[error("Invalid timestamp format")]
    InvalidTimestamp,

    /// ZIP column is empty.
    #[error("Zip code cannot be empty")]
    EmptyZip,

    /// ZIP column has more than 5 characters.
    #[error("Zip code cannot be greater than 5 digits")]
    ZipTooLong,

    /// ZIP column contains something other than ASCII digits.
    #[error("Zip code must only contain digits")]
    NonDigitZip,

    /// Duration is not `HH:MM:SS.mmm`.
    #[error("Invalid {which}Duration format")]
    InvalidDuration { which: DurationField },

    /// Record does not have one value per declared column.
    #[error("Expected {expected} columns, found {found}")]
    MalformedRow { expected: usize, found: usize },
}

/// A row rejected by the row processor.
///
/// Carries the offending field and its raw value so the reason can be shown
/// next to the record number without re-reading the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({field}: '{value}')")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub field: Field,
    pub value: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, field: Field, value: impl Into<String>) -> Self {
        Self {
            kind,
            field,
            value: value.into(),
        }
    }

    /// Human-readable reason, without the field/value suffix.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }
}

// =============================================================================
// Run-level errors (fatal)
// =============================================================================

/// Errors that terminate the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Input file could not be opened.
    #[error("Cannot open input file '{}': {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Normalized output file could not be opened for appending.
    #[error("Cannot open output file '{}': {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error file could not be opened for appending.
    #[error("Cannot open error file '{}': {source}", path.display())]
    CreateErrorFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a record failed mid-stream.
    #[error("Failed to read input: {0}")]
    Read(#[source] csv::Error),

    /// Writing a record failed.
    #[error("Failed to write output: {0}")]
    Write(#[source] csv::Error),

    /// Flushing or closing an output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid run configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for a single row.
pub type RowResult<T> = Result<T, ValidationError>;

/// Result type for run-level operations.
pub type RunResult<T> = Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_format() {
        let err = ValidationError::new(ValidationKind::ZipTooLong, Field::Zip, "123456");
        let msg = err.to_string();
        assert!(msg.contains("greater than 5 digits"));
        assert!(msg.contains("ZIP"));
        assert!(msg.contains("123456"));
    }

    #[test]
    fn test_duration_error_names_column() {
        let kind = ValidationKind::InvalidDuration {
            which: DurationField::Bar,
        };
        assert_eq!(kind.to_string(), "Invalid BarDuration format");
        assert_eq!(DurationField::Bar.field(), Field::BarDuration);
    }

    #[test]
    fn test_open_input_names_path() {
        let err = RunError::OpenInput {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'missing.csv'"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: RunError = io.into();
        assert!(err.to_string().contains("disk full"));
    }
}
