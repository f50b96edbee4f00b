//! Run configuration.

use std::path::PathBuf;

use crate::error::{RunError, RunResult};

/// Error file used when none is given.
pub const DEFAULT_ERROR_FILE: &str = "errorFile";

/// Delimiter used when none is given.
pub const DEFAULT_DELIMITER: char = ',';

/// Everything one run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Delimited input with a header row.
    pub input: PathBuf,
    /// Normalized output, appended to.
    pub output: PathBuf,
    /// Rejected rows, appended to; only created when a row is rejected.
    pub error_file: PathBuf,
    /// Field delimiter for input and both outputs.
    pub delimiter: u8,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            error_file: PathBuf::from(DEFAULT_ERROR_FILE),
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    #[must_use]
    pub fn with_error_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_file = path.into();
        self
    }

    /// Set the delimiter. Only single-byte ASCII characters other than the
    /// quote and line breaks are accepted.
    pub fn with_delimiter(mut self, delimiter: char) -> RunResult<Self> {
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
            return Err(RunError::Config(format!(
                "unsupported delimiter {delimiter:?}"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }
}
