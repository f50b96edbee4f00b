//! Row routing and the file-to-file run.
//!
//! [`route_rows`] sends each row through [`process_row`] and hands the
//! result to a [`RowSink`]: accepted rows as [`NormalizedRow`]s, rejected
//! rows as the untouched [`RawRow`] plus the reason. A rejected row never
//! stops the loop; only a [`RunError`](crate::error::RunError) from the source or the sink does.
//!
//! # Example
//!
//! ```rust,ignore
//! use normalizer::{run, RunConfig};
//!
//! let config = RunConfig::new("input.csv", "output.csv");
//! let summary = run(&config)?;
//! println!("{} accepted, {} rejected", summary.accepted, summary.rejected);
//! ```

use crate::config::RunConfig;
use crate::error::{RunResult, ValidationError};
use crate::logging::{log_info, log_rejection, log_success, log_warning};
use crate::models::{NormalizedRow, RawRow};
use crate::output::FileSinks;
use crate::parser::RowReader;

use super::executor::process_row;

/// Destination for routed rows.
pub trait RowSink {
    /// Take an accepted, fully transformed row.
    fn accept(&mut self, row: &NormalizedRow) -> RunResult<()>;

    /// Take a rejected row, untransformed, with the reason it failed.
    fn reject(&mut self, row: &RawRow, error: &ValidationError) -> RunResult<()>;
}

/// Counts for one routing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSummary {
    /// Rows read from the source.
    pub read: u64,
    /// Rows written to the normalized output.
    pub accepted: u64,
    /// Rows written to the error output.
    pub rejected: u64,
}

impl RouteSummary {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} records: {} accepted, {} rejected",
            self.read, self.accepted, self.rejected
        )
    }
}

/// A row that failed validation, kept with its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub raw: RawRow,
    pub error: ValidationError,
}

/// In-memory sink. Keeps both streams in input order.
#[derive(Debug, Clone, Default)]
pub struct CollectedRows {
    pub accepted: Vec<NormalizedRow>,
    pub rejected: Vec<RejectedRow>,
}

impl RowSink for CollectedRows {
    fn accept(&mut self, row: &NormalizedRow) -> RunResult<()> {
        self.accepted.push(row.clone());
        Ok(())
    }

    fn reject(&mut self, row: &RawRow, error: &ValidationError) -> RunResult<()> {
        self.rejected.push(RejectedRow {
            raw: row.clone(),
            error: error.clone(),
        });
        Ok(())
    }
}

/// Route every row to `sink`.
///
/// Each rejection is reported on stdout with its record number.
pub fn route_rows<I, S>(rows: I, sink: &mut S) -> RunResult<RouteSummary>
where
    I: IntoIterator<Item = RunResult<RawRow>>,
    S: RowSink + ?Sized,
{
    let mut summary = RouteSummary::default();

    for row in rows {
        let row = row?;
        summary.read += 1;

        match process_row(&row) {
            Ok(normalized) => {
                sink.accept(&normalized)?;
                summary.accepted += 1;
            }
            Err(error) => {
                log_rejection(&row, &error);
                sink.reject(&row, &error)?;
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}

/// Route rows that are already in memory.
pub fn route_records(rows: &[RawRow]) -> RunResult<CollectedRows> {
    let mut collected = CollectedRows::default();
    route_rows(rows.iter().cloned().map(Ok), &mut collected)?;
    Ok(collected)
}

/// Run the whole file-to-file normalization.
///
/// 1. Open and check the input
/// 2. Open the normalized output and write its header
/// 3. Route every row, opening the error file on the first rejection
/// 4. Flush and close both outputs
pub fn run(config: &RunConfig) -> RunResult<RouteSummary> {
    let _span = tracing::info_span!("run", input = %config.input.display()).entered();

    log_info(format!("Reading {}", config.input.display()));
    let rows = RowReader::open(&config.input, config.delimiter)?;

    let mut sinks = FileSinks::create(&config.output, &config.error_file, config.delimiter)?;
    let summary = route_rows(rows, &mut sinks)?;
    let wrote_errors = sinks.finish()?;

    log_success(summary.summary());
    log_info(format!("Normalized output: {}", config.output.display()));
    if wrote_errors {
        log_warning(format!(
            "{} rejected records written to {}",
            summary.rejected,
            config.error_file.display()
        ));
    }

    Ok(summary)
}
