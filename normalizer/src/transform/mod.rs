//! Transformation module.
//!
//! - Operations: one rule per field
//! - Executor: all rules applied to one row
//! - Pipeline: routing rows to sinks, and the full file run

pub mod executor;
pub mod operations;
pub mod pipeline;

pub use executor::process_row;
pub use operations::{
    decode_text, decode_uppercase, format_duration, format_timestamp, format_zip, total_duration,
    validate_zip,
};
pub use pipeline::{route_records, route_rows, run, CollectedRows, RejectedRow, RouteSummary, RowSink};
