//! # Normalizer - fixed-schema CSV validation and normalization
//!
//! Reads a delimited file of eight-column records, checks and reformats each
//! field, and splits the rows into a normalized output and an error output.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Executor   │──┬─▶│ Normalized  │
//! │ (w/ header) │     │ (raw bytes) │     │ (per field) │  │  │   output    │
//! └─────────────┘     └─────────────┘     └─────────────┘  │  └─────────────┘
//!                                                          │  ┌─────────────┐
//!                                                          └─▶│  errorFile  │
//!                                                             │   (lazy)    │
//!                                                             └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use normalizer::{run, RunConfig};
//!
//! let summary = run(&RunConfig::new("input.csv", "output.csv"))?;
//! println!("{} rejected", summary.rejected);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Row-level and run-level error types
//! - [`models`] - Field set, raw and normalized rows
//! - [`parser`] - CSV input reader with header check
//! - [`transform`] - Field operations, row executor, routing pipeline
//! - [`output`] - File-backed sinks
//! - [`config`] - Run configuration
//! - [`logging`] - tracing setup and stdout diagnostics

// Core modules
pub mod error;
pub mod models;

// Input / output
pub mod output;
pub mod parser;

// Transformation
pub mod transform;

// Ambient
pub mod config;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{RunConfig, DEFAULT_ERROR_FILE};
pub use error::{DurationField, RowResult, RunError, RunResult, ValidationError, ValidationKind};
pub use models::{Field, NormalizedRow, RawRow};
pub use output::FileSinks;
pub use parser::{check_header, parse_rows, RowReader};
pub use transform::{
    decode_text, decode_uppercase, format_duration, format_timestamp, format_zip, process_row,
    route_records, route_rows, run, total_duration, validate_zip, CollectedRows, RejectedRow,
    RouteSummary, RowSink,
};
