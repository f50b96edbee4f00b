//! Logging and user-facing diagnostics.
//!
//! Two channels:
//!
//! - `tracing` events, written to stderr by the subscriber installed with
//!   [`init_logging`]. Level comes from `-v` or `RUST_LOG`.
//! - Short progress lines on stdout ([`log_info`], [`log_success`], ...), one
//!   of which is the per-record rejection notice from [`log_rejection`].

use std::io;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::ValidationError;
use crate::models::RawRow;

// =============================================================================
// Subscriber setup
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON, one object per event.
    Json,
}

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::default(),
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Map a `-v` count to a level.
    ///
    /// - 0: warn
    /// - 1: info
    /// - 2: debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, io::stderr);
}

/// Install the global subscriber with a custom writer.
///
/// A second call is ignored.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target)
                    .without_time(),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// `RUST_LOG` wins; otherwise our crate logs at `level` and everything else
/// at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,normalizer={level}"))
    })
}

// =============================================================================
// Stdout diagnostics
// =============================================================================

/// Report a rejected record on stdout.
pub fn log_rejection(row: &RawRow, error: &ValidationError) {
    println!("{}", rejection_message(row, error));
    tracing::debug!(
        record = row.record,
        line = row.line,
        field = %error.field,
        value = %error.value,
        reason = %error.kind,
        "row rejected"
    );
}

/// The stdout line for a rejected record.
pub fn rejection_message(row: &RawRow, error: &ValidationError) -> String {
    format!(
        "Invalid data for input record {}: {}",
        row.record,
        error.reason()
    )
}

pub fn log_info(msg: impl Into<String>) {
    let msg = msg.into();
    tracing::info!("{msg}");
    println!("   {msg}");
}

pub fn log_success(msg: impl Into<String>) {
    let msg = msg.into();
    tracing::info!("{msg}");
    println!("   ✓ {msg}");
}

pub fn log_warning(msg: impl Into<String>) {
    let msg = msg.into();
    tracing::warn!("{msg}");
    println!("   ⚠️ {msg}");
}
