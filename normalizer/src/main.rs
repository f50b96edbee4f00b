//! Normalizer CLI - validate and normalize a fixed-schema CSV file
//!
//! ```bash
//! normalizer input.csv output.csv                    # rejects go to ./errorFile
//! normalizer input.csv output.csv --error-file bad.csv
//! normalizer -vv --log-format json input.csv output.csv
//! ```
//!
//! Exit status is 0 when the run completes, even if rows were rejected, and
//! 1 when an input or output file cannot be used.

use std::path::PathBuf;

use clap::Parser;
use normalizer::config::{DEFAULT_DELIMITER, DEFAULT_ERROR_FILE};
use normalizer::logging::{init_logging, LogConfig, LogFormat};
use normalizer::{run, RunConfig, RunResult};

#[derive(Parser)]
#[command(name = "normalizer")]
#[command(about = "Validate and normalize a fixed-schema CSV file", long_about = None)]
struct Cli {
    /// Input CSV file (with header row)
    input: PathBuf,

    /// Normalized output file (appended to)
    output: PathBuf,

    /// File that receives rejected rows, created only if a row is rejected
    #[arg(long, default_value = DEFAULT_ERROR_FILE)]
    error_file: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn main() {
    // Load .env file (if present), e.g. for RUST_LOG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format));

    if let Err(e) = cmd_normalize(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_normalize(cli: Cli) -> RunResult<()> {
    let config = RunConfig::new(cli.input, cli.output)
        .with_error_file(cli.error_file)
        .with_delimiter(cli.delimiter)?;

    run(&config)?;
    Ok(())
}
