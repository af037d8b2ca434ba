//! Premium Preprocessing CLI
//!
//! Cleans the raw train/test splits and writes them to the interim directory.
//! Run with no arguments to use the standard `./data` layout.

use chrono::Local;
use clap::Parser;
use log::{error, info};
use premium_preprocessing::config::{DEFAULT_DATA_ROOT, DEFAULT_ERROR_LOG, DEFAULT_RAW_DIR};
use premium_preprocessing::logging::{self, LOGGER_NAME};
use premium_preprocessing::{run, PreprocessConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Derive policy age, drop premium outliers, save interim splits")]
struct Args {
    /// Directory containing train.csv and test.csv
    #[arg(long, default_value = DEFAULT_RAW_DIR)]
    raw_dir: PathBuf,

    /// Data root; output is written to <DATA_ROOT>/interim
    #[arg(long, default_value = DEFAULT_DATA_ROOT)]
    data_root: PathBuf,

    /// File that ERROR-level log lines are appended to
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    error_log: PathBuf,

    /// Numeric column screened for outliers
    #[arg(long)]
    premium_column: Option<String>,

    /// Column holding the policy start timestamp
    #[arg(long)]
    date_column: Option<String>,

    /// Name of the derived age column
    #[arg(long)]
    age_column: Option<String>,

    /// chrono format of the start timestamp
    #[arg(long)]
    date_format: Option<String>,

    /// Fence width in IQRs
    #[arg(long)]
    iqr_multiplier: Option<f64>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn to_config(&self) -> PreprocessConfig {
        let defaults = PreprocessConfig::default();
        PreprocessConfig {
            raw_dir: self.raw_dir.clone(),
            data_root: self.data_root.clone(),
            date_column: self.date_column.clone().unwrap_or(defaults.date_column),
            age_column: self.age_column.clone().unwrap_or(defaults.age_column),
            premium_column: self.premium_column.clone().unwrap_or(defaults.premium_column),
            date_format: self.date_format.clone().unwrap_or(defaults.date_format),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
        }
    }
}

fn execute(args: &Args) -> anyhow::Result<()> {
    let config = args.to_config();
    let today = Local::now().date_naive();

    let summary = run(&config, today)?;

    if let Some(report) = &summary.outliers {
        info!(
            target: LOGGER_NAME,
            "Removed {} outliers from '{}' (bounds {:.2} .. {:.2})",
            report.rows_removed, report.column, report.bounds.lower, report.bounds.upper
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// Line printed to stdout when the run fails
fn failure_message(e: &anyhow::Error) -> String {
    format!("Error: {}", e)
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(&args.error_log) {
        eprintln!("Could not open error log: {}", e);
        env_logger::init();
    }

    // failures are reported, not signalled through the exit code
    if let Err(e) = execute(&args) {
        error!(target: LOGGER_NAME, "Failed to complete the data preprocessing process: {}", e);
        println!("{}", failure_message(&e));
    }
}
