//! Logger setup: everything to the console, errors also appended to a file
//!
//! Console output goes through `env_logger` (default filter `debug`,
//! `RUST_LOG` overrides). ERROR records are additionally appended to the
//! error log as `<timestamp> - <target> - <LEVEL> - <message>`.

use crate::error::{PreprocessError, Result};
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Name the binary logs under
pub const LOGGER_NAME: &str = "data_preprocessing";

fn format_line(record: &Record) -> String {
    format!(
        "{} - {} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        record.target(),
        record.level(),
        record.args()
    )
}

/// Console logger plus an append-only error file
pub struct TeeLogger {
    console: env_logger::Logger,
    error_file: Mutex<File>,
}

impl TeeLogger {
    pub fn new(console: env_logger::Logger, error_file: File) -> Self {
        Self {
            console,
            error_file: Mutex::new(error_file),
        }
    }
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() == Level::Error || self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.console.matches(record) {
            self.console.log(record);
        }
        if record.level() == Level::Error {
            if let Ok(mut file) = self.error_file.lock() {
                // a failing error log must not take the pipeline down
                let _ = writeln!(file, "{}", format_line(record));
            }
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Ok(mut file) = self.error_file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the global logger. Call once, from `main`.
pub fn init(error_log: &Path) -> Result<()> {
    let error_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_log)
        .map_err(|e| PreprocessError::io(error_log, e))?;

    let console = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", format_line(record)))
        .build();

    let max_level = console.filter().max(LevelFilter::Error);
    log::set_boxed_logger(Box::new(TeeLogger::new(console, error_file)))
        .map_err(|e| PreprocessError::InvalidConfig(format!("logger already set: {}", e)))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_only_errors_reach_the_file() {
        let file = NamedTempFile::new().unwrap();
        let console = env_logger::Builder::new()
            .filter_level(LevelFilter::Off)
            .is_test(true)
            .build();
        let logger = TeeLogger::new(console, file.reopen().unwrap());

        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target(LOGGER_NAME)
                .args(format_args!("Starting data preprocessing..."))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target(LOGGER_NAME)
                .args(format_args!("Error occurred while saving data: disk full"))
                .build(),
        );
        logger.flush();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with(" - data_preprocessing - ERROR - Error occurred while saving data: disk full\n"));
    }

    #[test]
    fn test_errors_enabled_even_when_console_is_off() {
        let file = NamedTempFile::new().unwrap();
        let console = env_logger::Builder::new().filter_level(LevelFilter::Off).build();
        let logger = TeeLogger::new(console, file.reopen().unwrap());

        let error = Metadata::builder().level(Level::Error).target(LOGGER_NAME).build();
        let debug = Metadata::builder().level(Level::Debug).target(LOGGER_NAME).build();
        assert!(logger.enabled(&error));
        assert!(!logger.enabled(&debug));
    }
}
