//! Error type shared by every stage of the preprocessing pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, cleaning or saving the premium tables
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// Filesystem error, tagged with the path being touched
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader/writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the table header
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// A start-date cell did not match the expected timestamp format
    #[error("Row {row}: cannot parse '{value}' with format '{format}': {source}")]
    DateParse {
        row: usize,
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A cell in a numeric column could not be read as a number
    #[error("Row {row}: value '{value}' in column '{column}' is not numeric")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    /// Quartiles need at least one numeric value
    #[error("No numeric values found in column '{0}'")]
    NoNumericValues(String),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PreprocessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PreprocessError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a 1-based data row to row-scoped errors
    pub fn at_row(self, row: usize) -> Self {
        match self {
            PreprocessError::DateParse { value, format, source, .. } => {
                PreprocessError::DateParse { row, value, format, source }
            }
            PreprocessError::NonNumeric { column, value, .. } => {
                PreprocessError::NonNumeric { row, column, value }
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
