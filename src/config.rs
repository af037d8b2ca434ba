//! Pipeline configuration
//!
//! Defaults reproduce the fixed layout the pipeline has always used:
//! raw splits under `./data/raw_data_new`, output under `./data/interim`.

use crate::age::DEFAULT_DATE_FORMAT;
use crate::error::{PreprocessError, Result};
use crate::outliers::DEFAULT_IQR_MULTIPLIER;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory holding `train.csv` and `test.csv`
pub const DEFAULT_RAW_DIR: &str = "./data/raw_data_new";

/// Default data root; processed files go to `<root>/interim`
pub const DEFAULT_DATA_ROOT: &str = "./data";

/// Default file receiving ERROR-level log lines
pub const DEFAULT_ERROR_LOG: &str = "preprocessing_errors.log";

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Directory containing the raw train/test CSV files
    pub raw_dir: PathBuf,

    /// Root under which the `interim` directory is created
    pub data_root: PathBuf,

    /// Column holding the policy start timestamp
    pub date_column: String,

    /// Column receiving the derived age
    pub age_column: String,

    /// Numeric column screened for outliers
    pub premium_column: String,

    /// chrono format string for `date_column`
    pub date_format: String,

    /// Fence width in IQRs
    pub iqr_multiplier: f64,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            date_column: "Policy Start Date".to_string(),
            age_column: "Policy Age".to_string(),
            premium_column: "Premium Amount".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }
}

impl PreprocessConfig {
    pub fn train_path(&self) -> PathBuf {
        self.raw_dir.join(TRAIN_FILE)
    }

    pub fn test_path(&self) -> PathBuf {
        self.raw_dir.join(TEST_FILE)
    }

    /// Reject values that would make the pipeline meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(PreprocessError::InvalidConfig(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        for (name, value) in [
            ("date_column", &self.date_column),
            ("age_column", &self.age_column),
            ("premium_column", &self.premium_column),
            ("date_format", &self.date_format),
        ] {
            if value.is_empty() {
                return Err(PreprocessError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
