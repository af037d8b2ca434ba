//! End-to-end run: load, derive ages, filter train outliers, save

use crate::age::derive_policy_age;
use crate::config::PreprocessConfig;
use crate::error::Result;
use crate::outliers::{remove_outliers_or_keep, OutlierReport};
use crate::persist::{save_processed, SavedPaths, INTERIM_DIR};
use crate::table::{load_table, Table};
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;

/// Row counts for one split before and after cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitCounts {
    pub rows_in: usize,
    pub rows_out: usize,
}

/// Outcome of a full preprocessing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub reference_date: NaiveDate,
    pub train: SplitCounts,
    pub test: SplitCounts,
    /// `None` when outlier removal failed and train was kept as loaded
    pub outliers: Option<OutlierReport>,
    pub saved: SavedPaths,
}

/// Train-only cleaning step
pub fn preprocess_train(train: &mut Table, config: &PreprocessConfig) -> Option<OutlierReport> {
    let report = remove_outliers_or_keep(train, &config.premium_column, config.iqr_multiplier);
    debug!("Preprocessing completed");
    report
}

fn run_inner(config: &PreprocessConfig, today: NaiveDate) -> Result<RunSummary> {
    config.validate()?;
    debug!("Starting data preprocessing...");

    let mut train = load_table(config.train_path())?;
    let mut test = load_table(config.test_path())?;
    debug!("Data loaded successfully");

    let train_in = train.len();
    let test_in = test.len();

    for table in [&mut train, &mut test] {
        derive_policy_age(table, &config.date_column, &config.age_column, &config.date_format, today)?;
    }

    let outliers = preprocess_train(&mut train, config);

    let saved = save_processed(&train, &test, &config.data_root)?;

    Ok(RunSummary {
        reference_date: today,
        train: SplitCounts { rows_in: train_in, rows_out: train.len() },
        test: SplitCounts { rows_in: test_in, rows_out: test.len() },
        outliers,
        saved,
    })
}

/// Run the whole pipeline with ages computed relative to `today`
///
/// Errors are returned unlogged apart from the save step's own report;
/// the caller owns the top-level failure message.
pub fn run(config: &PreprocessConfig, today: NaiveDate) -> Result<RunSummary> {
    let summary = run_inner(config, today)?;

    info!(
        "Train: {} -> {} rows, test: {} rows, written to {}",
        summary.train.rows_in,
        summary.train.rows_out,
        summary.test.rows_out,
        config.data_root.join(INTERIM_DIR).display()
    );
    Ok(summary)
}
