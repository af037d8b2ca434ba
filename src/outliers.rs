//! Interquartile-range outlier filter for a numeric column
//!
//! Bounds are `Q1 - k*IQR` and `Q3 + k*IQR`; rows sitting on or beyond
//! either bound are dropped. Quartiles use linear interpolation between
//! order statistics.

use crate::error::{PreprocessError, Result};
use crate::table::Table;
use log::{debug, error};
use serde::Serialize;

/// Standard Tukey fence multiplier
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Quantile `q` (0..=1) of an ascending, non-empty slice
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Quartiles and fences computed from one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute bounds from unsorted values
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// True when the value sits on or beyond either fence
    pub fn is_outlier(&self, value: f64) -> bool {
        value >= self.upper || value <= self.lower
    }
}

/// What a successful outlier pass did to the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub column: String,
    pub bounds: IqrBounds,
    pub rows_before: usize,
    pub rows_removed: usize,
}

/// Read a numeric cell; blank and NaN cells count as missing
fn parse_numeric(raw: &str, column: &str, row: usize) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(PreprocessError::NonNumeric {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Drop rows whose `column` value is an IQR outlier
///
/// Missing values are ignored for the quartiles and always kept. With a
/// zero IQR both fences equal the quartile, so every present value goes.
/// On error the table is not modified.
pub fn remove_outliers(table: &mut Table, column: &str, multiplier: f64) -> Result<OutlierReport> {
    let values = table
        .column(column)?
        .into_iter()
        .enumerate()
        .map(|(i, raw)| parse_numeric(raw, column, i + 1))
        .collect::<Result<Vec<Option<f64>>>>()?;

    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let bounds = IqrBounds::from_values(&present, multiplier)
        .ok_or_else(|| PreprocessError::NoNumericValues(column.to_string()))?;

    let rows_before = table.len();
    let keep: Vec<bool> = values
        .iter()
        .map(|v| v.map_or(true, |v| !bounds.is_outlier(v)))
        .collect();
    table.retain_rows(&keep);

    let report = OutlierReport {
        column: column.to_string(),
        bounds,
        rows_before,
        rows_removed: rows_before - table.len(),
    };

    debug!(
        "Outlier bounds for '{}': [{:.4}, {:.4}], removed {} of {} rows",
        column, bounds.lower, bounds.upper, report.rows_removed, rows_before
    );

    Ok(report)
}

/// Like [`remove_outliers`], but a failure is logged and the table kept as is
pub fn remove_outliers_or_keep(table: &mut Table, column: &str, multiplier: f64) -> Option<OutlierReport> {
    match remove_outliers(table, column, multiplier) {
        Ok(report) => Some(report),
        Err(e) => {
            error!("Error in outlier removal: {}", e);
            None
        }
    }
}
