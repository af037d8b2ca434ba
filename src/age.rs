//! Policy age derivation from the policy start timestamp

use crate::error::{PreprocessError, Result};
use crate::table::Table;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;

/// Timestamp layout of the `Policy Start Date` column, e.g. `2023-12-23 15:21:39.134960`
///
/// The dot and at least one fraction digit are required.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S.%f";

/// Parse a start-date cell into its calendar date
pub fn parse_start_date(raw: &str, format: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, format).map(|dt| dt.date())
}

/// Whole years elapsed from `born` to `today`
///
/// One less than the year difference when today's (month, day) falls
/// before the anniversary.
pub fn age_on(born: NaiveDate, today: NaiveDate) -> i32 {
    let before_anniversary = (today.month(), today.day()) < (born.month(), born.day());
    today.year() - born.year() - i32::from(before_anniversary)
}

/// Parse a single cell and compute its age relative to `today`
///
/// Errors carry row 0; table-level callers attach the real row.
pub fn policy_age(raw: &str, format: &str, today: NaiveDate) -> Result<i32> {
    parse_start_date(raw, format)
        .map(|born| age_on(born, today))
        .map_err(|source| PreprocessError::DateParse {
            row: 0,
            value: raw.to_string(),
            format: format.to_string(),
            source,
        })
}

/// Fill `target_column` with the policy age of every row
///
/// Any unparsable cell aborts the derivation and the table is left as it was.
pub fn derive_policy_age(
    table: &mut Table,
    source_column: &str,
    target_column: &str,
    format: &str,
    today: NaiveDate,
) -> Result<()> {
    let ages = table
        .column(source_column)?
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            policy_age(raw, format, today)
                .map(|age| age.to_string())
                .map_err(|e| e.at_row(i + 1))
        })
        .collect::<Result<Vec<String>>>()?;

    table.set_column(target_column, ages)?;
    debug!("Derived '{}' for {} rows", target_column, table.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_anniversary() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on(date(2023, 6, 15), today), 1);
    }

    #[test]
    fn test_day_before_anniversary() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on(date(2023, 6, 16), today), 0);
        assert_eq!(age_on(date(2023, 7, 1), today), 0);
    }

    #[test]
    fn test_same_day_is_zero() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on(today, today), 0);
    }

    #[test]
    fn test_leap_day_start() {
        assert_eq!(age_on(date(2020, 2, 29), date(2021, 2, 28)), 0);
        assert_eq!(age_on(date(2020, 2, 29), date(2021, 3, 1)), 1);
    }

    #[test]
    fn test_policy_age_parses_microseconds() {
        let today = date(2024, 12, 23);
        let age = policy_age("2019-12-23 15:21:39.134960", DEFAULT_DATE_FORMAT, today).unwrap();
        assert_eq!(age, 5);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let today = date(2024, 1, 1);
        for raw in [
            "2023/12/23",
            "not a date",
            "",
            "2023-13-01 00:00:00.0",
            "2023-01-01 00:00:00",
            "2023-01-01 00:00:00.",
        ] {
            let result = policy_age(raw, DEFAULT_DATE_FORMAT, today);
            assert!(
                matches!(result, Err(PreprocessError::DateParse { .. })),
                "expected parse error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_derive_policy_age_adds_column() {
        let mut table = Table::new(["id", "Policy Start Date"]);
        table.push_row(["0", "2022-03-01 10:00:00.000001"]);
        table.push_row(["1", "2023-03-02 10:00:00.5"]);

        derive_policy_age(&mut table, "Policy Start Date", "Policy Age", DEFAULT_DATE_FORMAT, date(2024, 3, 1))
            .unwrap();

        assert_eq!(table.column("Policy Age").unwrap(), vec!["2", "0"]);
    }

    #[test]
    fn test_derive_policy_age_reports_row_and_leaves_table() {
        let mut table = Table::new(["Policy Start Date"]);
        table.push_row(["2022-03-01 10:00:00.000001"]);
        table.push_row(["garbage"]);
        let before = table.clone();

        let err = derive_policy_age(&mut table, "Policy Start Date", "Policy Age", DEFAULT_DATE_FORMAT, date(2024, 3, 1))
            .unwrap_err();

        assert!(matches!(err, PreprocessError::DateParse { row: 2, .. }));
        assert_eq!(table, before);
    }

    #[test]
    fn test_derive_policy_age_missing_column() {
        let mut table = Table::new(["id"]);
        table.push_row(["0"]);
        let err = derive_policy_age(&mut table, "Policy Start Date", "Policy Age", DEFAULT_DATE_FORMAT, date(2024, 3, 1))
            .unwrap_err();
        assert!(matches!(err, PreprocessError::ColumnNotFound(_)));
    }
}
