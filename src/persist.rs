//! Save the processed splits under `<data_root>/interim`

use crate::error::{PreprocessError, Result};
use crate::table::{write_table, Table};
use log::{debug, error};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const INTERIM_DIR: &str = "interim";
pub const TRAIN_OUTPUT: &str = "train_processed.csv";
pub const TEST_OUTPUT: &str = "test_processed.csv";

/// Locations of the files written by [`save_processed`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedPaths {
    pub train: PathBuf,
    pub test: PathBuf,
}

fn write_both(train: &Table, test: &Table, data_root: &Path) -> Result<SavedPaths> {
    let interim = data_root.join(INTERIM_DIR);
    debug!("Creating directory {}", interim.display());
    fs::create_dir_all(&interim).map_err(|e| PreprocessError::io(&interim, e))?;
    debug!("Directory {} created or already exists", interim.display());

    let paths = SavedPaths {
        train: interim.join(TRAIN_OUTPUT),
        test: interim.join(TEST_OUTPUT),
    };
    write_table(train, &paths.train)?;
    write_table(test, &paths.test)?;

    debug!("Processed data saved to {}", interim.display());
    Ok(paths)
}

/// Write both splits, creating the interim directory if needed
///
/// Failures are logged before being returned.
pub fn save_processed(train: &Table, test: &Table, data_root: &Path) -> Result<SavedPaths> {
    write_both(train, test, data_root).inspect_err(|e| {
        error!("Error occurred while saving data: {}", e);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::load_table;
    use tempfile::tempdir;

    fn table(rows: usize) -> Table {
        let mut t = Table::new(["id", "Premium Amount"]);
        for i in 0..rows {
            t.push_row([i.to_string(), format!("{}.0", 100 + i)]);
        }
        t
    }

    #[test]
    fn test_creates_interim_dir_and_files() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("data");
        assert!(!root.exists());

        let paths = save_processed(&table(4), &table(3), &root).unwrap();

        assert_eq!(paths.train, root.join("interim").join("train_processed.csv"));
        assert_eq!(load_table(&paths.train).unwrap().len(), 4);
        assert_eq!(load_table(&paths.test).unwrap().len(), 3);
    }

    #[test]
    fn test_existing_dir_is_reused() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(INTERIM_DIR)).unwrap();

        save_processed(&table(1), &table(1), dir.path()).unwrap();
        let paths = save_processed(&table(2), &table(5), dir.path()).unwrap();

        assert_eq!(load_table(&paths.train).unwrap().len(), 2);
        assert_eq!(load_table(&paths.test).unwrap().len(), 5);
    }

    #[test]
    fn test_unwritable_root_is_an_error() {
        let dir = tempdir().unwrap();
        // a regular file where the data root directory should be
        let blocker = dir.path().join("data");
        fs::write(&blocker, "x").unwrap();

        let err = save_processed(&table(1), &table(1), &blocker).unwrap_err();
        assert!(matches!(err, PreprocessError::Io { .. }));
    }
}
