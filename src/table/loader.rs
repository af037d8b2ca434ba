//! Load tables from CSV files with a header row

use super::Table;
use crate::error::{PreprocessError, Result};
use csv::Reader;
use log::debug;
use std::fs::File;
use std::path::Path;

/// Load a table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PreprocessError::io(path, e))?;
    let table = load_table_from_reader(file)?;
    debug!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Load a table from any reader (e.g., string buffer, network stream)
pub fn load_table_from_reader<R: std::io::Read>(reader: R) -> Result<Table> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut table = Table::new(csv_reader.headers()?.iter());

    for result in csv_reader.records() {
        let record = result?;
        table.push_row(record.iter());
    }

    Ok(table)
}
