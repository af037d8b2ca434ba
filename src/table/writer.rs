//! Write tables back to CSV, header first, no index column

use super::Table;
use crate::error::{PreprocessError, Result};
use csv::Writer;
use std::fs::File;
use std::path::Path;

/// Write a table to a CSV file, replacing any existing file
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PreprocessError::io(path, e))?;
    write_table_to_writer(table, file)
}

/// Write a table to any writer
pub fn write_table_to_writer<W: std::io::Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;

    for row in table.rows() {
        csv_writer.write_record(row)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::load_table_from_reader;

    #[test]
    fn test_untouched_cells_written_verbatim() {
        let data = "id,Premium Amount,Occupation\n1,2869.0,\n2,1483.50,\"Self-Employed, Part\"\n";
        let table = load_table_from_reader(data.as_bytes()).unwrap();

        let mut out = Vec::new();
        write_table_to_writer(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), data);
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::new(["a", "b"]);
        let mut out = Vec::new();
        write_table_to_writer(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n");
    }
}
