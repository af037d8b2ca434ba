//! Tabular data model and CSV input/output

mod data;
pub mod loader;
pub mod writer;

pub use data::Table;
pub use loader::{load_table, load_table_from_reader};
pub use writer::{write_table, write_table_to_writer};
