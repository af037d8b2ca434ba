//! Premium Preprocessing - cleaning pipeline for insurance premium datasets
//!
//! This library provides:
//! - CSV table loading and writing that preserves untouched cells
//! - Policy age derivation from the policy start timestamp
//! - IQR-based outlier removal on the premium column
//! - Saving processed train/test splits to the interim data directory

pub mod age;
pub mod config;
pub mod error;
pub mod logging;
pub mod outliers;
pub mod persist;
pub mod pipeline;
pub mod table;

// Re-export commonly used types
pub use config::PreprocessConfig;
pub use error::{PreprocessError, Result};
pub use outliers::{IqrBounds, OutlierReport};
pub use pipeline::{run, RunSummary};
pub use table::Table;
