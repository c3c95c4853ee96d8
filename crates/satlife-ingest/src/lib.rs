//! Satellite table ingestion.
//!
//! Loads the active-satellite database CSV into a Polars `DataFrame` and
//! checks that every column the analysis touches is present.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use satlife_ingest::{REQUIRED_COLUMNS, read_satellite_table};
//!
//! let df = read_satellite_table(Path::new("data/database.csv"), REQUIRED_COLUMNS)?;
//! ```

mod columns;
mod csv;
mod error;
mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === Column Names ===
pub use columns::{
    APOGEE, CLASS_OF_ORBIT, DEFAULT_PREDICTORS, EXPECTED_LIFETIME, INCLINATION, LAUNCH_MASS,
    PERIGEE, REQUIRED_COLUMNS,
};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, MISSING_VALUE_TOKENS, check_file_size, check_file_size_with_limit,
    ensure_columns, read_satellite_table, validate_encoding,
};

// === AnyValue Helpers ===
pub use polars_utils::{any_to_f64, any_to_string, any_to_string_non_empty, parse_f64};
