//! CSV reading utilities.

mod reader;

pub use reader::{
    MAX_CSV_FILE_SIZE, MISSING_VALUE_TOKENS, check_file_size, check_file_size_with_limit,
    ensure_columns, read_satellite_table, validate_encoding,
};
