//! Frame access helpers shared by the stages.

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::error::{Result, TransformError};

/// Look up a column, mapping absence to [`TransformError::ColumnNotFound`].
pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Cell at `idx`, with out-of-range treated as null.
pub(crate) fn cell<'a>(column: &'a Column, idx: usize) -> AnyValue<'a> {
    column.get(idx).unwrap_or(AnyValue::Null)
}
