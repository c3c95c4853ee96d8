//! Error types for the transformation stages.

use thiserror::Error;

use crate::normalization::LifetimeParseError;

/// Errors raised while cleaning or encoding the satellite table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Column not found in the frame handed to a stage.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A lifetime expression could not be resolved to a number.
    #[error("malformed value '{value}' in column '{column}' at row {row}: {source}")]
    MalformedValue {
        column: String,
        row: usize,
        value: String,
        #[source]
        source: LifetimeParseError,
    },

    /// A categorical cell is empty, so no indicator can be set for it.
    #[error("missing category in column '{column}' at row {row}")]
    MissingCategory { column: String, row: usize },

    /// An indicator column name collides with an existing column.
    #[error("indicator column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// No predictor columns were requested for the design matrix.
    #[error("design matrix needs at least one predictor")]
    NoPredictors,

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
