//! Error types for plot and report output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// The drawing backend rejected the chart.
    #[error("failed to draw {path}: {message}")]
    Plot { path: PathBuf, message: String },

    #[error("nothing to plot: {what}")]
    EmptyData { what: String },

    #[error("length mismatch: {actual} actual values, {fitted} fitted values")]
    LengthMismatch { actual: usize, fitted: usize },
}

pub type Result<T> = std::result::Result<T, ReportError>;
