//! Error types for the statistical routines.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    /// No rows or no values to work on.
    #[error("no data to fit")]
    EmptyInput,

    /// Rows of unequal width, or predictors and response of unequal length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Not enough observations for the number of parameters or groups.
    #[error("{observations} observations are not enough for {parameters} parameters")]
    InsufficientData {
        observations: usize,
        parameters: usize,
    },

    /// Predictor columns are linearly dependent.
    #[error("design matrix is rank deficient (rank {rank} < {columns} columns)")]
    SingularDesign { rank: usize, columns: usize },

    #[error("ANOVA needs at least two groups, found {found}")]
    TooFewGroups { found: usize },

    #[error("group '{label}' has no observations")]
    EmptyGroup { label: String },

    /// Every group is constant, so the F and t statistics are undefined.
    #[error("no variance within groups")]
    ZeroVariance,

    #[error("significance level must be in (0, 1), got {alpha}")]
    InvalidAlpha { alpha: f64 },

    /// A distribution could not be built from the computed parameters.
    #[error("distribution error: {0}")]
    Distribution(String),

    #[error("least squares solve failed: {0}")]
    Solve(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
