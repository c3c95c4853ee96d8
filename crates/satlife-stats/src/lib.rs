//! Statistical routines for the lifetime analysis.
//!
//! Thin wrappers over `nalgebra` and `statrs`:
//!
//! - [`StandardScaler`]: zero-mean, unit-variance predictors
//! - [`fit_ols`]: ordinary least squares with an intercept column
//! - [`one_way_anova`]: F test across category samples
//! - [`pairwise_comparisons`]: Bonferroni-adjusted post-hoc t tests

mod anova;
mod error;
mod ols;
mod posthoc;
mod scaler;

pub use anova::{AnovaResult, Sample, one_way_anova};
pub use error::{Result, StatsError};
pub use ols::{Coefficient, OlsFit, add_constant, fit_ols};
pub use posthoc::{DEFAULT_ALPHA, PairwiseComparison, PostHocResult, pairwise_comparisons};
pub use scaler::StandardScaler;
