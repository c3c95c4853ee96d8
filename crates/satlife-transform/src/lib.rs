//! Satellite table transformation crate.
//!
//! Turns the raw, string-typed satellite table into regression and ANOVA
//! ready data.
//!
//! # Overview
//!
//! - **Normalization**: lifetime expressions (`"5-10 yrs."`, `"7,000 hrs."`)
//!   to floats, orbit label clean-up
//! - **Cleaning**: dropping incomplete records, rewriting the lifetime column
//! - **Encoding**: numeric coercion with nulls, one-hot orbit indicators
//! - **Design**: predictor/response matrices and per-category samples
//!
//! # Example
//!
//! ```ignore
//! use satlife_transform::{PrepareOptions, DesignMatrix, group_by, prepare};
//!
//! let prepared = prepare(&raw_df, &PrepareOptions::default())?;
//! let design = DesignMatrix::build(&prepared.frame, &predictors, "Expected Lifetime (Years)")?;
//! let groups = group_by(&prepared.frame, "Expected Lifetime (Years)", &prepared.indicators)?;
//! ```
//!
//! # Design Principles
//!
//! - **Stateless functions**: every stage borrows a frame and returns a new one
//! - **All-or-nothing parsing**: a malformed lifetime aborts the stage
//! - **Coerce, don't fail**: bad numeric cells become null and are excluded later

mod data_utils;
mod error;

pub mod cleaning;
pub mod design;
pub mod encoding;
pub mod normalization;
pub mod pipeline;

// Error type
pub use error::{Result, TransformError};

// Stages
pub use cleaning::{clean_lifetime_column, drop_incomplete, normalize_orbit_labels};
pub use design::{DesignMatrix, GroupSample, group_by};
pub use encoding::{
    Coerced, CoercionReport, Indicator, IndicatorMap, coerce_numeric, indicator_column_name,
    one_hot_encode,
};
pub use normalization::{
    LifetimeParseError, normalize_orbit_label, parse_lifetime, resolve_range, strip_noise_tokens,
};
pub use pipeline::{PrepareOptions, PrepareSummary, PreparedData, prepare};
