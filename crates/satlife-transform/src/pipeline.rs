//! End-to-end preparation of the raw satellite table.

use polars::prelude::DataFrame;
use satlife_ingest::{
    APOGEE, CLASS_OF_ORBIT, EXPECTED_LIFETIME, INCLINATION, LAUNCH_MASS, PERIGEE,
};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::cleaning::{clean_lifetime_column, drop_incomplete, normalize_orbit_labels};
use crate::encoding::{Coerced, CoercionReport, IndicatorMap, coerce_numeric, one_hot_encode};
use crate::error::Result;

/// Which columns play which role during preparation.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Lifetime expression column, rewritten to floats.
    pub lifetime: String,
    /// Orbit class column, normalized and one-hot encoded.
    pub orbit_class: String,
    /// Columns a record must have to be kept at all.
    pub required: Vec<String>,
    /// Columns coerced to numbers with invalid cells set to null.
    pub numeric: Vec<String>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            lifetime: EXPECTED_LIFETIME.to_string(),
            orbit_class: CLASS_OF_ORBIT.to_string(),
            required: vec![EXPECTED_LIFETIME.to_string(), LAUNCH_MASS.to_string()],
            numeric: [LAUNCH_MASS, PERIGEE, APOGEE, INCLINATION]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Cleaned and encoded frame plus what each stage did.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub frame: DataFrame,
    pub indicators: IndicatorMap,
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub coercions: Vec<CoercionReport>,
}

/// Counts carried into reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrepareSummary {
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub rows_out: usize,
    pub coercions: Vec<CoercionReport>,
}

impl PreparedData {
    pub fn summary(&self) -> PrepareSummary {
        PrepareSummary {
            rows_in: self.rows_in,
            rows_dropped: self.rows_dropped,
            rows_out: self.frame.height(),
            coercions: self.coercions.clone(),
        }
    }
}

/// Run the cleaning and encoding stages in order.
///
/// Drop incomplete records, resolve lifetimes, normalize orbit labels,
/// coerce numeric columns, then one-hot encode the orbit class. Records
/// with no orbit label are dropped after normalization and counted in
/// `rows_dropped`.
pub fn prepare(df: &DataFrame, options: &PrepareOptions) -> Result<PreparedData> {
    let span = info_span!("prepare", rows = df.height());
    let _guard = span.enter();

    let required: Vec<&str> = options.required.iter().map(String::as_str).collect();
    let complete = drop_incomplete(df, &required)?;

    let cleaned = clean_lifetime_column(&complete, &options.lifetime)?;
    let normalized = normalize_orbit_labels(&cleaned, &options.orbit_class)?;
    let mut frame = drop_incomplete(&normalized, &[options.orbit_class.as_str()])?;
    let unlabelled = normalized.height() - frame.height();
    if unlabelled > 0 {
        warn!(
            column = %options.orbit_class,
            rows = unlabelled,
            "dropped records without an orbit class"
        );
    }
    let rows_dropped = df.height() - frame.height();

    let mut coercions = Vec::with_capacity(options.numeric.len());
    for column in &options.numeric {
        let Coerced {
            frame: coerced,
            report,
        } = coerce_numeric(&frame, column)?;
        frame = coerced;
        coercions.push(report);
    }

    let (frame, indicators) = one_hot_encode(&frame, &options.orbit_class)?;

    info!(
        rows_in = df.height(),
        rows_dropped,
        rows_out = frame.height(),
        categories = indicators.len(),
        "prepared satellite table"
    );
    Ok(PreparedData {
        frame,
        indicators,
        rows_in: df.height(),
        rows_dropped,
        coercions,
    })
}
