//! Row filtering and column rewriting for the raw satellite table.

use polars::prelude::*;
use satlife_ingest::any_to_string;
use tracing::{debug, info};

use crate::data_utils::{cell, require_column};
use crate::error::{Result, TransformError};
use crate::normalization::{normalize_orbit_label, parse_lifetime};

/// Remove every row that has a null in any of `required`.
///
/// The filter is stable: surviving rows keep their relative order.
pub fn drop_incomplete(df: &DataFrame, required: &[&str]) -> Result<DataFrame> {
    let columns = required
        .iter()
        .map(|name| require_column(df, name))
        .collect::<Result<Vec<_>>>()?;

    let keep: Vec<bool> = (0..df.height())
        .map(|idx| columns.iter().all(|column| !cell(column, idx).is_null()))
        .collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = df.filter(&mask)?;

    info!(
        rows_in = df.height(),
        rows_out = filtered.height(),
        dropped = df.height() - filtered.height(),
        "dropped incomplete records"
    );
    Ok(filtered)
}

/// Replace a lifetime column with its resolved `Float64` values.
///
/// Nulls stay null. The first expression that fails to resolve aborts the
/// whole column with [`TransformError::MalformedValue`].
pub fn clean_lifetime_column(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let source = require_column(df, column)?;
    let mut values: Vec<Option<f64>> = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let value = cell(source, idx);
        if value.is_null() {
            values.push(None);
            continue;
        }
        let raw = any_to_string(value);
        let resolved = parse_lifetime(&raw).map_err(|source| TransformError::MalformedValue {
            column: column.to_string(),
            row: idx,
            value: raw.clone(),
            source,
        })?;
        values.push(Some(resolved));
    }

    let mut cleaned = df.clone();
    cleaned.with_column(Series::new(column.into(), values))?;
    debug!(column, rows = cleaned.height(), "resolved lifetime expressions");
    Ok(cleaned)
}

/// Apply [`normalize_orbit_label`] to every value of a categorical column.
///
/// Blank labels become null.
pub fn normalize_orbit_labels(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let source = require_column(df, column)?;
    let mut rewritten = 0usize;
    let values: Vec<Option<String>> = (0..df.height())
        .map(|idx| {
            let value = cell(source, idx);
            if value.is_null() {
                return None;
            }
            let raw = any_to_string(value);
            if raw.trim().is_empty() {
                return None;
            }
            let label = normalize_orbit_label(&raw);
            if label != raw {
                rewritten += 1;
            }
            Some(label)
        })
        .collect();

    let mut normalized = df.clone();
    normalized.with_column(Series::new(column.into(), values))?;
    debug!(column, rewritten, "normalized orbit labels");
    Ok(normalized)
}
