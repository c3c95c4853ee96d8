//! Feature encoding: numeric coercion and one-hot indicators.

use polars::prelude::*;
use satlife_ingest::{any_to_f64, any_to_string, any_to_string_non_empty};
use serde::Serialize;
use tracing::{debug, warn};

use crate::data_utils::{cell, require_column};
use crate::error::{Result, TransformError};

/// Outcome of coercing one column to numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoercionReport {
    pub column: String,
    /// Cells that parsed as numbers.
    pub coerced: usize,
    /// Cells that were already null.
    pub missing: usize,
    /// Rows whose non-null value could not be parsed and is now null.
    pub invalid_rows: Vec<usize>,
}

impl CoercionReport {
    pub fn invalid(&self) -> usize {
        self.invalid_rows.len()
    }
}

/// A coerced frame together with what happened to the column.
#[derive(Debug, Clone)]
pub struct Coerced {
    pub frame: DataFrame,
    pub report: CoercionReport,
}

/// Coerce `field` to `Float64`, turning unparseable cells into nulls.
///
/// Never fails on cell contents; each rejected value is logged as a warning
/// and listed in the report so later stages can exclude the row.
pub fn coerce_numeric(df: &DataFrame, field: &str) -> Result<Coerced> {
    let source = require_column(df, field)?;
    let mut report = CoercionReport {
        column: field.to_string(),
        ..CoercionReport::default()
    };

    let values: Vec<Option<f64>> = (0..df.height())
        .map(|idx| {
            let value = cell(source, idx);
            if value.is_null() {
                report.missing += 1;
                return None;
            }
            match any_to_f64(value.clone()) {
                Some(number) if number.is_finite() => {
                    report.coerced += 1;
                    Some(number)
                }
                _ => {
                    warn!(
                        column = field,
                        row = idx,
                        value = %any_to_string(value),
                        "value is not numeric; treating as missing"
                    );
                    report.invalid_rows.push(idx);
                    None
                }
            }
        })
        .collect();

    let mut frame = df.clone();
    frame.with_column(Series::new(field.into(), values))?;
    debug!(
        column = field,
        coerced = report.coerced,
        invalid = report.invalid(),
        "coerced column to numeric"
    );
    Ok(Coerced { frame, report })
}

/// One indicator column and the category it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub category: String,
    pub column: String,
}

/// Mapping from category value to indicator column, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorMap {
    field: String,
    indicators: Vec<Indicator>,
}

impl IndicatorMap {
    /// Name of the categorical field the indicators were built from.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.category.as_str()).collect()
    }

    pub fn columns(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.column.as_str()).collect()
    }

    /// Indicator column for a category value.
    pub fn column_for(&self, category: &str) -> Option<&str> {
        self.indicators
            .iter()
            .find(|i| i.category == category)
            .map(|i| i.column.as_str())
    }
}

/// Column name for the indicator of `category` in `field`.
pub fn indicator_column_name(field: &str, category: &str) -> String {
    format!("{field}_{category}")
}

/// Replace a categorical column with one boolean column per distinct value.
///
/// Categories are taken in first-seen order and named
/// `"<field>_<value>"`. Exactly one indicator is true on every row; an empty
/// category is [`TransformError::MissingCategory`].
pub fn one_hot_encode(df: &DataFrame, field: &str) -> Result<(DataFrame, IndicatorMap)> {
    let source = require_column(df, field)?;

    let mut labels: Vec<String> = Vec::with_capacity(df.height());
    let mut categories: Vec<String> = Vec::new();
    for idx in 0..df.height() {
        let label = any_to_string_non_empty(cell(source, idx)).ok_or_else(|| {
            TransformError::MissingCategory {
                column: field.to_string(),
                row: idx,
            }
        })?;
        if !categories.contains(&label) {
            categories.push(label.clone());
        }
        labels.push(label);
    }

    let mut encoded = df.drop(field)?;
    let mut indicators = Vec::with_capacity(categories.len());
    for category in categories {
        let column = indicator_column_name(field, &category);
        if encoded.column(&column).is_ok() {
            return Err(TransformError::DuplicateColumn { column });
        }
        let flags: Vec<bool> = labels.iter().map(|label| *label == category).collect();
        encoded.with_column(Series::new(column.as_str().into(), flags))?;
        indicators.push(Indicator { category, column });
    }

    debug!(field, categories = indicators.len(), "one-hot encoded column");
    Ok((
        encoded,
        IndicatorMap {
            field: field.to_string(),
            indicators,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric_marks_invalid_as_null() {
        let df = DataFrame::new(vec![
            Series::new(
                "mass".into(),
                vec![Some("1,200"), Some("heavy"), None, Some(" 35 ")],
            )
            .into(),
        ])
        .unwrap();

        let Coerced { frame, report } = coerce_numeric(&df, "mass").unwrap();
        let mass = frame.column("mass").unwrap().f64().unwrap();

        assert_eq!(mass.get(0), Some(1200.0));
        assert_eq!(mass.get(1), None);
        assert_eq!(mass.get(2), None);
        assert_eq!(mass.get(3), Some(35.0));
        assert_eq!(report.coerced, 2);
        assert_eq!(report.missing, 1);
        assert_eq!(report.invalid_rows, vec![1]);
    }

    #[test]
    fn test_coerce_numeric_missing_column() {
        let df = DataFrame::new(vec![Series::new("a".into(), vec!["1"]).into()]).unwrap();
        assert!(matches!(
            coerce_numeric(&df, "mass"),
            Err(TransformError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_one_hot_encode_first_seen_order() {
        let df = DataFrame::new(vec![
            Series::new("orbit".into(), vec!["LEO", "GEO", "LEO", "MEO"]).into(),
            Series::new("life".into(), vec![1.0, 2.0, 3.0, 4.0]).into(),
        ])
        .unwrap();

        let (encoded, map) = one_hot_encode(&df, "orbit").unwrap();

        assert_eq!(map.field(), "orbit");
        assert_eq!(map.categories(), vec!["LEO", "GEO", "MEO"]);
        assert_eq!(map.columns(), vec!["orbit_LEO", "orbit_GEO", "orbit_MEO"]);
        assert_eq!(map.column_for("GEO"), Some("orbit_GEO"));
        assert_eq!(map.column_for("Elliptical"), None);
        assert!(encoded.column("orbit").is_err());

        let leo = encoded.column("orbit_LEO").unwrap().bool().unwrap();
        assert_eq!(leo.get(0), Some(true));
        assert_eq!(leo.get(1), Some(false));
        assert_eq!(leo.get(2), Some(true));
    }

    #[test]
    fn test_one_hot_encode_rows_sum_to_one() {
        let df = DataFrame::new(vec![
            Series::new("orbit".into(), vec!["A", "B", "C", "B", "A"]).into(),
        ])
        .unwrap();
        let (encoded, map) = one_hot_encode(&df, "orbit").unwrap();

        for idx in 0..encoded.height() {
            let total: usize = map
                .columns()
                .iter()
                .map(|name| {
                    let flags = encoded.column(name).unwrap().bool().unwrap();
                    usize::from(flags.get(idx).unwrap_or(false))
                })
                .sum();
            assert_eq!(total, 1, "row {idx}");
        }
    }

    #[test]
    fn test_one_hot_encode_rejects_missing_category() {
        let df = DataFrame::new(vec![
            Series::new("orbit".into(), vec![Some("LEO"), None]).into(),
        ])
        .unwrap();
        let err = one_hot_encode(&df, "orbit").unwrap_err();
        assert!(matches!(err, TransformError::MissingCategory { row: 1, .. }));
    }

    #[test]
    fn test_one_hot_encode_rejects_name_collision() {
        let df = DataFrame::new(vec![
            Series::new("orbit".into(), vec!["LEO"]).into(),
            Series::new("orbit_LEO".into(), vec![1]).into(),
        ])
        .unwrap();
        assert!(matches!(
            one_hot_encode(&df, "orbit"),
            Err(TransformError::DuplicateColumn { .. })
        ));
    }
}
