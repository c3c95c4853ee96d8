//! Design-matrix assembly and group partitions.

use polars::prelude::{AnyValue, Column, DataFrame};
use satlife_ingest::any_to_f64;
use serde::Serialize;
use tracing::debug;

use crate::data_utils::{cell, require_column};
use crate::encoding::IndicatorMap;
use crate::error::{Result, TransformError};

/// Predictor rows paired 1:1 with response values.
///
/// Rows with a missing or non-numeric cell in any requested column are left
/// out, so every stored row is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    predictors: Vec<String>,
    response: String,
    rows: Vec<Vec<f64>>,
    targets: Vec<f64>,
    source_rows: Vec<usize>,
    excluded: usize,
}

impl DesignMatrix {
    /// Build the matrix from `predictors` and `response` columns of `df`.
    pub fn build(df: &DataFrame, predictors: &[&str], response: &str) -> Result<Self> {
        if predictors.is_empty() {
            return Err(TransformError::NoPredictors);
        }
        let predictor_columns = predictors
            .iter()
            .map(|name| require_column(df, name))
            .collect::<Result<Vec<_>>>()?;
        let response_column = require_column(df, response)?;

        let mut rows = Vec::with_capacity(df.height());
        let mut targets = Vec::with_capacity(df.height());
        let mut source_rows = Vec::with_capacity(df.height());

        for idx in 0..df.height() {
            let Some(target) = numeric_cell(response_column, idx) else {
                continue;
            };
            let row: Option<Vec<f64>> = predictor_columns
                .iter()
                .map(|column| numeric_cell(column, idx))
                .collect();
            let Some(row) = row else {
                continue;
            };
            rows.push(row);
            targets.push(target);
            source_rows.push(idx);
        }

        let excluded = df.height() - rows.len();
        debug!(
            rows = rows.len(),
            excluded,
            predictors = predictors.len(),
            "built design matrix"
        );
        Ok(Self {
            predictors: predictors.iter().map(ToString::to_string).collect(),
            response: response.to_string(),
            rows,
            targets,
            source_rows,
            excluded,
        })
    }

    pub fn predictor_names(&self) -> &[String] {
        &self.predictors
    }

    pub fn response_name(&self) -> &str {
        &self.response
    }

    /// Predictor values, one inner vector per kept record.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn response(&self) -> &[f64] {
        &self.targets
    }

    /// Row index in the source frame of each kept record.
    pub fn source_rows(&self) -> &[usize] {
        &self.source_rows
    }

    /// Number of source rows left out for missing values.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of predictor columns.
    pub fn width(&self) -> usize {
        self.predictors.len()
    }
}

/// Response values of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSample {
    pub category: String,
    pub values: Vec<f64>,
}

impl GroupSample {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Partition `response` by the indicators in `indicators`.
///
/// One sample per indicator, in map order, holding the response values of
/// the rows where that indicator is set. Rows with a missing response are
/// skipped.
pub fn group_by(
    df: &DataFrame,
    response: &str,
    indicators: &IndicatorMap,
) -> Result<Vec<GroupSample>> {
    let response_column = require_column(df, response)?;
    let mut groups = Vec::with_capacity(indicators.len());

    for indicator in indicators.iter() {
        let flags = require_column(df, &indicator.column)?;
        let values: Vec<f64> = (0..df.height())
            .filter(|&idx| matches!(cell(flags, idx), AnyValue::Boolean(true)))
            .filter_map(|idx| numeric_cell(response_column, idx))
            .collect();
        groups.push(GroupSample {
            category: indicator.category.clone(),
            values,
        });
    }

    debug!(
        response,
        groups = groups.len(),
        "partitioned response by category"
    );
    Ok(groups)
}

fn numeric_cell(column: &Column, idx: usize) -> Option<f64> {
    any_to_f64(cell(column, idx)).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::one_hot_encode;
    use polars::prelude::{NamedFrom, Series};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("x1".into(), vec![Some(1.0), Some(2.0), None, Some(4.0)]).into(),
            Series::new("x2".into(), vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]).into(),
            Series::new("y".into(), vec![Some(5.0), None, Some(7.0), Some(8.0)]).into(),
            Series::new("orbit".into(), vec!["LEO", "GEO", "LEO", "GEO"]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_skips_incomplete_rows() {
        let design = DesignMatrix::build(&sample_frame(), &["x1", "x2"], "y").unwrap();

        assert_eq!(design.len(), 2);
        assert_eq!(design.width(), 2);
        assert_eq!(design.rows(), &[vec![1.0, 10.0], vec![4.0, 40.0]]);
        assert_eq!(design.response(), &[5.0, 8.0]);
        assert_eq!(design.source_rows(), &[0, 3]);
        assert_eq!(design.excluded(), 2);
        assert_eq!(design.rows().len(), design.response().len());
    }

    #[test]
    fn test_build_rejects_empty_predictors() {
        assert!(matches!(
            DesignMatrix::build(&sample_frame(), &[], "y"),
            Err(TransformError::NoPredictors)
        ));
    }

    #[test]
    fn test_build_missing_column() {
        assert!(matches!(
            DesignMatrix::build(&sample_frame(), &["x3"], "y"),
            Err(TransformError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_group_by_indicator() {
        let (encoded, map) = one_hot_encode(&sample_frame(), "orbit").unwrap();
        let groups = group_by(&encoded, "y", &map).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "LEO");
        assert_eq!(groups[0].values, vec![5.0, 7.0]);
        assert_eq!(groups[1].category, "GEO");
        assert_eq!(groups[1].values, vec![8.0]);
    }
}
