//! Column standardization.

use serde::Serialize;

use crate::error::{Result, StatsError};

/// Per-column mean and population standard deviation.
///
/// A column with zero variance keeps a scale of 1 so it maps to all zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let width = row_width(rows)?;
        let n = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in rows {
            for (sum, value) in means.iter_mut().zip(row) {
                *sum += value;
            }
        }
        means.iter_mut().for_each(|sum| *sum /= n);

        let mut squares = vec![0.0; width];
        for row in rows {
            for ((sum, mean), value) in squares.iter_mut().zip(&means).zip(row) {
                *sum += (value - mean).powi(2);
            }
        }

        let scales = squares
            .into_iter()
            .map(|sum| {
                let std = (sum / n).sqrt();
                if std > 0.0 { std } else { 1.0 }
            })
            .collect();
        Ok(Self { means, scales })
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter()
            .map(|row| {
                if row.len() != self.means.len() {
                    return Err(StatsError::DimensionMismatch {
                        expected: self.means.len(),
                        found: row.len(),
                    });
                }
                Ok(row
                    .iter()
                    .zip(self.means.iter().zip(&self.scales))
                    .map(|(value, (mean, scale))| (value - mean) / scale)
                    .collect())
            })
            .collect()
    }

    pub fn fit_transform(rows: &[Vec<f64>]) -> Result<(Self, Vec<Vec<f64>>)> {
        let scaler = Self::fit(rows)?;
        let scaled = scaler.transform(rows)?;
        Ok((scaler, scaled))
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}

/// Width shared by every row; errors on empty or ragged input.
pub(crate) fn row_width(rows: &[Vec<f64>]) -> Result<usize> {
    let first = rows.first().ok_or(StatsError::EmptyInput)?;
    let width = first.len();
    if width == 0 {
        return Err(StatsError::EmptyInput);
    }
    if let Some(row) = rows.iter().find(|row| row.len() != width) {
        return Err(StatsError::DimensionMismatch {
            expected: width,
            found: row.len(),
        });
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_transform_standardizes() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0], vec![5.0, 10.0]];
        let (scaler, scaled) = StandardScaler::fit_transform(&rows).unwrap();

        assert_eq!(scaler.means(), &[3.0, 10.0]);
        assert_relative_eq!(scaler.scales()[0], (8.0f64 / 3.0).sqrt());
        assert_eq!(scaler.scales()[1], 1.0);

        let column: Vec<f64> = scaled.iter().map(|row| row[0]).collect();
        let mean: f64 = column.iter().sum::<f64>() / 3.0;
        let variance: f64 = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 3.0;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
        assert_relative_eq!(variance, 1.0, epsilon = 1e-12);
        assert!(scaled.iter().all(|row| row[1] == 0.0));
    }

    #[test]
    fn test_fit_rejects_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            StandardScaler::fit(&rows),
            Err(StatsError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(StatsError::EmptyInput)
        ));
    }

    #[test]
    fn test_transform_checks_width() {
        let scaler = StandardScaler::fit(&[vec![1.0], vec![2.0]]).unwrap();
        assert!(scaler.transform(&[vec![1.0, 2.0]]).is_err());
    }
}
