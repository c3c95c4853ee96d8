//! Ordinary least squares.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::scaler::row_width;

/// Singular values below this fraction of the largest count as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// Prepend an intercept column of ones.
pub fn add_constant(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| {
            let mut with_constant = Vec::with_capacity(row.len() + 1);
            with_constant.push(1.0);
            with_constant.extend_from_slice(row);
            with_constant
        })
        .collect()
}

/// One row of a regression table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
}

/// A fitted least-squares model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OlsFit {
    pub params: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub t_values: Vec<f64>,
    pub p_values: Vec<f64>,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Overall F test of the non-intercept terms; `None` for an
    /// intercept-only model.
    pub f_statistic: Option<f64>,
    pub f_p_value: Option<f64>,
    pub observations: usize,
    pub df_model: usize,
    pub df_resid: usize,
    #[serde(skip)]
    pub fitted: Vec<f64>,
    #[serde(skip)]
    pub residuals: Vec<f64>,
}

impl OlsFit {
    /// Pair each parameter with a term name. Missing names become `x<i>`.
    pub fn coefficients(&self, terms: &[String]) -> Vec<Coefficient> {
        (0..self.params.len())
            .map(|idx| Coefficient {
                term: terms
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("x{idx}")),
                estimate: self.params[idx],
                std_error: self.std_errors[idx],
                t_value: self.t_values[idx],
                p_value: self.p_values[idx],
            })
            .collect()
    }
}

/// Fit `y = X b` by least squares.
///
/// `x` is expected to carry an intercept column (see [`add_constant`]);
/// R² is computed around the mean of `y`.
pub fn fit_ols(x: &[Vec<f64>], y: &[f64]) -> Result<OlsFit> {
    let columns = row_width(x)?;
    let n = x.len();
    if y.len() != n {
        return Err(StatsError::DimensionMismatch {
            expected: n,
            found: y.len(),
        });
    }
    if n <= columns {
        return Err(StatsError::InsufficientData {
            observations: n,
            parameters: columns,
        });
    }

    let design = DMatrix::from_fn(n, columns, |i, j| x[i][j]);
    let target = DVector::from_column_slice(y);

    let svd = design.clone().svd(true, true);
    let tolerance = svd.singular_values.max() * RANK_TOLERANCE;
    let rank = svd.rank(tolerance);
    if rank < columns {
        return Err(StatsError::SingularDesign { rank, columns });
    }
    let params = svd
        .solve(&target, tolerance)
        .map_err(|e| StatsError::Solve(e.to_string()))?;
    let xtx_inv = (design.transpose() * &design)
        .try_inverse()
        .ok_or(StatsError::SingularDesign { rank, columns })?;

    let fitted = &design * &params;
    let residuals = &target - &fitted;
    let ssr = residuals.norm_squared();
    let mean = target.mean();
    let tss: f64 = target.iter().map(|v| (v - mean).powi(2)).sum();

    let df_resid = n - columns;
    let df_model = columns - 1;
    let sigma2 = ssr / df_resid as f64;

    let t_dist = StudentsT::new(0.0, 1.0, df_resid as f64)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    let std_errors: Vec<f64> = (0..columns)
        .map(|j| (sigma2 * xtx_inv[(j, j)]).sqrt())
        .collect();
    let t_values: Vec<f64> = params
        .iter()
        .zip(&std_errors)
        .map(|(b, se)| b / se)
        .collect();
    let p_values: Vec<f64> = t_values
        .iter()
        .map(|t| two_sided_p(&t_dist, *t))
        .collect();

    let r_squared = if tss > 0.0 { 1.0 - ssr / tss } else { 0.0 };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / df_resid as f64;

    // A constant response leaves nothing for the model to explain.
    let (f_statistic, f_p_value) = if df_model > 0 && tss > 0.0 {
        let f = ((tss - ssr).max(0.0) / df_model as f64) / sigma2;
        let f_dist = FisherSnedecor::new(df_model as f64, df_resid as f64)
            .map_err(|e| StatsError::Distribution(e.to_string()))?;
        let p = if f.is_finite() { f_dist.sf(f) } else { 0.0 };
        (Some(f), Some(p))
    } else {
        (None, None)
    };

    debug!(
        observations = n,
        parameters = columns,
        r_squared,
        "fitted least squares model"
    );
    Ok(OlsFit {
        params: params.iter().copied().collect(),
        std_errors,
        t_values,
        p_values,
        r_squared,
        adj_r_squared,
        f_statistic,
        f_p_value,
        observations: n,
        df_model,
        df_resid,
        fitted: fitted.iter().copied().collect(),
        residuals: residuals.iter().copied().collect(),
    })
}

/// Two-sided p-value of `t`. An exact fit gives infinite t and p = 0;
/// `0 / 0` stays NaN instead of reaching the CDF.
fn two_sided_p(dist: &StudentsT, t: f64) -> f64 {
    if t.is_nan() {
        f64::NAN
    } else if t.is_infinite() {
        0.0
    } else {
        2.0 * dist.sf(t.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_constant() {
        let rows = add_constant(&[vec![2.0, 3.0], vec![4.0, 5.0]]);
        assert_eq!(rows, vec![vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_recovers_noiseless_coefficients() {
        let predictors = vec![
            vec![1.0, 0.0],
            vec![2.0, 1.0],
            vec![3.0, 5.0],
            vec![4.0, 2.0],
            vec![5.0, 7.0],
        ];
        let y: Vec<f64> = predictors
            .iter()
            .map(|row| 2.0 + 3.0 * row[0] - row[1])
            .collect();

        let fit = fit_ols(&add_constant(&predictors), &y).unwrap();

        assert_relative_eq!(fit.params[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(fit.params[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(fit.params[2], -1.0, epsilon = 1e-9);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-9);
        assert_eq!(fit.df_model, 2);
        assert_eq!(fit.df_resid, 2);
        for (fitted, actual) in fit.fitted.iter().zip(&y) {
            assert_relative_eq!(fitted, actual, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_simple_regression_statistics() {
        // y = x + e with residuals (0.1, -0.2, 0.1)
        let x = add_constant(&[vec![1.0], vec![2.0], vec![3.0]]);
        let y = vec![1.1, 1.8, 3.1];

        let fit = fit_ols(&x, &y).unwrap();

        assert_relative_eq!(fit.params[1], 1.0, epsilon = 1e-9);
        assert_relative_eq!(fit.params[0], 0.0, epsilon = 1e-9);
        let ssr: f64 = fit.residuals.iter().map(|r| r * r).sum();
        assert_relative_eq!(ssr, 0.06, epsilon = 1e-9);
        assert_relative_eq!(fit.std_errors[1], (0.06f64 / 2.0).sqrt(), epsilon = 1e-9);
        assert!(fit.f_statistic.unwrap() > 0.0);
        assert!(fit.p_values.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_rejects_collinear_predictors() {
        let x = add_constant(&[
            vec![1.0, 2.0],
            vec![2.0, 4.0],
            vec![3.0, 6.0],
            vec![4.0, 8.0],
        ]);
        let y = vec![1.0, 2.0, 3.0, 5.0];
        assert!(matches!(
            fit_ols(&x, &y),
            Err(StatsError::SingularDesign { .. })
        ));
    }

    #[test]
    fn test_rejects_too_few_observations() {
        let x = add_constant(&[vec![1.0], vec![2.0]]);
        assert!(matches!(
            fit_ols(&x, &[1.0, 2.0]),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let x = add_constant(&[vec![1.0], vec![2.0], vec![3.0]]);
        assert!(matches!(
            fit_ols(&x, &[1.0, 2.0]),
            Err(StatsError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_coefficient_table() {
        let x = add_constant(&[vec![1.0], vec![2.0], vec![3.0], vec![4.0]]);
        let fit = fit_ols(&x, &[2.0, 4.1, 5.9, 8.0]).unwrap();
        let table = fit.coefficients(&["const".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].term, "const");
        assert_eq!(table[1].term, "x1");
    }

    #[test]
    fn test_constant_response_has_no_f_test() {
        let x = add_constant(&[vec![1.0], vec![2.0], vec![3.0], vec![4.0]]);
        let fit = fit_ols(&x, &[15.0, 15.0, 15.0, 15.0]).unwrap();

        assert_relative_eq!(fit.params[0], 15.0, epsilon = 1e-9);
        assert_eq!(fit.r_squared, 0.0);
        assert_eq!(fit.f_statistic, None);
        assert_eq!(fit.f_p_value, None);
        assert!(fit.p_values.iter().all(|p| p.is_nan() || (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_two_sided_p_handles_degenerate_t() {
        let dist = StudentsT::new(0.0, 1.0, 3.0).unwrap();
        assert_eq!(two_sided_p(&dist, f64::INFINITY), 0.0);
        assert_eq!(two_sided_p(&dist, f64::NEG_INFINITY), 0.0);
        assert!(two_sided_p(&dist, f64::NAN).is_nan());
        assert_relative_eq!(two_sided_p(&dist, 0.0), 1.0, epsilon = 1e-12);
    }
}
