//! Post-hoc pairwise comparisons after a one-way ANOVA.
//!
//! Every pair of groups is compared with a t test on the pooled
//! within-group variance. P-values and confidence intervals are adjusted
//! with the Bonferroni correction over the `k (k - 1) / 2` comparisons.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

use crate::anova::{Sample, validate_samples};
use crate::error::{Result, StatsError};

/// Significance level used when none is given.
pub const DEFAULT_ALPHA: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub group_a: String,
    pub group_b: String,
    /// `mean(b) - mean(a)`.
    pub mean_diff: f64,
    pub std_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub p_adjusted: f64,
    pub lower: f64,
    pub upper: f64,
    pub reject: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostHocResult {
    pub alpha: f64,
    pub method: &'static str,
    pub df: usize,
    pub comparisons: Vec<PairwiseComparison>,
}

impl PostHocResult {
    pub fn significant(&self) -> impl Iterator<Item = &PairwiseComparison> {
        self.comparisons.iter().filter(|c| c.reject)
    }
}

/// Compare every pair of samples at significance level `alpha`.
pub fn pairwise_comparisons(samples: &[Sample<'_>], alpha: f64) -> Result<PostHocResult> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StatsError::InvalidAlpha { alpha });
    }
    let observations = validate_samples(samples)?;

    let means: Vec<f64> = samples.iter().map(Sample::mean).collect();
    let ss_within: f64 = samples
        .iter()
        .zip(&means)
        .map(|(sample, mean)| sample.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>())
        .sum();
    let df = observations - samples.len();
    let ms_within = ss_within / df as f64;
    if ms_within <= 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    let pairs = samples.len() * (samples.len() - 1) / 2;
    let t_dist =
        StudentsT::new(0.0, 1.0, df as f64).map_err(|e| StatsError::Distribution(e.to_string()))?;
    let critical = t_dist.inverse_cdf(1.0 - alpha / (2.0 * pairs as f64));

    let mut comparisons = Vec::with_capacity(pairs);
    for (i, a) in samples.iter().enumerate() {
        for (j, b) in samples.iter().enumerate().skip(i + 1) {
            let mean_diff = means[j] - means[i];
            let std_error = (ms_within
                * (1.0 / a.values.len() as f64 + 1.0 / b.values.len() as f64))
                .sqrt();
            let t_statistic = mean_diff / std_error;
            let p_value = 2.0 * t_dist.sf(t_statistic.abs());
            let p_adjusted = (p_value * pairs as f64).min(1.0);
            comparisons.push(PairwiseComparison {
                group_a: a.label.to_string(),
                group_b: b.label.to_string(),
                mean_diff,
                std_error,
                t_statistic,
                p_value,
                p_adjusted,
                lower: mean_diff - critical * std_error,
                upper: mean_diff + critical * std_error,
                reject: p_adjusted < alpha,
            });
        }
    }

    debug!(
        pairs,
        rejected = comparisons.iter().filter(|c| c.reject).count(),
        alpha,
        "pairwise comparisons"
    );
    Ok(PostHocResult {
        alpha,
        method: "bonferroni",
        df,
        comparisons,
    })
}
