//! One-way analysis of variance.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::debug;

use crate::error::{Result, StatsError};

/// A labelled sample of observations.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

impl<'a> Sample<'a> {
    pub fn new(label: &'a str, values: &'a [f64]) -> Self {
        Self { label, values }
    }

    pub(crate) fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaResult {
    pub groups: usize,
    pub observations: usize,
    pub ss_between: f64,
    pub ss_within: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub ms_between: f64,
    pub ms_within: f64,
    pub f_statistic: f64,
    pub p_value: f64,
}

impl AnovaResult {
    /// Whether the null hypothesis of equal means is rejected at `alpha`.
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Check the sample shape shared by ANOVA and the post-hoc tests.
pub(crate) fn validate_samples(samples: &[Sample<'_>]) -> Result<usize> {
    if samples.len() < 2 {
        return Err(StatsError::TooFewGroups {
            found: samples.len(),
        });
    }
    if let Some(empty) = samples.iter().find(|s| s.values.is_empty()) {
        return Err(StatsError::EmptyGroup {
            label: empty.label.to_string(),
        });
    }
    let observations: usize = samples.iter().map(|s| s.values.len()).sum();
    if observations <= samples.len() {
        return Err(StatsError::InsufficientData {
            observations,
            parameters: samples.len(),
        });
    }
    Ok(observations)
}

/// F test for equality of the sample means.
///
/// Fails with [`StatsError::ZeroVariance`] when every sample is constant.
pub fn one_way_anova(samples: &[Sample<'_>]) -> Result<AnovaResult> {
    let observations = validate_samples(samples)?;
    let grand_mean =
        samples.iter().flat_map(|s| s.values).sum::<f64>() / observations as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for sample in samples {
        let mean = sample.mean();
        ss_between += sample.values.len() as f64 * (mean - grand_mean).powi(2);
        ss_within += sample
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
    }

    let df_between = samples.len() - 1;
    let df_within = observations - samples.len();
    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    if ms_within <= 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    let f_statistic = ms_between / ms_within;

    let f_dist = FisherSnedecor::new(df_between as f64, df_within as f64)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    let p_value = f_dist.sf(f_statistic);

    debug!(
        groups = samples.len(),
        observations,
        f_statistic,
        p_value,
        "one-way ANOVA"
    );
    Ok(AnovaResult {
        groups: samples.len(),
        observations,
        ss_between,
        ss_within,
        df_between,
        df_within,
        ms_between,
        ms_within,
        f_statistic,
        p_value,
    })
}
