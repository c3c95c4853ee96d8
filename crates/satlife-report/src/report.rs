//! JSON analysis report.

use std::path::Path;

use satlife_stats::{AnovaResult, Coefficient, OlsFit, PostHocResult};
use satlife_transform::{GroupSample, Indicator, PrepareSummary};
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};

pub const REPORT_SCHEMA: &str = "satlife.analysis";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Regression table with the model-level statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionReport {
    pub response: String,
    pub observations: usize,
    /// Rows left out because a predictor or the response was missing.
    pub excluded: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: Option<f64>,
    pub f_p_value: Option<f64>,
    pub coefficients: Vec<Coefficient>,
}

impl RegressionReport {
    pub fn new(response: &str, fit: &OlsFit, terms: &[String], excluded: usize) -> Self {
        Self {
            response: response.to_string(),
            observations: fit.observations,
            excluded,
            r_squared: fit.r_squared,
            adj_r_squared: fit.adj_r_squared,
            f_statistic: fit.f_statistic,
            f_p_value: fit.f_p_value,
            coefficients: fit.coefficients(terms),
        }
    }
}

/// Size and spread of one category's lifetimes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub category: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl GroupSummary {
    pub fn from_group(group: &GroupSample) -> Self {
        let count = group.len();
        let mean = (count > 0).then(|| group.values.iter().sum::<f64>() / count as f64);
        Self {
            category: group.category.clone(),
            count,
            mean,
            min: group.values.iter().copied().reduce(f64::min),
            max: group.values.iter().copied().reduce(f64::max),
        }
    }
}

/// Everything one `analyze` run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub input: String,
    pub cleaning: PrepareSummary,
    pub indicators: Vec<Indicator>,
    pub regression: RegressionReport,
    pub groups: Vec<GroupSummary>,
    /// Absent when fewer than two orbit classes have observations.
    pub anova: Option<AnovaResult>,
    pub posthoc: Option<PostHocResult>,
}

impl AnalysisReport {
    pub fn new(
        input: impl Into<String>,
        cleaning: PrepareSummary,
        indicators: Vec<Indicator>,
        regression: RegressionReport,
    ) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            input: input.into(),
            cleaning,
            indicators,
            regression,
            groups: Vec::new(),
            anova: None,
            posthoc: None,
        }
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write `report` as pretty-printed JSON, creating parent directories.
pub fn write_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote analysis report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_summary() {
        let group = GroupSample {
            category: "GEO".to_string(),
            values: vec![15.0, 12.0, 18.0],
        };
        let summary = GroupSummary::from_group(&group);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, Some(15.0));
        assert_eq!(summary.min, Some(12.0));
        assert_eq!(summary.max, Some(18.0));
    }

    #[test]
    fn test_group_summary_empty() {
        let group = GroupSample {
            category: "HEO".to_string(),
            values: Vec::new(),
        };
        let summary = GroupSummary::from_group(&group);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.min, None);
    }

    #[test]
    fn test_regression_report_names_terms() {
        let fit = OlsFit {
            params: vec![8.5, 1.25],
            std_errors: vec![0.5, 0.25],
            t_values: vec![17.0, 5.0],
            p_values: vec![0.001, 0.01],
            r_squared: 0.75,
            adj_r_squared: 0.5,
            f_statistic: Some(25.0),
            f_p_value: Some(0.01),
            observations: 10,
            df_model: 1,
            df_resid: 8,
            fitted: Vec::new(),
            residuals: Vec::new(),
        };
        let terms = vec!["const".to_string(), "Perigee (Kilometers)".to_string()];

        let report = RegressionReport::new("Expected Lifetime (Years)", &fit, &terms, 2);

        assert_eq!(report.excluded, 2);
        assert_eq!(report.coefficients.len(), 2);
        assert_eq!(report.coefficients[1].term, "Perigee (Kilometers)");
        assert_eq!(report.coefficients[1].estimate, 1.25);
    }
}
