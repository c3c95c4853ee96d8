//! Analysis pipeline shared by the `clean` and `analyze` commands.
//!
//! Load → prepare → design matrix → scale + OLS → group → ANOVA → post-hoc
//! → plots + report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use satlife_ingest::{DEFAULT_PREDICTORS, EXPECTED_LIFETIME, REQUIRED_COLUMNS, read_satellite_table};
use satlife_report::{
    ACTUAL_VS_PREDICTED_FILE, AnalysisReport, GroupSummary, LIFETIME_BY_ORBIT_FILE,
    RegressionReport, plot_actual_vs_predicted, plot_lifetime_by_orbit, write_report,
};
use satlife_stats::{
    DEFAULT_ALPHA, OlsFit, Sample, StandardScaler, StatsError, add_constant, fit_ols,
    one_way_anova, pairwise_comparisons,
};
use satlife_transform::{DesignMatrix, GroupSample, PrepareOptions, PreparedData, group_by, prepare};

/// Name of the intercept term in regression tables.
pub const INTERCEPT_TERM: &str = "const";

/// Default directory for plot output.
pub const DEFAULT_OUTPUT_DIR: &str = "img";

/// Resolved settings for one `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub input: PathBuf,
    pub response: String,
    pub predictors: Vec<String>,
    pub alpha: f64,
    pub output_dir: PathBuf,
    pub plots: bool,
    pub report: Option<PathBuf>,
}

impl AnalysisOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            response: EXPECTED_LIFETIME.to_string(),
            predictors: DEFAULT_PREDICTORS.iter().map(ToString::to_string).collect(),
            alpha: DEFAULT_ALPHA,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            plots: true,
            report: None,
        }
    }

    /// Preparation settings with every predictor coerced to numbers.
    fn prepare_options(&self) -> PrepareOptions {
        let mut options = PrepareOptions {
            lifetime: self.response.clone(),
            ..PrepareOptions::default()
        };
        for predictor in &self.predictors {
            if !options.numeric.contains(predictor) {
                options.numeric.push(predictor.clone());
            }
        }
        options
    }
}

/// Everything an `analyze` run produced.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub fit: OlsFit,
    pub groups: Vec<GroupSample>,
    pub plots: Vec<PathBuf>,
    pub report_path: Option<PathBuf>,
}

/// Read the input table and check for the expected columns.
pub fn load_table(path: &Path, extra_columns: &[String]) -> Result<DataFrame> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut required: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    for column in extra_columns {
        if !required.contains(&column.as_str()) {
            required.push(column);
        }
    }
    let df = read_satellite_table(path, &required)
        .with_context(|| format!("load {}", path.display()))?;
    info!(
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "loaded satellite table"
    );
    Ok(df)
}

/// Run the cleaning and encoding stages only.
pub fn run_clean(input: &Path) -> Result<PreparedData> {
    let df = load_table(input, &[])?;
    prepare(&df, &PrepareOptions::default()).context("prepare satellite table")
}

/// Run the full analysis.
pub fn run_analysis(options: &AnalysisOptions) -> Result<AnalysisOutcome> {
    let span = info_span!("analyze", input = %options.input.display());
    let _guard = span.enter();

    let mut extra_columns = options.predictors.clone();
    extra_columns.push(options.response.clone());
    let df = load_table(&options.input, &extra_columns)?;
    let prepared =
        prepare(&df, &options.prepare_options()).context("prepare satellite table")?;

    let (design, fit) = fit_regression(&prepared.frame, options)?;
    let mut terms = vec![INTERCEPT_TERM.to_string()];
    terms.extend(design.predictor_names().iter().cloned());
    let regression =
        RegressionReport::new(&options.response, &fit, &terms, design.excluded());

    let groups = group_by(&prepared.frame, &options.response, &prepared.indicators)
        .context("group lifetimes by orbit class")?;

    let mut report = AnalysisReport::new(
        options.input.display().to_string(),
        prepared.summary(),
        prepared.indicators.iter().cloned().collect(),
        regression,
    );
    report.groups = groups.iter().map(GroupSummary::from_group).collect();
    compare_groups(&groups, options.alpha, &mut report)?;

    let plots = if options.plots {
        write_plots(&options.output_dir, design.response(), &fit.fitted, &groups)?
    } else {
        debug!("plots disabled");
        Vec::new()
    };

    if let Some(path) = &options.report {
        write_report(path, &report).with_context(|| format!("write {}", path.display()))?;
    }

    Ok(AnalysisOutcome {
        report,
        fit,
        groups,
        plots,
        report_path: options.report.clone(),
    })
}

fn fit_regression(frame: &DataFrame, options: &AnalysisOptions) -> Result<(DesignMatrix, OlsFit)> {
    let span = info_span!("regression", predictors = options.predictors.len());
    let _guard = span.enter();

    let predictors: Vec<&str> = options.predictors.iter().map(String::as_str).collect();
    let design = DesignMatrix::build(frame, &predictors, &options.response)
        .context("build design matrix")?;
    if design.excluded() > 0 {
        warn!(
            excluded = design.excluded(),
            "rows with missing predictors left out of the regression"
        );
    }

    let (_, scaled) = StandardScaler::fit_transform(design.rows()).context("scale predictors")?;
    let fit = fit_ols(&add_constant(&scaled), design.response()).context("fit least squares")?;
    info!(
        observations = fit.observations,
        r_squared = fit.r_squared,
        "fitted regression"
    );
    Ok((design, fit))
}

/// One-way ANOVA and post-hoc comparisons across the non-empty groups.
fn compare_groups(groups: &[GroupSample], alpha: f64, report: &mut AnalysisReport) -> Result<()> {
    let span = info_span!("anova", groups = groups.len());
    let _guard = span.enter();

    let samples: Vec<Sample<'_>> = groups
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| Sample::new(&group.category, &group.values))
        .collect();
    if samples.len() < 2 {
        warn!(
            groups = samples.len(),
            "fewer than two orbit classes with data, skipping ANOVA"
        );
        return Ok(());
    }

    let anova = match one_way_anova(&samples) {
        Ok(anova) => anova,
        Err(StatsError::ZeroVariance) => {
            warn!(
                groups = samples.len(),
                "lifetimes are constant within every orbit class, skipping ANOVA"
            );
            return Ok(());
        }
        Err(error) => return Err(error).context("one-way ANOVA"),
    };
    info!(
        f_statistic = anova.f_statistic,
        p_value = anova.p_value,
        "compared lifetimes across orbit classes"
    );
    let posthoc = pairwise_comparisons(&samples, alpha).context("post-hoc comparisons")?;
    report.anova = Some(anova);
    report.posthoc = Some(posthoc);
    Ok(())
}

fn write_plots(
    output_dir: &Path,
    actual: &[f64],
    fitted: &[f64],
    groups: &[GroupSample],
) -> Result<Vec<PathBuf>> {
    let span = info_span!("plots", output_dir = %output_dir.display());
    let _guard = span.enter();

    let mut written = Vec::new();
    let scatter = output_dir.join(ACTUAL_VS_PREDICTED_FILE);
    plot_actual_vs_predicted(&scatter, actual, fitted)
        .with_context(|| format!("plot {}", scatter.display()))?;
    written.push(scatter);

    if groups.iter().any(|group| !group.is_empty()) {
        let boxes = output_dir.join(LIFETIME_BY_ORBIT_FILE);
        plot_lifetime_by_orbit(&boxes, groups)
            .with_context(|| format!("plot {}", boxes.display()))?;
        written.push(boxes);
    }
    info!(plots = written.len(), "wrote plots");
    Ok(written)
}
