use anyhow::{Result, bail};
use tracing::info;

use satlife_cli::pipeline::{self, AnalysisOptions};

use crate::cli::{AnalyzeArgs, CleanArgs};
use crate::summary::{print_analysis, print_clean};

pub fn run_clean(args: &CleanArgs) -> Result<()> {
    let prepared = pipeline::run_clean(&args.input)?;
    print_clean(&prepared, args.rows);
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    if !(args.alpha > 0.0 && args.alpha < 1.0) {
        bail!("--alpha must be between 0 and 1, got {}", args.alpha);
    }
    let mut options = AnalysisOptions::new(&args.input);
    options.alpha = args.alpha;
    options.output_dir = args.output_dir.clone();
    options.plots = !args.no_plots;
    options.report = args.report.clone();
    if !args.predictors.is_empty() {
        options.predictors = args.predictors.clone();
    }
    info!(
        predictors = options.predictors.len(),
        alpha = options.alpha,
        plots = options.plots,
        "starting analysis"
    );

    let outcome = pipeline::run_analysis(&options)?;
    print_analysis(&outcome);
    Ok(())
}
