//! CLI argument definitions for the satellite lifetime analysis.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "satlife",
    version,
    about = "Satellite lifetime analysis - clean, regress and compare orbit classes",
    long_about = "Clean a satellite database export and analyze expected lifetime.\n\n\
                  Resolves lifetime expressions such as \"5-10 yrs.\", one-hot encodes\n\
                  the orbit class, fits a least-squares model on standardized predictors\n\
                  and compares lifetimes across orbit classes with ANOVA."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean and encode the table, then print a preview.
    Clean(CleanArgs),

    /// Run the regression, ANOVA and post-hoc comparisons.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Satellite database CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of cleaned rows to print.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Satellite database CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the generated plots.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "img")]
    pub output_dir: PathBuf,

    /// Significance level for the ANOVA and post-hoc tests.
    #[arg(long = "alpha", value_name = "A", default_value_t = 0.05)]
    pub alpha: f64,

    /// Regression predictor column (repeatable; defaults to perigee, apogee,
    /// launch mass and inclination).
    #[arg(long = "predictor", value_name = "COL")]
    pub predictors: Vec<String>,

    /// Skip writing plots.
    #[arg(long = "no-plots")]
    pub no_plots: bool,

    /// Write a JSON report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["satlife", "analyze", "sats.csv"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, PathBuf::from("sats.csv"));
        assert_eq!(args.output_dir, PathBuf::from("img"));
        assert_eq!(args.alpha, 0.05);
        assert!(args.predictors.is_empty());
        assert!(!args.no_plots);
        assert!(args.report.is_none());
    }

    #[test]
    fn test_repeated_predictors_and_global_flags() {
        let cli = Cli::try_parse_from([
            "satlife",
            "analyze",
            "sats.csv",
            "--predictor",
            "Perigee (Kilometers)",
            "--predictor",
            "Launch Mass (Kilograms)",
            "--no-plots",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(
            args.predictors,
            vec!["Perigee (Kilometers)", "Launch Mass (Kilograms)"]
        );
        assert!(args.no_plots);
    }

    #[test]
    fn test_clean_rows() {
        let cli = Cli::try_parse_from(["satlife", "clean", "sats.csv", "--rows", "3"]).unwrap();
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.rows, 3);
    }
}
