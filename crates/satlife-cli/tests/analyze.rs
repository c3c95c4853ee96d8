//! End-to-end runs of the analysis pipeline on small CSV fixtures.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use tempfile::TempDir;

use satlife_cli::pipeline::{AnalysisOptions, INTERCEPT_TERM, run_analysis, run_clean};
use satlife_ingest::{
    APOGEE, EXPECTED_LIFETIME, INCLINATION, IngestError, LAUNCH_MASS, PERIGEE,
};
use satlife_transform::TransformError;

const HEADER: &str = "Name,Class of Orbit,Perigee (Kilometers),Apogee (Kilometers),\
Inclination (Degrees),Launch Mass (Kilograms),Expected Lifetime (Years)";

const ROWS: &[&str] = &[
    "A,LEO,500,520,97.4,\"1,200\",5 yr.",
    "B,LEO,550,600,53,260,3-5 yrs.",
    "C,GEO,35780,35790,0.1,4500,15 yrs.",
    "D,GEO,35770,35800,0.05,5200,15",
    "E,MEO,20100,20300,55,1600,10 yr.",
    "F,MEO,19900,20200,56,1700,12",
    "G,Elliptical,1000,39000,63.4,1800,7.5",
    "H,LEO ,700,710,98,900,7",
    "I,GEO,35786,35786,0.02,6000,12-18 yrs.",
    "J,LEO,400,420,51.6,unknown,2",
    "K,MEO,23200,23250,56,700,12",
    "L,GEO,35785,35790,0.1,,15",
    "M,LEO,600,620,97,150,",
    "N,Elliptical,500,40000,63,1500,8",
];

fn write_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("satellites.csv");
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    std::fs::write(&path, contents).unwrap();
    path
}

fn options(input: &Path, dir: &TempDir) -> AnalysisOptions {
    let mut options = AnalysisOptions::new(input);
    options.output_dir = dir.path().join("img");
    options.plots = false;
    options.report = Some(dir.path().join("report.json"));
    options
}

#[test]
fn analyze_reports_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(&dir, ROWS);

    let outcome = run_analysis(&options(&input, &dir)).unwrap();
    let report = &outcome.report;

    assert_eq!(report.cleaning.rows_in, 14);
    assert_eq!(report.cleaning.rows_dropped, 2);
    assert_eq!(report.cleaning.rows_out, 12);
    let mass = report
        .cleaning
        .coercions
        .iter()
        .find(|c| c.column == LAUNCH_MASS)
        .unwrap();
    assert_eq!(mass.invalid(), 1);

    let regression = &report.regression;
    assert_eq!(regression.observations, 11);
    assert_eq!(regression.excluded, 1);
    let terms: Vec<&str> = regression
        .coefficients
        .iter()
        .map(|c| c.term.as_str())
        .collect();
    assert_eq!(
        terms,
        vec![INTERCEPT_TERM, PERIGEE, APOGEE, LAUNCH_MASS, INCLINATION]
    );
    // Standardized predictors put the intercept at the mean lifetime.
    assert_relative_eq!(regression.coefficients[0].estimate, 110.5 / 11.0, epsilon = 1e-9);
    assert_eq!(outcome.fit.fitted.len(), 11);

    let categories: Vec<&str> = report.groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(categories, vec!["LEO", "GEO", "MEO", "Elliptical"]);
    assert_eq!(report.groups[0].count, 4);
    assert_eq!(report.groups[1].mean, Some(15.0));

    let anova = report.anova.as_ref().unwrap();
    assert_eq!(anova.groups, 4);
    assert_eq!(anova.observations, 12);
    assert!(anova.rejects_at(0.05));
    let posthoc = report.posthoc.as_ref().unwrap();
    assert_eq!(posthoc.comparisons.len(), 6);

    assert!(outcome.plots.is_empty());
    assert!(!dir.path().join("img").exists());
}

#[test]
fn analyze_writes_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(&dir, ROWS);
    let options = options(&input, &dir);

    let outcome = run_analysis(&options).unwrap();

    let path = outcome.report_path.unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["schema"], "satlife.analysis");
    assert_eq!(value["regression"]["response"], EXPECTED_LIFETIME);
    assert_eq!(value["indicators"][0]["column"], "Class of Orbit_LEO");
    assert_eq!(value["posthoc"]["method"], "bonferroni");
}

#[test]
fn single_orbit_class_skips_anova() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<&str> = ROWS
        .iter()
        .copied()
        .filter(|row| row.contains(",LEO"))
        .collect();
    let extra = [
        "O,LEO,450,480,51,300,4",
        "P,LEO,800,820,86,690,6",
        "Q,LEO,1200,1250,52,150,1-3",
    ];
    let rows: Vec<&str> = rows.into_iter().chain(extra).collect();
    let input = write_csv(&dir, &rows);

    let outcome = run_analysis(&options(&input, &dir)).unwrap();

    assert_eq!(outcome.report.groups.len(), 1);
    assert!(outcome.report.anova.is_none());
    assert!(outcome.report.posthoc.is_none());
}

#[test]
fn constant_lifetimes_skip_anova() {
    let dir = tempfile::tempdir().unwrap();
    let rows = [
        "A,LEO,500,520,97.4,1200,15",
        "B,LEO,550,600,53,260,15 yrs.",
        "C,GEO,35780,35790,0.1,4500,15",
        "D,GEO,35770,35800,0.05,5200,10-20",
        "E,MEO,20100,20300,55,1600,15 yr.",
        "F,MEO,19900,20200,56,1700,15",
        "G,LEO,700,710,98,900,15",
    ];
    let input = write_csv(&dir, &rows);

    let outcome = run_analysis(&options(&input, &dir)).unwrap();
    let report = &outcome.report;

    assert_eq!(report.regression.observations, 7);
    assert_eq!(report.regression.f_statistic, None);
    assert_relative_eq!(report.regression.coefficients[0].estimate, 15.0, epsilon = 1e-9);
    assert_eq!(report.groups.len(), 3);
    assert!(report.anova.is_none());
    assert!(report.posthoc.is_none());
    assert!(dir.path().join("report.json").exists());
}

#[test]
fn ambiguous_lifetime_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = ROWS.to_vec();
    rows.push("Z,LEO,500,520,97,300,5-10-15 yrs.");
    let input = write_csv(&dir, &rows);

    let err = run_analysis(&options(&input, &dir)).unwrap_err();

    let transform = err.downcast_ref::<TransformError>().unwrap();
    assert!(matches!(
        transform,
        TransformError::MalformedValue { column, .. } if column == EXPECTED_LIFETIME
    ));
    assert!(!dir.path().join("report.json").exists());
}

#[test]
fn missing_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("satellites.csv");
    std::fs::write(
        &path,
        "Name,Perigee (Kilometers),Expected Lifetime (Years)\nA,500,5\n",
    )
    .unwrap();

    let err = run_clean(&path).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<IngestError>(),
        Some(IngestError::MissingColumn { .. })
    ));
}

#[test]
fn clean_resolves_lifetimes_and_encodes_orbits() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(&dir, ROWS);

    let prepared = run_clean(&input).unwrap();

    assert_eq!(prepared.frame.height(), 12);
    let lifetimes: Vec<Option<f64>> = prepared
        .frame
        .column(EXPECTED_LIFETIME)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(lifetimes[0], Some(5.0));
    assert_eq!(lifetimes[1], Some(4.0));
    assert_eq!(lifetimes[8], Some(15.0));
    assert_eq!(
        prepared.indicators.categories(),
        vec!["LEO", "GEO", "MEO", "Elliptical"]
    );
    assert!(prepared.frame.column("Class of Orbit").is_err());
}
