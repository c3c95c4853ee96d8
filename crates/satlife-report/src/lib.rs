//! Output generation for the lifetime analysis.
//!
//! - **Plots**: actual vs. fitted scatter and lifetime-by-orbit box plot (PNG)
//! - **Report**: JSON document with cleaning counts, regression table,
//!   ANOVA and post-hoc results

mod error;
mod plot;
mod report;

pub use error::{ReportError, Result};
pub use plot::{
    ACTUAL_VS_PREDICTED_FILE, LIFETIME_BY_ORBIT_FILE, PlotBounds, plot_actual_vs_predicted,
    plot_lifetime_by_orbit,
};
pub use report::{
    AnalysisReport, GroupSummary, REPORT_SCHEMA, REPORT_SCHEMA_VERSION, RegressionReport,
    write_report,
};
