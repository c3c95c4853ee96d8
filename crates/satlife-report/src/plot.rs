//! PNG charts drawn with `plotters`.

use std::path::Path;

use plotters::prelude::*;
use satlife_transform::GroupSample;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::report::ensure_parent_dir;

/// File name of the actual vs. fitted scatter inside the output directory.
pub const ACTUAL_VS_PREDICTED_FILE: &str = "actual_vs_predicted.png";

/// File name of the lifetime box plot inside the output directory.
pub const LIFETIME_BY_ORBIT_FILE: &str = "lifetime_by_orbit.png";

const CANVAS: (u32, u32) = (800, 600);
const POINT_COLOR: RGBColor = RGBColor(0xac, 0x78, 0xbf);
const LINE_COLOR: RGBColor = RGBColor(0x12, 0x0a, 0x4d);

/// Axis range with a little padding around the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub min: f64,
    pub max: f64,
}

impl PlotBounds {
    /// Padded range covering every finite value, `None` if there is none.
    pub fn covering<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Self> {
        let mut range: Option<(f64, f64)> = None;
        for &value in values.into_iter().filter(|v| v.is_finite()) {
            range = Some(match range {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        range.map(|(min, max)| {
            let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
            Self {
                min: min - pad,
                max: max + pad,
            }
        })
    }
}

fn draw_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> ReportError + '_ {
    move |e| ReportError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Scatter of fitted against actual lifetimes with a `y = x` reference line.
pub fn plot_actual_vs_predicted(path: &Path, actual: &[f64], fitted: &[f64]) -> Result<()> {
    if actual.len() != fitted.len() {
        return Err(ReportError::LengthMismatch {
            actual: actual.len(),
            fitted: fitted.len(),
        });
    }
    let bounds = PlotBounds::covering(actual.iter().chain(fitted)).ok_or_else(|| {
        ReportError::EmptyData {
            what: "actual vs. predicted lifetimes".to_string(),
        }
    })?;
    ensure_parent_dir(path)?;

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Actual vs. Predicted Expected Lifetime", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.min..bounds.max, bounds.min..bounds.max)
        .map_err(draw_error(path))?;

    chart
        .configure_mesh()
        .x_desc("Actual Expected Lifetime (Years)")
        .y_desc("Predicted Expected Lifetime (Years)")
        .draw()
        .map_err(draw_error(path))?;

    chart
        .draw_series(
            actual
                .iter()
                .zip(fitted)
                .filter(|(a, f)| a.is_finite() && f.is_finite())
                .map(|(&a, &f)| Circle::new((a, f), 4, POINT_COLOR.mix(0.7).filled())),
        )
        .map_err(draw_error(path))?
        .label("Predicted")
        .legend(|(x, y)| Circle::new((x, y), 4, POINT_COLOR.filled()));

    chart
        .draw_series(LineSeries::new(
            [(bounds.min, bounds.min), (bounds.max, bounds.max)],
            LINE_COLOR.stroke_width(2),
        ))
        .map_err(draw_error(path))?
        .label("Actual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], LINE_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_error(path))?;

    root.present().map_err(draw_error(path))?;
    debug!(path = %path.display(), points = actual.len(), "wrote scatter plot");
    Ok(())
}

/// Box plot of lifetimes per orbit class. Empty groups are left out.
pub fn plot_lifetime_by_orbit(path: &Path, groups: &[GroupSample]) -> Result<()> {
    let groups: Vec<&GroupSample> = groups.iter().filter(|g| !g.is_empty()).collect();
    let bounds = PlotBounds::covering(groups.iter().flat_map(|g| g.values.iter()))
        .ok_or_else(|| ReportError::EmptyData {
            what: "lifetime groups".to_string(),
        })?;
    let labels: Vec<String> = groups.iter().map(|g| g.category.clone()).collect();
    ensure_parent_dir(path)?;

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Expected Lifetime by Class of Orbit", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            labels[..].into_segmented(),
            bounds.min as f32..bounds.max as f32,
        )
        .map_err(draw_error(path))?;

    chart
        .configure_mesh()
        .x_desc("Class of Orbit")
        .y_desc("Expected Lifetime (Years)")
        .draw()
        .map_err(draw_error(path))?;

    chart
        .draw_series(groups.iter().zip(&labels).map(|(group, label)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(label), &Quartiles::new(&group.values))
                .width(30)
                .whisker_width(0.5)
                .style(&LINE_COLOR)
        }))
        .map_err(draw_error(path))?;

    root.present().map_err(draw_error(path))?;
    debug!(path = %path.display(), groups = groups.len(), "wrote box plot");
    Ok(())
}
