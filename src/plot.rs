//! Static trace plots of optimization runs.
//!
//! Renders the per-iteration traces (variational parameters, energy per
//! particle) that accompany stochastic-gradient-descent runs. Each source
//! run gets one palette color; its companion series are drawn in the same
//! color at decreasing opacity so parameters and energy stay visually
//! grouped.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{AnalysisError, Result};

/// Palette in matplotlib's tab10 order.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color for the i-th run, cycling through the palette.
///
/// A pure lookup: callers index it however they iterate, nothing is
/// dispensed or consumed.
pub fn color_for_index(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// One plotted curve: a label and its per-iteration values.
#[derive(Clone, Debug)]
pub struct TraceSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// All curves from one source run, sharing one color.
#[derive(Clone, Debug)]
pub struct RunTraces {
    pub label: String,
    pub series: Vec<TraceSeries>,
}

/// Value bounds over every series of every run; None if nothing to plot.
fn value_bounds(runs: &[RunTraces]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for run in runs {
        for series in &run.series {
            for &v in &series.values {
                bounds = Some(match bounds {
                    None => (v, v),
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                });
            }
        }
    }
    bounds
}

fn longest_series(runs: &[RunTraces]) -> usize {
    runs.iter()
        .flat_map(|run| run.series.iter().map(|s| s.values.len()))
        .max()
        .unwrap_or(0)
}

/// Draw every run's traces against iteration number into a PNG file.
pub fn render_traces(path: &Path, caption: &str, runs: &[RunTraces]) -> Result<()> {
    let (y_min, y_max) = value_bounds(runs).ok_or(AnalysisError::EmptyInput)?;
    // Degenerate ranges (constant traces) still need a drawable span.
    let pad = (0.05 * (y_max - y_min)).max(1e-3);
    let x_max = longest_series(runs).max(2) as f64;

    let root = BitMapBackend::new(path, (1280, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, (y_min - pad)..(y_max + pad))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Iterations")
        .draw()
        .map_err(plot_err)?;

    for (run_idx, run) in runs.iter().enumerate() {
        let color = color_for_index(run_idx);
        for (series_idx, series) in run.series.iter().enumerate() {
            let opacity = 1.0 / (1.0 + 0.7 * series_idx as f64);
            let style = color.mix(opacity).stroke_width(2);
            let points: Vec<(f64, f64)> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();
            let legend_style = style;
            chart
                .draw_series(LineSeries::new(points, style))
                .map_err(plot_err)?
                .label(format!("{}: {}", run.label, series.label))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], legend_style));
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

fn plot_err<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Plot(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(index: usize) -> (u8, u8, u8) {
        let c = color_for_index(index);
        (c.0, c.1, c.2)
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(rgb(0), rgb(10));
        assert_eq!(rgb(3), rgb(13));
    }

    #[test]
    fn test_palette_distinct_within_cycle() {
        for i in 0..10 {
            for j in (i + 1)..10 {
                assert_ne!(rgb(i), rgb(j));
            }
        }
    }

    #[test]
    fn test_value_bounds() {
        let runs = vec![RunTraces {
            label: "a".to_owned(),
            series: vec![
                TraceSeries { label: "alpha".to_owned(), values: vec![0.5, 0.7] },
                TraceSeries { label: "energy".to_owned(), values: vec![-3.0, -2.5] },
            ],
        }];
        assert_eq!(value_bounds(&runs), Some((-3.0, 0.7)));
        assert_eq!(longest_series(&runs), 2);
        assert_eq!(value_bounds(&[]), None);
    }

    #[test]
    fn test_render_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(matches!(
            render_traces(&path, "nothing", &[]),
            Err(AnalysisError::EmptyInput)
        ));
    }
}
