//! Console reports over reduced observables.
//!
//! Each report mirrors one of the recurring summaries made from simulator
//! output: a blocking table per energy series, the omega-sweep table of
//! column means, the minimum-energy parameter lookup, and mean wall-clock
//! times. Rendering returns a `String` so the tables are testable; the
//! binary just prints them.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::io;
use crate::stats::{block, mean, standard_error, variance, BlockingEstimate};

/// Sweep-table observable columns as the simulator names them.
pub const ENERGY_COLUMN: &str = "energy[au]";
const KINETIC_COLUMN: &str = "kinetic";
const VARIANCE_COLUMN: &str = "variance";
const ACCEPTANCE_COLUMN: &str = "acceptance_rate";
const DISTANCE_COLUMN: &str = "avg_distance";

/// Summary of one numeric column of one run.
#[derive(Clone, Debug)]
pub struct ColumnReport {
    pub label: String,
    pub n_samples: usize,
    pub mean: f64,
    /// Sample variance of the series itself.
    pub variance: f64,
    /// Naive i.i.d. standard error of the mean.
    pub std_error: f64,
    /// Autocorrelation-corrected estimate.
    pub blocking: BlockingEstimate,
}

impl ColumnReport {
    pub fn from_samples(label: &str, samples: &[f64]) -> Result<Self> {
        let blocking = block(samples)?;
        Ok(Self {
            label: label.to_owned(),
            n_samples: samples.len(),
            mean: mean(samples),
            variance: variance(samples),
            std_error: standard_error(samples),
            blocking,
        })
    }
}

/// Render column summaries as an aligned table, one row per series.
pub fn render_reports(reports: &[ColumnReport]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:<28} {:>10} {:>14} {:>12} {:>12} {:>12}  {}",
        "run", "n", "mean", "variance", "naive_err", "block_err", "blocks"
    )
    .expect("write to string");
    for r in reports {
        let flag = if r.blocking.converged { "" } else { " (no plateau)" };
        writeln!(
            out,
            "{:<28} {:>10} {:>14.6} {:>12.6} {:>12.6} {:>12.6}  2^{}{}",
            r.label,
            r.n_samples,
            r.mean,
            r.variance,
            r.std_error,
            r.blocking.std_error,
            r.blocking.level,
            flag
        )
        .expect("write to string");
    }
    out
}

/// One row of the omega-sweep table: column means plus blocking on energy.
#[derive(Clone, Debug)]
pub struct SweepRow {
    pub label: String,
    pub energy: BlockingEstimate,
    pub kinetic: f64,
    pub variance: f64,
    pub acceptance: f64,
    pub distance: Option<f64>,
}

impl SweepRow {
    /// Reduce one result file to a sweep row. `with_distance` additionally
    /// averages the `avg_distance` column (absent in runs with a Jastrow
    /// factor).
    pub fn from_table(label: &str, path: &Path, with_distance: bool) -> Result<Self> {
        let mut names = vec![ENERGY_COLUMN, KINETIC_COLUMN, VARIANCE_COLUMN, ACCEPTANCE_COLUMN];
        if with_distance {
            names.push(DISTANCE_COLUMN);
        }
        let columns = io::read_columns(path, &names)?;

        Ok(Self {
            label: label.to_owned(),
            energy: block(&columns[0])?,
            kinetic: mean(&columns[1]),
            variance: mean(&columns[2]),
            acceptance: mean(&columns[3]),
            distance: columns.get(4).map(|c| mean(c)),
        })
    }
}

/// Render the sweep table in the omega / energy / kinetic / variance /
/// acceptance layout, with the blocking error alongside the energy.
pub fn render_sweep(rows: &[SweepRow], with_distance: bool) -> String {
    let mut out = String::new();
    write!(
        out,
        "{:<8} {:>12} {:>12} {:>10} {:>10} {:>8}",
        "omega", "energy[au]", "block_err", "kinetic", "variance", "accept"
    )
    .expect("write to string");
    if with_distance {
        write!(out, " {:>10}", "dist").expect("write to string");
    }
    out.push('\n');

    for row in rows {
        write!(
            out,
            "{:<8} {:>12.6} {:>12.6} {:>10.6} {:>10.6} {:>8.4}",
            row.label,
            row.energy.mean,
            row.energy.std_error,
            row.kinetic,
            row.variance,
            row.acceptance
        )
        .expect("write to string");
        if let Some(distance) = row.distance {
            write!(out, " {:>10.6}", distance).expect("write to string");
        }
        out.push('\n');
    }
    out
}

/// Lowest energy in a parameter scan and the variational parameters at it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimumReport {
    pub energy: f64,
    pub alpha: f64,
    pub beta: f64,
    pub index: usize,
}

impl MinimumReport {
    /// Locate the minimum-energy row of a scan. NaN energies never win.
    pub fn locate(energies: &[f64], alphas: &[f64], betas: &[f64]) -> Result<Self> {
        if energies.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        for other in [alphas.len(), betas.len()] {
            if other != energies.len() {
                return Err(AnalysisError::LengthMismatch {
                    left: energies.len(),
                    right: other,
                });
            }
        }

        let mut index = 0;
        let mut best = f64::INFINITY;
        for (i, &e) in energies.iter().enumerate() {
            if e < best {
                best = e;
                index = i;
            }
        }

        Ok(Self {
            energy: energies[index],
            alpha: alphas[index],
            beta: betas[index],
            index,
        })
    }
}

/// Render the minimum-energy report in the parameter-scan layout.
pub fn render_minimum(label: &str, minimum: &MinimumReport) -> String {
    format!(
        "{:<28} energy_min[au]: {:>10.4}   alpha: {:>8.3}   beta: {:>8.3}   (row {})\n",
        label, minimum.energy, minimum.alpha, minimum.beta, minimum.index
    )
}

/// Mean wall-clock time of one run.
#[derive(Clone, Debug)]
pub struct TimingReport {
    pub label: String,
    pub mean_time: f64,
    pub n_samples: usize,
}

impl TimingReport {
    pub fn from_samples(label: &str, times: &[f64]) -> Result<Self> {
        if times.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        Ok(Self {
            label: label.to_owned(),
            mean_time: mean(times),
            n_samples: times.len(),
        })
    }
}

/// Render mean times, one row per run.
pub fn render_timings(reports: &[TimingReport]) -> String {
    let mut out = String::from("Average time:\n");
    for r in reports {
        writeln!(out, "{:<40} {:>12.6} s  ({} rows)", r.label, r.mean_time, r.n_samples)
            .expect("write to string");
    }
    out
}
