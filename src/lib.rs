//! VMC Analysis - post-processing for Variational Monte Carlo results.
//!
//! This crate reduces the CSV output of a VMC simulator to summary
//! statistics, corrects energy uncertainties for Metropolis autocorrelation
//! with the blocking method, and renders console tables and trace plots.

pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod stats;

// Re-export commonly used types at crate root
pub use error::{AnalysisError, Result};
pub use io::{read_column, read_columns, read_manifest, Manifest, RunSpec};
pub use plot::{color_for_index, render_traces, RunTraces, TraceSeries};
pub use report::{
    render_minimum, render_reports, render_sweep, render_timings, ColumnReport, MinimumReport,
    SweepRow, TimingReport,
};
pub use stats::{block, mean, standard_error, std_dev, variance, variance_population, BlockingEstimate};
