//! Error types shared across the analysis crate.

use std::path::PathBuf;

/// Errors produced while loading result files or reducing sample series.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Fewer samples than the estimator can work with.
    #[error("need at least {min} samples, got {got}")]
    InsufficientData { got: usize, min: usize },

    /// A NaN or infinite sample in the input series.
    #[error("non-finite sample {value} at index {index}")]
    NonFiniteInput { index: usize, value: f64 },

    /// A named column is absent from a result file.
    #[error("column '{name}' not found in {path}; available: {found:?}")]
    MissingColumn {
        name: String,
        path: PathBuf,
        found: Vec<String>,
    },

    /// A cell that should hold a number does not parse as one.
    #[error("invalid value '{value}' in column '{column}' at record {record} of {path}")]
    InvalidValue {
        path: PathBuf,
        column: String,
        record: usize,
        value: String,
    },

    /// Paired columns of different lengths.
    #[error("column lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A reduction over zero rows.
    #[error("no rows to reduce")]
    EmptyInput,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
