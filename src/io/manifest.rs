//! Run manifests for multi-file reports.
//!
//! A sweep over simulator runs is described by a small YAML file instead of
//! paths hard-coded into the analysis:
//!
//! ```yaml
//! runs:
//!   - label: "1.0"
//!     path: data/N2/omega1_alpha0.98_beta0.43.csv
//!   - label: "0.5"
//!     path: data/N2/omega0.5_alpha0.97_beta0.38.csv
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One simulator run: a display label and the result file behind it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSpec {
    pub label: String,
    pub path: PathBuf,
}

/// An ordered list of runs to report together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub runs: Vec<RunSpec>,
}

/// Deserialize a manifest from a YAML file.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let manifest: Manifest = serde_yaml::from_reader(reader)?;
    Ok(manifest)
}
