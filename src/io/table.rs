//! Column extraction from simulator CSV output.
//!
//! The simulator writes one CSV file per run with a header row naming the
//! observables (`energy[au]`, `kinetic`, `variance`, `acceptance_rate`,
//! `avg_distance`, ...). Analysis consumes one column at a time as a flat
//! numeric series; rows are discarded once reduced.

use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Read one named column of a result file as a numeric series.
pub fn read_column(path: &Path, column: &str) -> Result<Vec<f64>> {
    let mut columns = read_columns(path, &[column])?;
    Ok(columns.pop().unwrap_or_default())
}

/// Read several named columns of a result file in a single pass.
///
/// The returned series are in the order the names were given, all of equal
/// length. Missing headers and unparseable cells are reported with the file
/// path and, for cells, the 1-indexed data record.
pub fn read_columns(path: &Path, columns: &[&str]) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    let indices: Vec<usize> = columns
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AnalysisError::MissingColumn {
                    name: (*name).to_owned(),
                    path: path.to_owned(),
                    found: headers.clone(),
                })
        })
        .collect::<Result<_>>()?;

    let mut series: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for (record_idx, record) in reader.records().enumerate() {
        let record = record?;
        for (slot, (&col_idx, &name)) in indices.iter().zip(columns).enumerate() {
            let cell = record.get(col_idx).unwrap_or("");
            let value: f64 = cell.parse().map_err(|_| AnalysisError::InvalidValue {
                path: path.to_owned(),
                column: name.to_owned(),
                record: record_idx + 1,
                value: cell.to_owned(),
            })?;
            series[slot].push(value);
        }
    }
    Ok(series)
}
