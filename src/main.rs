use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use vmc_analysis::report::{self, ColumnReport, MinimumReport, SweepRow, TimingReport};
use vmc_analysis::{read_column, read_columns, read_manifest, render_traces, RunTraces, TraceSeries};

#[derive(Parser, Debug)]
#[command(version, about = "Summaries and plots for VMC simulator output", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blocking-corrected summary of one column per result file
    Report {
        /// Column to reduce
        #[arg(short, long, default_value = "energy")]
        column: String,
        /// Result files, one row per file
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Omega-sweep table of column means over a run manifest
    Sweep {
        /// YAML manifest listing labels and result files
        #[arg(short, long, default_value = "sweep.yml")]
        config: PathBuf,
        /// Also average the avg_distance column
        #[arg(long)]
        distance: bool,
    },
    /// Minimum energy of a parameter scan and the parameters at it
    Minimum {
        /// Energy column of the scan
        #[arg(short, long, default_value = "energy")]
        column: String,
        file: PathBuf,
    },
    /// Mean wall-clock time per result file
    Times {
        #[arg(short, long, default_value = "time[s]")]
        column: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Plot per-iteration parameter and energy traces
    Trace {
        /// Output PNG path
        #[arg(short, long, default_value = "traces.png")]
        output: PathBuf,
        /// Columns to trace from each file
        #[arg(short, long, default_values_t = [
            "alpha".to_owned(),
            "beta".to_owned(),
            "energy-per-particle[au]".to_owned(),
        ])]
        columns: Vec<String>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> vmc_analysis::Result<()> {
    match command {
        Command::Report { column, files } => {
            let mut reports = Vec::with_capacity(files.len());
            for file in &files {
                let samples = read_column(file, &column)?;
                reports.push(ColumnReport::from_samples(&file.display().to_string(), &samples)?);
            }
            print!("{}", report::render_reports(&reports));
        }
        Command::Sweep { config, distance } => {
            let manifest = read_manifest(&config)?;
            let mut rows = Vec::with_capacity(manifest.runs.len());
            for run in &manifest.runs {
                rows.push(SweepRow::from_table(&run.label, &run.path, distance)?);
            }
            print!("{}", report::render_sweep(&rows, distance));
        }
        Command::Minimum { column, file } => {
            let columns = read_columns(&file, &[&column, "alpha", "beta"])?;
            let minimum = MinimumReport::locate(&columns[0], &columns[1], &columns[2])?;
            print!("{}", report::render_minimum(&file.display().to_string(), &minimum));
        }
        Command::Times { column, files } => {
            let mut reports = Vec::with_capacity(files.len());
            for file in &files {
                let times = read_column(file, &column)?;
                reports.push(TimingReport::from_samples(&file.display().to_string(), &times)?);
            }
            print!("{}", report::render_timings(&reports));
        }
        Command::Trace { output, columns, files } => {
            let mut runs = Vec::with_capacity(files.len());
            for file in &files {
                let names: Vec<&str> = columns.iter().map(String::as_str).collect();
                let values = read_columns(file, &names)?;
                let series = columns
                    .iter()
                    .zip(values)
                    .map(|(label, values)| TraceSeries { label: label.clone(), values })
                    .collect();
                runs.push(RunTraces {
                    label: file.display().to_string(),
                    series,
                });
            }
            render_traces(&output, "Optimization traces", &runs)?;
            println!("Saved traces to {}", output.display());
        }
    }
    Ok(())
}
