//! CSV and JSON output of a finished sweep.
//!
//! Both files are opened before the sweep starts so that an unwritable
//! destination fails fast instead of discarding hours of simulation. Opening
//! does not truncate: results of an earlier run stay on disk until the new
//! sweep has finished and [`ResultWriter::write`] replaces them.

use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::SimulatorConfig;
use crate::simulation_results::{SweepRecord, SweepResults};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("cannot prepare {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize sweep summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Open destinations of one sweep's results.
///
/// Created before the sweep so that permission or path problems surface
/// immediately. The handles are held untouched until [`ResultWriter::write`]
/// empties and rewrites them; dropping the writer leaves any existing files
/// as they were.
pub struct ResultWriter {
    csv_path: PathBuf,
    json_path: PathBuf,
    csv: File,
    json: File,
}

impl ResultWriter {
    /// Creates `dir` if needed and opens `S(<capacity>).csv` and `S(<capacity>).json` inside it.
    pub fn create(dir: impl AsRef<Path>, capacity: u32) -> Result<Self, OutputError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| OutputError::Open { path: dir.to_path_buf(), source })?;

        let csv_path = dir.join(format!("S({}).csv", capacity));
        let json_path = dir.join(format!("S({}).json", capacity));
        let csv = open_untruncated(&csv_path)?;
        let json = open_untruncated(&json_path)?;
        Ok(Self { csv_path, json_path, csv, json })
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    /// Replaces the contents of both files with the finished sweep.
    pub fn write(self, results: &SweepResults, config: &SimulatorConfig) -> Result<(), OutputError> {
        self.csv.set_len(0).map_err(|source| OutputError::Write { path: self.csv_path.clone(), source })?;
        self.json.set_len(0).map_err(|source| OutputError::Write { path: self.json_path.clone(), source })?;

        let mut csv = BufWriter::new(self.csv);
        write_csv(&mut csv, results)
            .and_then(|_| csv.flush())
            .map_err(|source| OutputError::Write { path: self.csv_path.clone(), source })?;
        info!("Saved sweep table to {}", self.csv_path.display());

        let summary = sweep_summary(results, config);
        let mut json = BufWriter::new(self.json);
        serde_json::to_writer_pretty(&mut json, &summary)?;
        json.flush().map_err(|source| OutputError::Write { path: self.json_path.clone(), source })?;
        info!("Saved sweep summary to {}", self.json_path.display());
        Ok(())
    }
}

fn open_untruncated(path: &Path) -> Result<File, OutputError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|source| OutputError::Open { path: path.to_path_buf(), source })
}

/// Splits a duration into whole hours, minutes and seconds.
pub fn hms(elapsed: Duration) -> (u64, u64, u64) {
    let secs = elapsed.as_secs();
    (secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub fn write_csv<W: Write>(out: &mut W, results: &SweepResults) -> std::io::Result<()> {
    let (h, m, s) = hms(results.elapsed);
    writeln!(
        out,
        "E;G;LoadE;PerG;Loss;WaitAvg;WaitMax;URLLC_Tot;URLLC_Max;eMBB_Tot;Horizon;;# {} hrs {} mins {} s",
        h, m, s
    )?;
    for record in &results.records {
        writeln!(out, "{}", csv_row(record))?;
    }
    Ok(())
}

fn opt_f64(value: Option<f64>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| format!("{:.6}", v))
}

pub fn csv_row(r: &SweepRecord) -> String {
    format!(
        "{};{};{};{};{:.6};{:.6};{:.6};{:.6};{:.6};{:.6};{:.6};",
        r.load,
        r.guard.map_or_else(|| "NA".to_string(), |g| g.to_string()),
        opt_f64(r.load_factor),
        opt_f64(r.guard_percent),
        r.loss,
        r.wait_avg,
        r.wait_max,
        r.urllc_tot,
        r.urllc_max,
        r.embb_tot,
        r.horizon
    )
}

pub fn sweep_summary(results: &SweepResults, config: &SimulatorConfig) -> serde_json::Value {
    json!({
        "sweep_summary": {
            "capacity": results.capacity,
            "lambda_u": config.model.lambda_u,
            "mu": config.model.mu,
            "nb_iter": config.model.nb_iter,
            "threshold": config.search.threshold,
            "nb_sim": config.search.nb_sim,
            "num_workers": results.num_workers,
            "seed": results.base_seed,
            "num_points": results.records.len(),
            "infeasible_points": results.infeasible_points(),
            "elapsed_seconds": results.elapsed.as_secs_f64(),
        },
        "individual_results": results.records,
    })
}
