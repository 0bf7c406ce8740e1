//! Configuration loader and validator for the guard-channel sweep.
//! Defaults reproduce the reference run; a TOML file may override any field.

use guardchannel::types::constants;
use guardchannel::SearchConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Complete configuration of a sweep, apart from the capacity which comes from the command line.
///
/// Every section and field falls back to the reference run when it is missing
/// from the TOML file, so an empty file is a valid configuration. The struct is
/// validated as a whole by [`SimulatorConfig::validate`] before a sweep starts.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Traffic and trajectory parameters shared by every load point
    pub model: ModelConfig,
    /// Guard search effort and target
    pub search: SearchSettings,
    /// Load grid and worker pool
    pub sweep: SweepParameters,
}

/// Parameters of the chain that do not vary across the sweep.
///
/// The URLLC arrival rate and the per-unit service rate are fixed for the
/// whole run; only the eMBB arrival rate moves along the grid. `nb_iter` sets
/// the trajectory horizon as `nb_iter / (lambda_e + lambda_u)`, so it is the
/// expected number of transitions of each simulated path.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// URLLC arrival rate
    pub lambda_u: f64,
    /// Per-unit service rate
    pub mu: f64,
    /// Expected number of transitions per trajectory
    pub nb_iter: f64,
}

/// Guard search settings.
///
/// At each load point the search tries guard values upwards from zero and
/// averages `nb_sim` trajectories per candidate. The first candidate whose
/// mean loss is at or below `threshold` is the answer for that point.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Loss probability each load point must reach
    pub threshold: f64,
    /// Trajectories averaged per guard candidate
    pub nb_sim: usize,
}

/// Load grid and parallelism.
///
/// The grid runs from `start` to `end` inclusive in increments of `step` and
/// its indices are dealt round-robin to `num_workers` workers. A fixed `seed`
/// makes a run reproducible for the same worker count; without one a seed is
/// drawn at start-up and recorded in the JSON summary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SweepParameters {
    /// First eMBB arrival rate of the grid
    pub start: f64,
    /// Last eMBB arrival rate of the grid (inclusive)
    pub end: f64,
    /// Grid spacing
    pub step: f64,
    /// Number of workers sharing the grid
    pub num_workers: usize,
    /// Base seed of the worker streams; drawn at random when absent
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { lambda_u: constants::LAMBDA_U, mu: constants::MU, nb_iter: constants::NB_ITER }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { threshold: constants::LOSS_THRESHOLD, nb_sim: constants::NB_SIM }
    }
}

impl Default for SweepParameters {
    fn default() -> Self {
        Self {
            start: constants::LOAD_START,
            end: constants::LOAD_END,
            step: constants::LOAD_STEP,
            num_workers: constants::NUM_WORKERS,
            seed: None,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

fn ensure(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(message.into()))
    }
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl SimulatorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.model;
        ensure(m.lambda_u.is_finite() && m.lambda_u >= 0.0, "lambda_u must be finite and non-negative")?;
        ensure(m.mu.is_finite() && m.mu > 0.0, "mu must be positive")?;
        ensure(m.nb_iter.is_finite() && m.nb_iter > 0.0, "nb_iter must be positive")?;

        let s = &self.search;
        ensure(s.threshold.is_finite() && s.threshold >= 0.0, "threshold must be finite and non-negative")?;
        ensure(s.nb_sim >= 1, "nb_sim must be at least 1")?;

        let w = &self.sweep;
        ensure(w.step.is_finite() && w.step > 0.0, "step must be positive")?;
        ensure(w.start.is_finite() && w.start >= 0.0, "start must be non-negative")?;
        ensure(w.end.is_finite() && w.end >= w.start, "end must not be below start")?;
        ensure(w.num_workers >= 1, "num_workers must be at least 1")?;
        ensure(m.lambda_u + w.start > 0.0, "lambda_u and the first load cannot both be zero")?;
        Ok(())
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig { nb_sim: self.search.nb_sim, nb_iter: self.model.nb_iter, threshold: self.search.threshold }
    }
}
