use guardchannel::{AveragedStats, GuardOutcome};
use serde::Serialize;
use std::time::Duration;

use crate::config::ModelConfig;

/// One output row: the guard search answer for a single eMBB load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRecord {
    /// eMBB arrival rate of this grid point
    pub load: f64,
    pub feasible: bool,
    /// Selected number of guard channels, `None` when no G < S met the threshold
    pub guard: Option<u32>,
    /// Guard value the statistics below were measured at
    pub evaluated_guard: u32,
    /// load / (mu * (S - G))
    pub load_factor: Option<f64>,
    /// 100 * G / S
    pub guard_percent: Option<f64>,
    pub loss: f64,
    pub wait_avg: f64,
    pub wait_max: f64,
    pub urllc_tot: f64,
    pub urllc_max: f64,
    pub embb_tot: f64,
    /// Trajectory horizon used at this load
    pub horizon: f64,
}

impl SweepRecord {
    pub fn from_outcome(load: f64, outcome: &GuardOutcome, capacity: u32, model: &ModelConfig) -> Self {
        let stats: &AveragedStats = outcome.stats();
        let (guard, evaluated_guard) = match *outcome {
            GuardOutcome::Found { guard, .. } => (Some(guard), guard),
            GuardOutcome::Infeasible { last_guard, .. } => (None, last_guard),
        };
        let s = capacity as f64;
        Self {
            load,
            feasible: outcome.is_feasible(),
            guard,
            evaluated_guard,
            load_factor: guard.map(|g| load / (model.mu * (s - g as f64))),
            guard_percent: guard.map(|g| g as f64 / s * 100.0),
            loss: stats.loss,
            wait_avg: stats.wait_avg,
            wait_max: stats.wait_max,
            urllc_tot: stats.urllc_tot,
            urllc_max: stats.urllc_max,
            embb_tot: stats.embb_tot,
            horizon: model.nb_iter / (load + model.lambda_u),
        }
    }
}

/// Everything a finished sweep hands to the output stage.
#[derive(Debug, Clone)]
pub struct SweepResults {
    pub capacity: u32,
    pub base_seed: u64,
    pub num_workers: usize,
    /// One record per grid point, ascending load
    pub records: Vec<SweepRecord>,
    pub elapsed: Duration,
}

impl SweepResults {
    pub fn infeasible_points(&self) -> usize {
        self.records.iter().filter(|r| !r.feasible).count()
    }
}
