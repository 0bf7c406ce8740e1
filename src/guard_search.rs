//! Smallest number of guard channels meeting a loss target at one load point.
//!
//! Candidates are tried upwards from G = 0. For each candidate, `nb_sim`
//! trajectories are averaged and the search stops at the first G whose mean
//! loss is at or below the threshold. G = S is never tried: with every unit
//! reserved no eMBB arrival can enter service, so the search reports the
//! load point as infeasible once G = S - 1 has failed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ctmc::TrajectorySimulator;
use crate::stats::{AveragedStats, StatsAccumulator};
use crate::types::{ModelError, ModelParams};

/// Monte Carlo effort and target of a guard search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Trajectories averaged per candidate
    pub nb_sim: usize,
    /// Expected transitions per trajectory
    pub nb_iter: f64,
    /// Loss probability to reach
    pub threshold: f64,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.nb_sim == 0 {
            return Err(ModelError::InvalidSearch("nb_sim must be at least 1".into()));
        }
        if !self.nb_iter.is_finite() || self.nb_iter <= 0.0 {
            return Err(ModelError::InvalidSearch(format!("nb_iter must be positive, got {}", self.nb_iter)));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ModelError::InvalidSearch(format!(
                "threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Answer for one load point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GuardOutcome {
    /// `guard` is the first candidate whose mean loss met the threshold.
    Found { guard: u32, stats: AveragedStats },
    /// No candidate below capacity met the threshold; `stats` belong to `last_guard`.
    Infeasible { last_guard: u32, stats: AveragedStats },
}

impl GuardOutcome {
    pub fn guard(&self) -> Option<u32> {
        match self {
            GuardOutcome::Found { guard, .. } => Some(*guard),
            GuardOutcome::Infeasible { .. } => None,
        }
    }

    pub fn stats(&self) -> &AveragedStats {
        match self {
            GuardOutcome::Found { stats, .. } | GuardOutcome::Infeasible { stats, .. } => stats,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, GuardOutcome::Found { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GuardSearch {
    config: SearchConfig,
}

impl GuardSearch {
    pub fn new(config: SearchConfig) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Mean statistics of `nb_sim` independent trajectories at `params`.
    pub fn average_at<R: Rng + ?Sized>(&self, params: ModelParams, rng: &mut R) -> Result<AveragedStats, ModelError> {
        let simulator = TrajectorySimulator::new(params, self.config.nb_iter)?;
        let mut acc = StatsAccumulator::new();
        for _ in 0..self.config.nb_sim {
            acc.record(&simulator.run(rng));
        }
        trace!(runs = acc.count(), guard = params.guard(), "averaged trajectories");
        Ok(acc.mean())
    }

    /// Runs the search for the load point `load`; its own guard value is ignored.
    pub fn search<R: Rng + ?Sized>(&self, load: &ModelParams, rng: &mut R) -> Result<GuardOutcome, ModelError> {
        let mut last = None;
        for guard in 0..load.capacity() {
            let stats = self.average_at(load.with_guard(guard)?, rng)?;
            debug!(
                lambda_e = load.lambda_e(),
                guard,
                loss = stats.loss,
                threshold = self.config.threshold,
                "evaluated guard candidate"
            );
            if stats.loss <= self.config.threshold {
                return Ok(GuardOutcome::Found { guard, stats });
            }
            last = Some((guard, stats));
        }
        // capacity >= 1, so at least G = 0 was evaluated
        let (last_guard, stats) = last.unwrap_or_default();
        Ok(GuardOutcome::Infeasible { last_guard, stats })
    }
}
