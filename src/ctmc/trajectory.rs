//! Single sample path of the chain from the empty system to the horizon.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::sampler::TransitionSampler;
use crate::types::{EventKind, ModelError, ModelParams, State};

/// Statistics of one trajectory.
///
/// `loss` and `wait_avg` are time averages over the horizon; the counts and
/// maxima are raw.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryStats {
    /// Fraction of the horizon spent with every unit busy
    pub loss: f64,
    /// Time-averaged number of waiting eMBB units
    pub wait_avg: f64,
    /// Largest waiting backlog seen
    pub wait_max: u64,
    /// Admitted URLLC arrivals
    pub urllc_tot: u64,
    /// Largest URLLC occupancy reached by an arrival
    pub urllc_max: u32,
    /// eMBB arrivals admitted straight into service
    pub embb_tot: u64,
}

/// Runs trajectories for one parameter set.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySimulator {
    sampler: TransitionSampler,
    horizon: f64,
}

impl TrajectorySimulator {
    /// `nb_iter` is the expected number of transitions per trajectory.
    pub fn new(params: ModelParams, nb_iter: f64) -> Result<Self, ModelError> {
        if !nb_iter.is_finite() || nb_iter <= 0.0 {
            return Err(ModelError::InvalidSearch(format!("nb_iter must be positive, got {}", nb_iter)));
        }
        Ok(Self { sampler: TransitionSampler::new(params), horizon: params.horizon(nb_iter) })
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn params(&self) -> &ModelParams {
        self.sampler.params()
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> TrajectoryStats {
        let capacity = self.params().capacity();
        let horizon = self.horizon;

        let mut state = State::EMPTY;
        let mut elapsed = 0.0;
        let mut full_time = 0.0;
        let mut backlog_mass = 0.0;
        let mut stats = TrajectoryStats::default();
        let mut jumps: u64 = 0;

        loop {
            let jump = self.sampler.sample(state, rng);
            let end = elapsed + jump.holding_time;
            // Only the part of the last holding time before the horizon counts.
            let credited = if end >= horizon { horizon - elapsed } else { jump.holding_time };

            if state.is_full(capacity) {
                full_time += credited;
            }
            backlog_mass += state.x3 as f64 * credited;
            stats.wait_max = stats.wait_max.max(state.x3);

            match jump.event {
                EventKind::UrllcArrival => {
                    stats.urllc_tot += 1;
                    stats.urllc_max = stats.urllc_max.max(jump.next.x1);
                }
                EventKind::EmbbArrival => stats.embb_tot += 1,
                _ => {}
            }

            state = jump.next;
            elapsed = end;
            jumps += 1;
            if elapsed >= horizon {
                break;
            }
        }

        trace!(jumps, horizon, "trajectory finished");

        stats.loss = full_time / horizon;
        stats.wait_avg = backlog_mass / horizon;
        stats
    }
}
