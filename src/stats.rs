//! Averaging of trajectory statistics across independent runs.

use serde::{Deserialize, Serialize};

use crate::ctmc::TrajectoryStats;

/// Arithmetic mean of every [`TrajectoryStats`] field over a batch of trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AveragedStats {
    pub loss: f64,
    pub wait_avg: f64,
    pub wait_max: f64,
    pub urllc_tot: f64,
    pub urllc_max: f64,
    pub embb_tot: f64,
}

/// Running sums used to build an [`AveragedStats`].
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    sums: AveragedStats,
    count: usize,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, run: &TrajectoryStats) {
        self.sums.loss += run.loss;
        self.sums.wait_avg += run.wait_avg;
        self.sums.wait_max += run.wait_max as f64;
        self.sums.urllc_tot += run.urllc_tot as f64;
        self.sums.urllc_max += run.urllc_max as f64;
        self.sums.embb_tot += run.embb_tot as f64;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Means of the recorded runs; all zero if nothing was recorded.
    pub fn mean(&self) -> AveragedStats {
        if self.count == 0 {
            return AveragedStats::default();
        }
        let n = self.count as f64;
        AveragedStats {
            loss: self.sums.loss / n,
            wait_avg: self.sums.wait_avg / n,
            wait_max: self.sums.wait_max / n,
            urllc_tot: self.sums.urllc_tot / n,
            urllc_max: self.sums.urllc_max / n,
            embb_tot: self.sums.embb_tot / n,
        }
    }
}
