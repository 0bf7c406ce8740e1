//! eMBB load grid and its static split across workers.

use crate::config::SweepParameters;

/// Ordered eMBB arrival rates `start, start + step, ..., <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    start: f64,
    step: f64,
    len: usize,
}

impl SweepGrid {
    /// Tolerance on the last point so that `end` is kept despite rounding.
    const END_SLACK: f64 = 1e-9;

    /// Expects validated parameters (`step > 0`, `end >= start`).
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        let span = ((end - start) / step + Self::END_SLACK).floor();
        Self { start, step, len: span as usize + 1 }
    }

    pub fn from_parameters(params: &SweepParameters) -> Self {
        Self::new(params.start, params.end, params.step)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Load value of grid index `index`.
    pub fn load_at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    pub fn loads(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.load_at(i))
    }

    /// Indices owned by `worker_id`: round-robin on index modulo `num_workers`.
    pub fn indices_for_worker(&self, worker_id: usize, num_workers: usize) -> impl Iterator<Item = usize> {
        (worker_id..self.len).step_by(num_workers.max(1))
    }
}
