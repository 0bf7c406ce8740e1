//! Reference run configuration.

/// URLLC arrival rate
pub const LAMBDA_U: f64 = 500.0;

/// Per-unit service rate
pub const MU: f64 = 1.0;

/// Expected number of transitions per trajectory
pub const NB_ITER: f64 = 5e4;

/// Loss probability the guard search must reach
pub const LOSS_THRESHOLD: f64 = 1e-5;

/// Trajectories averaged per guard candidate
pub const NB_SIM: usize = 50_000;

/// Number of sweep workers
pub const NUM_WORKERS: usize = 64;

/// eMBB load grid: start, end (inclusive) and step
pub const LOAD_START: f64 = 0.0;
pub const LOAD_END: f64 = 1250.0;
pub const LOAD_STEP: f64 = 5.0;
