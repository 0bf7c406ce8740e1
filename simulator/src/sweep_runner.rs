//! Parallel sweep of the guard search over the eMBB load grid.
//!
//! Grid indices are dealt round-robin to a fixed pool of blocking workers.
//! Each worker owns its random stream and writes only the slots it was
//! dealt; the runner polls the progress counter, joins every worker and
//! only then reads the results back in index order.

use chrono::Local;
use guardchannel::analytic::urllc_only_loss;
use guardchannel::rng::worker_rng;
use guardchannel::{GuardOutcome, GuardSearch, ModelError, ModelParams};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimulatorConfig};
use crate::progress::{ProgressCounter, ProgressReporter};
use crate::results_table::ResultsTable;
use crate::simulation_results::{SweepRecord, SweepResults};
use crate::sweep_grid::SweepGrid;

/// How often the runner looks at the progress counter.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid model parameters: {0}")]
    Model(#[from] ModelError),
    #[error("grid index {index} out of range ({len} points)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("grid index {0} was written twice")]
    SlotAlreadyWritten(usize),
    #[error("grid index {0} has no result after all workers finished")]
    MissingResult(usize),
    #[error("results table still held by {0} other owner(s) after join")]
    TableStillShared(usize),
    #[error("worker {worker} did not complete: {source}")]
    Worker {
        worker: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Runs the whole sweep for one capacity.
///
/// Construction validates the configuration and fixes the base seed, so a
/// runner that exists can always be started. Each call to [`SweepRunner::run`]
/// spawns a fresh worker pool, and workers derive their random streams from
/// the base seed and their index.
pub struct SweepRunner {
    capacity: u32,
    config: SimulatorConfig,
    base_seed: u64,
    show_progress: bool,
    poll_interval: Duration,
}

impl SweepRunner {
    /// Validates the configuration and fixes the base seed of the run.
    pub fn new(capacity: u32, config: SimulatorConfig) -> Result<Self, SweepError> {
        config.validate()?;
        // Rejects a zero capacity before any worker starts.
        ModelParams::new(config.model.lambda_u, config.sweep.start, config.model.mu, capacity, 0)?;
        GuardSearch::new(config.search_config())?;
        let base_seed = config.sweep.seed.unwrap_or_else(rand::random);
        Ok(Self { capacity, config, base_seed, show_progress: true, poll_interval: POLL_INTERVAL })
    }

    pub fn with_progress(mut self, visible: bool) -> Self {
        self.show_progress = visible;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs the complete sweep and returns one record per grid point, in grid order.
    pub async fn run(&self) -> Result<SweepResults, SweepError> {
        let start_time = Instant::now();
        let grid = SweepGrid::from_parameters(&self.config.sweep);
        let total = grid.len();
        let num_workers = self.config.sweep.num_workers.min(total).max(1);
        let search = GuardSearch::new(self.config.search_config())?;

        self.log_sweep_start(&grid, num_workers);

        let table = Arc::new(ResultsTable::new(total));
        let counter = ProgressCounter::new();
        let mut reporter = ProgressReporter::new(total, self.show_progress);
        reporter.set_message(format!("S = {}", self.capacity));

        let mut handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let job = WorkerJob {
                worker_id,
                num_workers,
                grid: grid.clone(),
                capacity: self.capacity,
                lambda_u: self.config.model.lambda_u,
                mu: self.config.model.mu,
                search,
                base_seed: self.base_seed,
                table: Arc::clone(&table),
                counter: counter.clone(),
            };
            handles.push(tokio::task::spawn_blocking(move || job.run()));
        }

        // Reporting only; completion is decided by the worker handles.
        let mut ticker = tokio::time::interval(self.poll_interval);
        while !handles.iter().all(|h| h.is_finished()) {
            ticker.tick().await;
            reporter.poll(&counter);
        }
        reporter.poll(&counter);

        let mut first_error = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            let result = match handle.await {
                Ok(result) => result,
                Err(source) => Err(SweepError::Worker { worker, source }),
            };
            if let Err(e) = result {
                warn!(worker, error = %e, "sweep worker failed");
                first_error.get_or_insert(e);
            }
        }
        if let Some(e) = first_error {
            reporter.finish(format!("S = {}: failed", self.capacity));
            return Err(e);
        }

        let table = ResultsTable::reclaim(table)?;
        debug!(completed = table.completed(), total, "results table reclaimed");
        let outcomes = table.into_outcomes()?;
        reporter.finish(format!("S = {}: {}/{} load points", self.capacity, outcomes.len(), total));

        let records: Vec<SweepRecord> = outcomes
            .iter()
            .enumerate()
            .map(|(index, outcome)| {
                SweepRecord::from_outcome(grid.load_at(index), outcome, self.capacity, &self.config.model)
            })
            .collect();

        let results = SweepResults {
            capacity: self.capacity,
            base_seed: self.base_seed,
            num_workers,
            records,
            elapsed: start_time.elapsed(),
        };

        info!("=== Sweep Complete ===");
        info!(
            points = results.records.len(),
            infeasible = results.infeasible_points(),
            elapsed = ?results.elapsed,
            "sweep finished"
        );
        Ok(results)
    }

    fn log_sweep_start(&self, grid: &SweepGrid, num_workers: usize) {
        let model = &self.config.model;
        info!("=== Guard Channel Sweep ===");
        info!("Start Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        info!("Capacity S: {}", self.capacity);
        info!("lambda_u: {}, mu: {}, nb_iter: {}", model.lambda_u, model.mu, model.nb_iter);
        info!("Loss threshold: {}, trajectories per guard: {}", self.config.search.threshold, self.config.search.nb_sim);
        info!(
            "Load grid: {} points from {} to {} step {}",
            grid.len(),
            self.config.sweep.start,
            self.config.sweep.end,
            self.config.sweep.step
        );
        info!("Workers: {}, base seed: {}", num_workers, self.base_seed);
        info!("URLLC-only loss at G = 0: {:e}", urllc_only_loss(model.lambda_u, model.mu, self.capacity));
        info!("===========================");
    }
}

/// The share of the grid handled by one worker.
struct WorkerJob {
    worker_id: usize,
    num_workers: usize,
    grid: SweepGrid,
    capacity: u32,
    lambda_u: f64,
    mu: f64,
    search: GuardSearch,
    base_seed: u64,
    table: Arc<ResultsTable>,
    counter: ProgressCounter,
}

impl WorkerJob {
    // Consumes the job so its handle on the table is released on return.
    fn run(self) -> Result<(), SweepError> {
        let mut rng = worker_rng(self.base_seed, self.worker_id);
        for index in self.grid.indices_for_worker(self.worker_id, self.num_workers) {
            let lambda_e = self.grid.load_at(index);
            let load = ModelParams::new(self.lambda_u, lambda_e, self.mu, self.capacity, 0)?;
            let outcome = self.search.search(&load, &mut rng)?;
            self.log_point(lambda_e, &outcome, load.horizon(self.search.config().nb_iter));
            self.table.write(index, outcome)?;
            self.counter.increment();
        }
        Ok(())
    }

    fn log_point(&self, lambda_e: f64, outcome: &GuardOutcome, horizon: f64) {
        let stats = outcome.stats();
        match outcome {
            GuardOutcome::Found { guard, .. } => info!(
                worker = self.worker_id,
                "E={}, G={}, L={:e}, U={}, T={}, B={}, A={}, M={}, H={}",
                lambda_e,
                guard,
                stats.loss,
                stats.urllc_tot,
                stats.urllc_max,
                stats.embb_tot,
                stats.wait_avg,
                stats.wait_max,
                horizon
            ),
            GuardOutcome::Infeasible { last_guard, .. } => warn!(
                worker = self.worker_id,
                "E={}: no guard below S={} meets the threshold (loss {:e} at G={})",
                lambda_e,
                self.capacity,
                stats.loss,
                last_guard
            ),
        }
    }
}
