pub mod analytic;
pub mod ctmc;
pub mod guard_search;
pub mod rng;
pub mod stats;
pub mod types;
pub mod utils;

pub use ctmc::{TrajectorySimulator, TrajectoryStats, TransitionSampler};
pub use guard_search::{GuardOutcome, GuardSearch, SearchConfig};
pub use stats::{AveragedStats, StatsAccumulator};
pub use types::{EventKind, ModelError, ModelParams, State};
