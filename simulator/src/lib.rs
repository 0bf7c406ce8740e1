pub mod config;
pub mod progress;
pub mod results_table;
pub mod save_results;
pub mod simulation_results;
pub mod sweep_grid;
pub mod sweep_runner;

pub use config::{ConfigError, SimulatorConfig};
pub use save_results::{OutputError, ResultWriter};
pub use simulation_results::{SweepRecord, SweepResults};
pub use sweep_grid::SweepGrid;
pub use sweep_runner::{SweepError, SweepRunner};
