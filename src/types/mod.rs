pub mod constants;
pub mod params;
pub mod state;

pub use params::{ModelError, ModelParams};
pub use state::{EventKind, State};
