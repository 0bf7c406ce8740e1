pub mod sampler;
pub mod trajectory;

pub use sampler::{Candidate, EnabledEvents, Jump, TransitionSampler};
pub use trajectory::{TrajectorySimulator, TrajectoryStats};
