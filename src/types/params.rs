use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("guard channels ({guard}) exceed capacity ({capacity})")]
    GuardExceedsCapacity { guard: u32, capacity: u32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("service rate mu must be finite and positive, got {0}")]
    InvalidServiceRate(f64),
    #[error("total offered rate lambda_u + lambda_e must be positive")]
    NoOfferedTraffic,
    #[error("invalid search configuration: {0}")]
    InvalidSearch(String),
}

/// Rates and dimensions of one chain instance.
///
/// Built through [`ModelParams::new`], which rejects any combination for
/// which some state would have no enabled transition or the trajectory
/// horizon would be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParams {
    lambda_u: f64,
    lambda_e: f64,
    mu: f64,
    capacity: u32,
    guard: u32,
}

impl ModelParams {
    pub fn new(lambda_u: f64, lambda_e: f64, mu: f64, capacity: u32, guard: u32) -> Result<Self, ModelError> {
        if capacity == 0 {
            return Err(ModelError::ZeroCapacity);
        }
        if guard > capacity {
            return Err(ModelError::GuardExceedsCapacity { guard, capacity });
        }
        check_rate("lambda_u", lambda_u)?;
        check_rate("lambda_e", lambda_e)?;
        if !mu.is_finite() || mu <= 0.0 {
            return Err(ModelError::InvalidServiceRate(mu));
        }
        if lambda_u + lambda_e <= 0.0 {
            return Err(ModelError::NoOfferedTraffic);
        }
        Ok(Self { lambda_u, lambda_e, mu, capacity, guard })
    }

    /// Same load point with a different number of guard channels.
    pub fn with_guard(&self, guard: u32) -> Result<Self, ModelError> {
        Self::new(self.lambda_u, self.lambda_e, self.mu, self.capacity, guard)
    }

    pub fn lambda_u(&self) -> f64 {
        self.lambda_u
    }

    pub fn lambda_e(&self) -> f64 {
        self.lambda_e
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn guard(&self) -> u32 {
        self.guard
    }

    /// Occupancy below which an eMBB arrival goes straight into service.
    pub fn embb_limit(&self) -> u32 {
        self.capacity - self.guard
    }

    /// Simulated time budget of one trajectory.
    ///
    /// Normalized by the total offered rate so that the expected number of
    /// transitions stays close to `nb_iter` whatever the eMBB load.
    pub fn horizon(&self, nb_iter: f64) -> f64 {
        nb_iter / (self.lambda_e + self.lambda_u)
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::InvalidRate { name, value });
    }
    Ok(())
}
