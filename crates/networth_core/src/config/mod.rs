//! Analysis configuration
//!
//! Every parameter struct deserializes with defaults for omitted fields, so a
//! YAML file only needs to name what differs from the documented constants.
//!
//! **Performance metrics** use `PerformanceConfig` (risk-free rate and the IRR
//! solver's iteration controls). **Simulation** uses `MonteCarloConfig`,
//! **projection** uses `FireConfig`, and **historical-parameter estimation**
//! uses `EstimationConfig`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

mod estimation;
mod projection;
mod simulation;

pub use estimation::{DEFAULT_BOND_RETURN, DEFAULT_EQUITY_RETURN, EstimationConfig};
pub use projection::FireConfig;
pub use simulation::{AssetAllocation, MonteCarloConfig, ReturnAssumption, ReturnDistribution};

/// Monthly returns at or beyond this magnitude are treated as artifacts of
/// contributions or withdrawals rather than market movement and discarded.
///
/// A fixed policy threshold, not a statistically derived bound.
pub const OUTLIER_RETURN_THRESHOLD: f64 = 0.50;

fn default_risk_free_rate() -> f64 {
    0.02
}

/// Controls for the Newton-Raphson money-weighted return solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSolverConfig {
    /// Starting annual rate for the iteration
    pub initial_guess: f64,
    pub max_iterations: usize,
    /// Converged once |NPV| falls below this
    pub tolerance: f64,
    /// Rate is never allowed below this (-0.99 = -99%)
    pub rate_floor: f64,
}

impl IrrSolverConfig {
    pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;
    pub const DEFAULT_RATE_FLOOR: f64 = -0.99;
}

impl Default for IrrSolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: Self::DEFAULT_INITIAL_GUESS,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
            rate_floor: Self::DEFAULT_RATE_FLOOR,
        }
    }
}

/// Parameters for the performance bundle and rolling windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Annual risk-free rate used for Sharpe ratios (fraction)
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    #[serde(default)]
    pub irr: IrrSolverConfig,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            irr: IrrSolverConfig::default(),
        }
    }
}

impl PerformanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "risk_free_rate",
                value: self.risk_free_rate,
                reason: "must be finite",
            });
        }
        if self.irr.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "irr.max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !(self.irr.tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "irr.tolerance",
                value: self.irr.tolerance,
                reason: "must be positive",
            });
        }
        if !(self.irr.rate_floor > -1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "irr.rate_floor",
                value: self.irr.rate_floor,
                reason: "must be greater than -100%",
            });
        }
        Ok(())
    }
}
