//! Monte Carlo trial and aggregate results

use serde::{Deserialize, Serialize};

use crate::config::MonteCarloConfig;

/// One Monte Carlo trial.
///
/// `path[0]` is the starting value; `path[y]` is the value at the end of year
/// `y`. A failed trial's path stops at its failure year with a final value of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub path: Vec<f64>,
    pub success: bool,
    /// 1-based year in which the portfolio was exhausted
    pub failure_year: Option<u32>,
}

impl SimulationRun {
    /// Value at the end of `year`, treating years after a failure as 0
    #[must_use]
    pub fn value_at(&self, year: usize) -> f64 {
        self.path.get(year).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn final_value(&self) -> f64 {
        if self.success {
            self.path.last().copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// Percentile band for one simulated year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub year: u32,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// One equal-width bucket of final portfolio values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// When failed trials ran out of money
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureStatistics {
    pub failed_trials: usize,
    pub earliest_failure_year: Option<u32>,
    pub latest_failure_year: Option<u32>,
    pub mean_failure_year: Option<f64>,
    pub median_failure_year: Option<f64>,
}

/// Aggregate over all Monte Carlo trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub num_trials: usize,
    /// Fraction of trials that never failed, 0.0..=1.0
    pub success_rate: f64,
    /// Median final value over successful trials only
    pub median_final_value: Option<f64>,
    pub percentile_bands: Vec<PercentileBand>,
    pub failure_statistics: FailureStatistics,
    pub histogram: Vec<HistogramBin>,
    /// Parameters the simulation actually ran with
    pub config: MonteCarloConfig,
}
