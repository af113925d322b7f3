use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Mean and volatility of annual returns for one asset class (fractions)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnAssumption {
    pub mean: f64,
    pub volatility: f64,
}

impl ReturnAssumption {
    #[must_use]
    pub const fn new(mean: f64, volatility: f64) -> Self {
        Self { mean, volatility }
    }
}

/// Equity/bond split in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub equity_pct: f64,
    pub bond_pct: f64,
}

impl Default for AssetAllocation {
    fn default() -> Self {
        Self {
            equity_pct: 60.0,
            bond_pct: 40.0,
        }
    }
}

impl AssetAllocation {
    const SUM_TOLERANCE: f64 = 1e-6;

    /// Weighted portfolio return for one year's per-class returns
    #[inline]
    #[must_use]
    pub fn blend(&self, equity_return: f64, bond_return: f64) -> f64 {
        (self.equity_pct * equity_return + self.bond_pct * bond_return) / 100.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("allocation.equity_pct", self.equity_pct),
            ("allocation.bond_pct", self.bond_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "must be between 0 and 100",
                });
            }
        }
        if (self.equity_pct + self.bond_pct - 100.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::AllocationMismatch {
                equity_pct: self.equity_pct,
                bond_pct: self.bond_pct,
            });
        }
        Ok(())
    }
}

/// Shape of the per-year return draws
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReturnDistribution {
    /// Gaussian draws via the Box-Muller transform
    #[default]
    Normal,
    /// Fat-tailed Student's t, rescaled so its standard deviation matches the
    /// configured volatility. Requires `df > 2`.
    StudentT { df: f64 },
}

fn default_years() -> u32 {
    30
}

fn default_num_trials() -> usize {
    1_000
}

fn default_inflation_rate() -> f64 {
    0.03
}

fn default_seed() -> u64 {
    42
}

fn default_true() -> bool {
    true
}

fn default_equity() -> ReturnAssumption {
    super::DEFAULT_EQUITY_RETURN
}

fn default_bond() -> ReturnAssumption {
    super::DEFAULT_BOND_RETURN
}

/// Withdrawal-phase Monte Carlo parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    pub initial_value: f64,
    /// Number of withdrawal years to simulate
    #[serde(default = "default_years")]
    pub years: u32,
    pub annual_withdrawal: f64,
    /// Scale each year's withdrawal by cumulative inflation
    #[serde(default = "default_true")]
    pub inflation_adjusted: bool,
    #[serde(default)]
    pub allocation: AssetAllocation,
    #[serde(default = "default_equity")]
    pub equity: ReturnAssumption,
    #[serde(default = "default_bond")]
    pub bond: ReturnAssumption,
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,
    #[serde(default = "default_num_trials")]
    pub num_trials: usize,
    /// Base seed; identical seeds reproduce identical results
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub distribution: ReturnDistribution,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            initial_value: 1_000_000.0,
            years: default_years(),
            annual_withdrawal: 40_000.0,
            inflation_adjusted: true,
            allocation: AssetAllocation::default(),
            equity: default_equity(),
            bond: default_bond(),
            inflation_rate: default_inflation_rate(),
            num_trials: default_num_trials(),
            seed: default_seed(),
            distribution: ReturnDistribution::Normal,
        }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_trials == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "num_trials",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.years == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "years",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        for (name, value) in [
            ("initial_value", self.initial_value),
            ("annual_withdrawal", self.annual_withdrawal),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if !self.inflation_rate.is_finite() || self.inflation_rate <= -1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "inflation_rate",
                value: self.inflation_rate,
                reason: "must be finite and greater than -100%",
            });
        }
        self.allocation.validate()?;
        for (kind, assumption) in [("equity", self.equity), ("bond", self.bond)] {
            if !assumption.mean.is_finite()
                || !assumption.volatility.is_finite()
                || assumption.volatility < 0.0
            {
                return Err(ConfigError::InvalidDistribution {
                    kind,
                    mean: assumption.mean,
                    std_dev: assumption.volatility,
                    reason: "volatility must be non-negative and finite",
                });
            }
        }
        if let ReturnDistribution::StudentT { df } = self.distribution
            && !(df > 2.0 && df.is_finite())
        {
            return Err(ConfigError::InvalidParameter {
                name: "distribution.df",
                value: df,
                reason: "degrees of freedom must be finite and greater than 2",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MonteCarloConfig::default().validate().is_ok());
    }

    #[test]
    fn test_allocation_must_sum_to_100() {
        let config = MonteCarloConfig {
            allocation: AssetAllocation {
                equity_pct: 70.0,
                bond_pct: 20.0,
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AllocationMismatch {
                equity_pct: 70.0,
                bond_pct: 20.0
            })
        );
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = MonteCarloConfig {
            num_trials: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_student_t_requires_finite_variance() {
        let config = MonteCarloConfig {
            distribution: ReturnDistribution::StudentT { df: 2.0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blend_weights_by_percent() {
        let allocation = AssetAllocation {
            equity_pct: 75.0,
            bond_pct: 25.0,
        };
        assert!((allocation.blend(0.08, 0.04) - 0.07).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let config: MonteCarloConfig =
            serde_json::from_str(r#"{"initial_value":500000,"annual_withdrawal":20000}"#)
                .unwrap();
        assert_eq!(config.years, 30);
        assert_eq!(config.num_trials, 1_000);
        assert!(config.inflation_adjusted);
        assert_eq!(config.distribution, ReturnDistribution::Normal);
    }
}
