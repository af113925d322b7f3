//! Annual return samplers.

use std::f64::consts::TAU;

use rand::Rng;
use rand::distr::{Distribution, Open01};

use crate::config::{AssetAllocation, ReturnAssumption, ReturnDistribution};
use crate::error::ConfigError;

/// Standard normal variate from two uniforms in the open interval (0, 1).
///
/// `z = sqrt(-2 ln u1) * cos(2 pi u2)`; the sine branch is discarded.
#[inline]
#[must_use]
pub fn box_muller(u1: f64, u2: f64) -> f64 {
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Normal distribution sampled with the Box-Muller transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxMuller {
    mean: f64,
    std_dev: f64,
}

impl BoxMuller {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ConfigError> {
        if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ConfigError::InvalidDistribution {
                kind: "Normal",
                mean,
                std_dev,
                reason: "std_dev must be non-negative and finite",
            });
        }
        Ok(Self { mean, std_dev })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl Distribution<f64> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // Open01 excludes 0, so ln(u1) is always finite
        let u1: f64 = Open01.sample(rng);
        let u2: f64 = Open01.sample(rng);
        self.mean + self.std_dev * box_muller(u1, u2)
    }
}

/// Return draws for a single asset class
#[derive(Debug, Clone)]
pub enum ReturnSampler {
    Normal(BoxMuller),
    /// Location-scale Student's t; `scale` is chosen so the variance matches
    /// the configured volatility
    StudentT {
        mean: f64,
        scale: f64,
        dist: rand_distr::StudentT<f64>,
    },
}

impl ReturnSampler {
    pub fn new(
        assumption: ReturnAssumption,
        distribution: ReturnDistribution,
    ) -> Result<Self, ConfigError> {
        match distribution {
            ReturnDistribution::Normal => {
                BoxMuller::new(assumption.mean, assumption.volatility).map(ReturnSampler::Normal)
            }
            ReturnDistribution::StudentT { df } => {
                if !(df > 2.0 && df.is_finite()) {
                    return Err(ConfigError::InvalidDistribution {
                        kind: "StudentT",
                        mean: assumption.mean,
                        std_dev: assumption.volatility,
                        reason: "degrees of freedom must be finite and greater than 2",
                    });
                }
                // Validates mean/volatility the same way as the normal case
                BoxMuller::new(assumption.mean, assumption.volatility)?;
                let dist = rand_distr::StudentT::new(df).map_err(|_| {
                    ConfigError::InvalidDistribution {
                        kind: "StudentT",
                        mean: assumption.mean,
                        std_dev: assumption.volatility,
                        reason: "degrees of freedom rejected by sampler",
                    }
                })?;
                Ok(ReturnSampler::StudentT {
                    mean: assumption.mean,
                    scale: assumption.volatility * ((df - 2.0) / df).sqrt(),
                    dist,
                })
            }
        }
    }
}

impl Distribution<f64> for ReturnSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            ReturnSampler::Normal(normal) => normal.sample(rng),
            ReturnSampler::StudentT { mean, scale, dist } => mean + scale * dist.sample(rng),
        }
    }
}

/// Blended equity/bond portfolio return for one year
#[derive(Debug, Clone)]
pub struct PortfolioSampler {
    allocation: AssetAllocation,
    equity: ReturnSampler,
    bond: ReturnSampler,
}

impl PortfolioSampler {
    pub fn new(
        allocation: AssetAllocation,
        equity: ReturnAssumption,
        bond: ReturnAssumption,
        distribution: ReturnDistribution,
    ) -> Result<Self, ConfigError> {
        allocation.validate()?;
        Ok(Self {
            allocation,
            equity: ReturnSampler::new(equity, distribution)?,
            bond: ReturnSampler::new(bond, distribution)?,
        })
    }
}

impl Distribution<f64> for PortfolioSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // One independent draw per class, always both, so the RNG stream does
        // not depend on the allocation
        let equity = self.equity.sample(rng);
        let bond = self.bond.sample(rng);
        self.allocation.blend(equity, bond)
    }
}
