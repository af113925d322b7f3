use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use super::sampler::PortfolioSampler;
use super::summary::summarize;
use crate::config::MonteCarloConfig;
use crate::error::ConfigError;
use crate::model::{SimulationResult, SimulationRun};

/// Trials per seeded batch. Results depend on this value, so changing it
/// changes the output for a given seed.
pub const BATCH_SIZE: usize = 100;

/// Withdrawal taken at the end of `year` (1-based).
///
/// The first year withdraws the configured amount; later years are scaled by
/// cumulative inflation when the config asks for it.
#[inline]
#[must_use]
pub fn withdrawal_for_year(config: &MonteCarloConfig, year: u32) -> f64 {
    if config.inflation_adjusted {
        config.annual_withdrawal * (1.0 + config.inflation_rate).powi(year as i32 - 1)
    } else {
        config.annual_withdrawal
    }
}

/// Simulate a single withdrawal-phase trial.
///
/// Each year applies the sampled portfolio return, then subtracts the
/// withdrawal. The trial fails as soon as the value reaches zero or below;
/// its path then ends at that year with a recorded value of 0.
pub fn run_trial<R: Rng + ?Sized>(
    config: &MonteCarloConfig,
    sampler: &PortfolioSampler,
    rng: &mut R,
) -> SimulationRun {
    let mut path = Vec::with_capacity(config.years as usize + 1);
    let mut value = config.initial_value;
    path.push(value);

    for year in 1..=config.years {
        let portfolio_return = sampler.sample(rng);
        value *= 1.0 + portfolio_return;
        value -= withdrawal_for_year(config, year);

        if value <= 0.0 {
            path.push(0.0);
            return SimulationRun {
                path,
                success: false,
                failure_year: Some(year),
            };
        }
        path.push(value);
    }

    SimulationRun {
        path,
        success: true,
        failure_year: None,
    }
}

/// Seed for one batch, derived from the configured base seed
#[inline]
fn batch_seed(base: u64, batch: usize) -> u64 {
    base ^ (batch as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn run_batch(
    config: &MonteCarloConfig,
    sampler: &PortfolioSampler,
    batch: usize,
    num_batches: usize,
) -> Vec<SimulationRun> {
    let mut rng = SmallRng::seed_from_u64(batch_seed(config.seed, batch));

    let batch_size = if batch == num_batches - 1 {
        config.num_trials - batch * BATCH_SIZE
    } else {
        BATCH_SIZE
    };

    (0..batch_size)
        .map(|_| {
            let mut trial_rng = SmallRng::seed_from_u64(rng.next_u64());
            run_trial(config, sampler, &mut trial_rng)
        })
        .collect()
}

/// Run every trial in the config and return the individual runs in batch order.
///
/// Output is a pure function of the config: batches are seeded independently,
/// so thread scheduling never changes the result.
pub fn simulate_trials(config: &MonteCarloConfig) -> Result<Vec<SimulationRun>, ConfigError> {
    config.validate()?;
    let sampler = PortfolioSampler::new(
        config.allocation,
        config.equity,
        config.bond,
        config.distribution,
    )?;
    let num_batches = config.num_trials.div_ceil(BATCH_SIZE);

    #[cfg(feature = "parallel")]
    let runs = (0..num_batches)
        .into_par_iter()
        .flat_map(|i| run_batch(config, &sampler, i, num_batches))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let runs = (0..num_batches)
        .flat_map(|i| run_batch(config, &sampler, i, num_batches))
        .collect();

    Ok(runs)
}

/// Run the Monte Carlo withdrawal simulation and aggregate the trials.
pub fn monte_carlo_simulate(config: &MonteCarloConfig) -> Result<SimulationResult, ConfigError> {
    tracing::debug!(
        trials = config.num_trials,
        years = config.years,
        seed = config.seed,
        "starting monte carlo simulation"
    );
    let runs = simulate_trials(config)?;
    let result = summarize(&runs, config);
    tracing::debug!(
        success_rate = result.success_rate,
        failed = result.failure_statistics.failed_trials,
        "monte carlo simulation complete"
    );
    Ok(result)
}
