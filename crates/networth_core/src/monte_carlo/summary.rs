//! Aggregation of Monte Carlo trials.
//!
//! Every statistic here sorts its inputs first, so trial order never affects
//! the result.

use crate::config::MonteCarloConfig;
use crate::model::{FailureStatistics, HistogramBin, PercentileBand, SimulationResult, SimulationRun};

pub const HISTOGRAM_BINS: usize = 10;

/// Linearly interpolated percentile of an ascending slice; `p` in `0.0..=1.0`
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * weight)
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

/// p10/p25/p50/p75/p90 for each year `0..=years`, failed trials counting as 0
#[must_use]
pub fn percentile_bands(runs: &[SimulationRun], years: u32) -> Vec<PercentileBand> {
    if runs.is_empty() {
        return Vec::new();
    }
    (0..=years)
        .map(|year| {
            let values = sorted(runs.iter().map(|r| r.value_at(year as usize)).collect());
            let at = |p: f64| percentile(&values, p).unwrap_or(0.0);
            PercentileBand {
                year,
                p10: at(0.10),
                p25: at(0.25),
                p50: at(0.50),
                p75: at(0.75),
                p90: at(0.90),
            }
        })
        .collect()
}

#[must_use]
pub fn failure_statistics(runs: &[SimulationRun]) -> FailureStatistics {
    let mut years: Vec<u32> = runs.iter().filter_map(|r| r.failure_year).collect();
    if years.is_empty() {
        return FailureStatistics::default();
    }
    years.sort_unstable();
    let as_f64: Vec<f64> = years.iter().map(|&y| f64::from(y)).collect();

    FailureStatistics {
        failed_trials: years.len(),
        earliest_failure_year: years.first().copied(),
        latest_failure_year: years.last().copied(),
        mean_failure_year: Some(as_f64.iter().sum::<f64>() / as_f64.len() as f64),
        median_failure_year: percentile(&as_f64, 0.5),
    }
}

/// Equal-width histogram spanning `[min, max]` of `values`.
///
/// When every value is identical all of them land in the first bin.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i == bins - 1 {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let index = if width > 0.0 {
            (((value - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        out[index].count += 1;
    }
    out
}

/// Build the aggregate result from a completed set of trials
#[must_use]
pub fn summarize(runs: &[SimulationRun], config: &MonteCarloConfig) -> SimulationResult {
    let successes = runs.iter().filter(|r| r.success).count();
    let success_rate = if runs.is_empty() {
        0.0
    } else {
        successes as f64 / runs.len() as f64
    };

    let successful_finals = sorted(
        runs.iter()
            .filter(|r| r.success)
            .map(SimulationRun::final_value)
            .collect(),
    );
    let all_finals: Vec<f64> = runs.iter().map(SimulationRun::final_value).collect();

    SimulationResult {
        num_trials: runs.len(),
        success_rate,
        median_final_value: percentile(&successful_finals, 0.5),
        percentile_bands: percentile_bands(runs, config.years),
        failure_statistics: failure_statistics(runs),
        histogram: histogram(&all_finals, HISTOGRAM_BINS),
        config: config.clone(),
    }
}
