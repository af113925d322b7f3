//! Return assumptions estimated from the owner's own snapshot history.
//!
//! Month-over-month changes per asset class are taken from consecutive real
//! (non-synthetic) snapshots. Changes beyond the outlier threshold are mostly
//! contributions or transfers between classes rather than market moves, so
//! they are discarded before annualizing.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_BOND_RETURN, DEFAULT_EQUITY_RETURN, EstimationConfig, MonteCarloConfig,
    OUTLIER_RETURN_THRESHOLD, ReturnAssumption,
};
use crate::model::Snapshot;
use crate::risk::sample_std_dev;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    /// Estimated from the snapshot history
    Historical,
    /// Not enough usable history; long-run market default used instead
    MarketDefault,
}

/// Estimate for one asset class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEstimate {
    pub class: String,
    pub assumption: ReturnAssumption,
    pub source: ParameterSource,
    /// Monthly changes that survived the outlier filter
    pub valid_points: usize,
    pub discarded_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalParameters {
    /// Number of real monthly snapshots examined
    pub real_months: usize,
    pub equity: ClassEstimate,
    pub bond: ClassEstimate,
}

impl HistoricalParameters {
    /// Copy the estimated assumptions into a simulation config
    pub fn apply_to(&self, config: &mut MonteCarloConfig) {
        config.equity = self.equity.assumption;
        config.bond = self.bond.assumption;
    }
}

#[derive(Debug, Default)]
struct ClassChanges {
    valid: Vec<f64>,
    discarded: usize,
}

/// Month-over-month change per asset class across consecutive real snapshots.
///
/// A pair contributes only when the two snapshots are adjacent calendar
/// months, both carry the class, and the earlier balance is positive. Real
/// snapshots separated by synthetic or missing months span more than one
/// month and are skipped.
fn class_changes<'a>(real: &[&'a Snapshot]) -> FxHashMap<&'a str, ClassChanges> {
    let mut changes: FxHashMap<&'a str, ClassChanges> = FxHashMap::default();
    for pair in real.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if cur.month_index() - prev.month_index() != 1 {
            continue;
        }
        for (class, &before) in &prev.by_asset_class {
            let Some(&after) = cur.by_asset_class.get(class) else {
                continue;
            };
            if before <= 0.0 {
                continue;
            }
            let change = after / before - 1.0;
            let entry = changes.entry(class.as_str()).or_default();
            if change.abs() > OUTLIER_RETURN_THRESHOLD {
                entry.discarded += 1;
            } else {
                entry.valid.push(change);
            }
        }
    }
    changes
}

/// Annualize monthly changes: `(1 + mean)^12 - 1` and `sigma * sqrt(12)`
#[must_use]
pub fn annualize_monthly(changes: &[f64]) -> Option<ReturnAssumption> {
    let sigma = sample_std_dev(changes)?;
    let mean = changes.iter().sum::<f64>() / changes.len() as f64;
    Some(ReturnAssumption::new(
        (1.0 + mean).powi(12) - 1.0,
        sigma * 12f64.sqrt(),
    ))
}

fn estimate_class(
    class: &str,
    changes: Option<&ClassChanges>,
    enough_history: bool,
    config: &EstimationConfig,
    fallback: ReturnAssumption,
) -> ClassEstimate {
    let (valid, discarded) = changes.map_or((&[][..], 0), |c| (c.valid.as_slice(), c.discarded));

    let estimate = (enough_history && valid.len() >= config.min_valid_points)
        .then(|| annualize_monthly(valid))
        .flatten();

    let (assumption, source) = match estimate {
        Some(assumption) => (assumption, ParameterSource::Historical),
        None => {
            tracing::warn!(
                class,
                valid_points = valid.len(),
                required = config.min_valid_points,
                "insufficient history, using market default return assumption"
            );
            (fallback, ParameterSource::MarketDefault)
        }
    };

    ClassEstimate {
        class: class.to_string(),
        assumption,
        source,
        valid_points: valid.len(),
        discarded_points: discarded,
    }
}

/// Estimate equity and bond return assumptions from a sorted snapshot series.
///
/// Each class falls back to its market default independently; the result
/// records which source was used.
#[must_use]
pub fn estimate_parameters(snapshots: &[Snapshot], config: &EstimationConfig) -> HistoricalParameters {
    let real: Vec<&Snapshot> = snapshots.iter().filter(|s| !s.synthetic).collect();
    let enough_history = real.len() >= config.min_history_months;
    if !enough_history {
        tracing::debug!(
            real_months = real.len(),
            required = config.min_history_months,
            "snapshot history too short for estimation"
        );
    }
    let changes = class_changes(&real);

    HistoricalParameters {
        real_months: real.len(),
        equity: estimate_class(
            &config.equity_class,
            changes.get(config.equity_class.as_str()),
            enough_history,
            config,
            DEFAULT_EQUITY_RETURN,
        ),
        bond: estimate_class(
            &config.bond_class,
            changes.get(config.bond_class.as_str()),
            enough_history,
            config,
            DEFAULT_BOND_RETURN,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(months: usize, stock_growth: impl Fn(usize) -> f64) -> Vec<Snapshot> {
        let mut stocks = 10_000.0;
        (0..months)
            .map(|i| {
                if i > 0 {
                    stocks *= 1.0 + stock_growth(i);
                }
                let bonds = 5_000.0 * 1.002f64.powi(i as i32) * if i % 2 == 0 { 1.001 } else { 0.999 };
                Snapshot::new(2020 + (i / 12) as i16, (i % 12) as i8 + 1, stocks + bonds)
                    .with_class("stocks", stocks)
                    .with_class("bonds", bonds)
            })
            .collect()
    }

    #[test]
    fn test_short_history_falls_back() {
        let snapshots = history(10, |_| 0.01);
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.real_months, 10);
        assert_eq!(params.equity.source, ParameterSource::MarketDefault);
        assert_eq!(params.equity.assumption, DEFAULT_EQUITY_RETURN);
        assert_eq!(params.bond.assumption, DEFAULT_BOND_RETURN);
    }

    #[test]
    fn test_estimates_from_history() {
        let snapshots = history(36, |i| if i % 2 == 0 { 0.02 } else { -0.01 });
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.equity.source, ParameterSource::Historical);
        assert_eq!(params.bond.source, ParameterSource::Historical);
        assert_eq!(params.equity.valid_points, 35);

        // 17 months at +2% and 18 at -1%
        let mean = (17.0 * 0.02 + 18.0 * -0.01) / 35.0;
        let expected = (1.0f64 + mean).powi(12) - 1.0;
        assert!((params.equity.assumption.mean - expected).abs() < 1e-9);
        assert!(params.equity.assumption.volatility > 0.0);
    }

    #[test]
    fn test_outliers_discarded() {
        let snapshots = history(30, |i| if i == 10 { 1.5 } else { 0.01 });
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.equity.discarded_points, 1);
        assert_eq!(params.equity.valid_points, 28);
    }

    #[test]
    fn test_synthetic_snapshots_ignored() {
        let mut snapshots = history(30, |_| 0.01);
        for s in snapshots.iter_mut().skip(20) {
            s.synthetic = true;
        }
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.real_months, 20);
        assert_eq!(params.equity.source, ParameterSource::MarketDefault);
    }

    #[test]
    fn test_changes_across_synthetic_gaps_are_skipped() {
        // Every third month is back-filled; only adjacent real months count
        let mut snapshots = history(60, |_| 0.01);
        for (i, s) in snapshots.iter_mut().enumerate() {
            s.synthetic = i % 3 == 2;
        }
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.real_months, 40);
        assert_eq!(params.equity.source, ParameterSource::Historical);
        assert_eq!(params.equity.valid_points, 20);

        let expected = 1.01f64.powi(12) - 1.0;
        assert!((params.equity.assumption.mean - expected).abs() < 1e-9);
    }

    #[test]
    fn test_alternating_synthetic_months_leave_no_changes() {
        let mut snapshots = history(60, |_| 0.01);
        for (i, s) in snapshots.iter_mut().enumerate() {
            s.synthetic = i % 2 == 1;
        }
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.real_months, 30);
        assert_eq!(params.equity.valid_points, 0);
        assert_eq!(params.equity.source, ParameterSource::MarketDefault);
    }

    #[test]
    fn test_missing_class_falls_back_alone() {
        let snapshots: Vec<Snapshot> = history(30, |i| 0.01 * (i % 3) as f64)
            .into_iter()
            .map(|mut s| {
                s.by_asset_class.remove("bonds");
                s
            })
            .collect();
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        assert_eq!(params.equity.source, ParameterSource::Historical);
        assert_eq!(params.bond.source, ParameterSource::MarketDefault);
        assert_eq!(params.bond.valid_points, 0);
    }

    #[test]
    fn test_apply_to_config() {
        let snapshots = history(36, |i| if i % 2 == 0 { 0.02 } else { -0.01 });
        let params = estimate_parameters(&snapshots, &EstimationConfig::default());
        let mut config = MonteCarloConfig::default();
        params.apply_to(&mut config);
        assert_eq!(config.equity, params.equity.assumption);
        assert_eq!(config.bond, params.bond.assumption);
    }
}
