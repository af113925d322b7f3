//! Property-based invariants
//!
//! Randomized checks that hold for every input, complementing the
//! hand-picked cases in the other topic modules.

use jiff::civil::date;
use proptest::collection::vec;
use proptest::prelude::{any, prop_assert, prop_assert_eq, prop_assume, proptest};

use super::monthly_series;
use crate::cash_flows::CashFlowSeries;
use crate::config::{FireConfig, MonteCarloConfig, PerformanceConfig, ReturnAssumption};
use crate::fire::project_fire;
use crate::model::{ProjectionScenario, Transaction, TransactionKind};
use crate::monte_carlo::{monte_carlo_simulate, simulate_trials};
use crate::performance::compute_performance;
use crate::returns::time_weighted_return;
use crate::risk::analyze_drawdown;

/// Build a series from per-month investment returns and end-of-month deposits
fn grow(start: f64, returns: &[f64], deposits: &[f64]) -> (Vec<f64>, Vec<Transaction>) {
    let mut values = vec![start];
    let mut transactions = Vec::new();
    let mut value = start;
    for (i, (&r, &d)) in returns.iter().zip(deposits).enumerate() {
        value = value * (1.0 + r) + d;
        values.push(value);
        if d != 0.0 {
            let month = i + 1;
            let tx_date = date(2020 + (month / 12) as i16, (month % 12) as i8 + 1, 10);
            transactions.push(Transaction::new(TransactionKind::Income, d, tx_date));
        }
    }
    (values, transactions)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_twr_invariant_to_contributions(
        returns_bp in vec(-1500i32..1500, 2..36),
        deposits in vec(0u32..20_000, 36),
        start in 10_000u32..500_000,
    ) {
        let returns: Vec<f64> = returns_bp.iter().map(|&bp| f64::from(bp) / 10_000.0).collect();
        let deposits: Vec<f64> = deposits[..returns.len()].iter().map(|&d| f64::from(d)).collect();
        let none = vec![0.0; returns.len()];

        let (plain, _) = grow(f64::from(start), &returns, &none);
        let (funded, transactions) = grow(f64::from(start), &returns, &deposits);

        let a = time_weighted_return(&monthly_series(2020, &plain), &CashFlowSeries::default());
        let b = time_weighted_return(
            &monthly_series(2020, &funded),
            &CashFlowSeries::from_transactions(&transactions, None),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        prop_assert!((a.cumulative - b.cumulative).abs() < 1e-9);
    }

    #[test]
    fn prop_drawdown_bounds(values in vec(1.0f64..1_000_000.0, 2..60)) {
        let dd = analyze_drawdown(&monthly_series(2020, &values), &CashFlowSeries::default()).unwrap();
        prop_assert!(dd.max_drawdown <= 0.0);
        prop_assert!(dd.max_drawdown > -1.0);
        if let (Some(recovery), Some(duration)) = (dd.recovery_months, dd.duration_months) {
            prop_assert!(recovery <= duration);
        }
    }

    #[test]
    fn prop_short_series_is_insufficient(value in any::<f64>()) {
        prop_assume!(value.is_finite());
        let metrics = compute_performance(
            &monthly_series(2020, &[value]),
            &CashFlowSeries::default(),
            &PerformanceConfig::default(),
        );
        prop_assert!(metrics.has_insufficient_data);
        prop_assert_eq!(metrics.roi, None);
        prop_assert_eq!(metrics.volatility, None);
        prop_assert_eq!(metrics.max_drawdown, None);
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(16))]

    #[test]
    fn prop_percentile_bands_are_monotone(
        seed in any::<u64>(),
        years in 1u32..20,
        equity_vol_bp in 0u32..3000,
        withdrawal in 0u32..80_000,
    ) {
        let config = MonteCarloConfig {
            seed,
            years,
            num_trials: 150,
            annual_withdrawal: f64::from(withdrawal),
            equity: ReturnAssumption::new(0.07, f64::from(equity_vol_bp) / 10_000.0),
            ..Default::default()
        };
        let result = monte_carlo_simulate(&config).unwrap();
        for band in &result.percentile_bands {
            prop_assert!(band.p10 <= band.p25);
            prop_assert!(band.p25 <= band.p50);
            prop_assert!(band.p50 <= band.p75);
            prop_assert!(band.p75 <= band.p90);
        }
    }

    #[test]
    fn prop_zero_volatility_is_deterministic(
        seed in any::<u64>(),
        initial in 10_000u32..2_000_000,
        withdrawal in 0u32..150_000,
        mean_bp in -500i32..1000,
    ) {
        let config = MonteCarloConfig {
            seed,
            years: 25,
            num_trials: 120,
            initial_value: f64::from(initial),
            annual_withdrawal: f64::from(withdrawal),
            equity: ReturnAssumption::new(f64::from(mean_bp) / 10_000.0, 0.0),
            bond: ReturnAssumption::new(0.02, 0.0),
            ..Default::default()
        };
        let runs = simulate_trials(&config).unwrap();
        prop_assert!(runs.iter().all(|r| r.path == runs[0].path));

        let result = monte_carlo_simulate(&config).unwrap();
        prop_assert!(result.success_rate == 0.0 || result.success_rate == 1.0);
    }

    #[test]
    fn prop_fire_flat_projection(
        initial in 0u32..3_000_000,
        expenses in 1_000u32..150_000,
        inflation_bp in 0u32..800,
    ) {
        let flat = ProjectionScenario {
            growth_rate: 0.0,
            inflation_rate: f64::from(inflation_bp) / 10_000.0,
        };
        let config = FireConfig {
            initial_net_worth: f64::from(initial),
            annual_savings: 0.0,
            annual_expenses: f64::from(expenses),
            max_years: 40,
            bear: flat,
            base: flat,
            bull: flat,
            ..Default::default()
        };
        let initially_independent =
            config.initial_net_worth >= config.annual_expenses / config.withdrawal_rate;

        for projection in project_fire(&config).unwrap() {
            prop_assert!(projection.path.iter().all(|p| p.net_worth == config.initial_net_worth));
            prop_assert_eq!(projection.years_to_independence.is_some(), initially_independent);
            if initially_independent {
                prop_assert_eq!(projection.years_to_independence, Some(0));
            }
        }
    }
}
