//! Tests for the performance metrics bundle
//!
//! These tests verify that:
//! - Time-weighted return ignores the size and timing of contributions
//! - ROI and CAGR subtract external cash flow
//! - Dividends stay inside the return when a dividend category is configured
//! - The drawdown scenario from a simple three-month series is reported in percent

use jiff::civil::date;

use super::monthly_series;
use crate::cash_flows::CashFlowSeries;
use crate::config::PerformanceConfig;
use crate::model::{Snapshot, Transaction, TransactionKind};
use crate::performance::compute_performance;
use crate::returns::{cagr, time_weighted_return};

fn contribution(amount: f64, year: i16, month: i8) -> Transaction {
    Transaction::new(TransactionKind::Income, amount, date(year, month, 15))
}

#[test]
fn test_twr_ignores_contributions_roi_does_not() {
    // Same monthly investment returns (+2%, -1%, +3%), with and without deposits
    let plain = monthly_series(2024, &[100_000.0, 102_000.0, 100_980.0, 104_009.4]);
    let funded = monthly_series(2024, &[100_000.0, 112_000.0, 110_880.0, 119_206.4]);
    let flows = CashFlowSeries::from_transactions(
        &[contribution(10_000.0, 2024, 2), contribution(5_000.0, 2024, 4)],
        None,
    );
    let config = PerformanceConfig::default();

    let a = compute_performance(&plain, &CashFlowSeries::default(), &config);
    let b = compute_performance(&funded, &flows, &config);

    let twr_a = a.time_weighted_return.unwrap();
    let twr_b = b.time_weighted_return.unwrap();
    assert!((twr_a - twr_b).abs() < 1e-9, "{twr_a} vs {twr_b}");

    assert!((a.roi.unwrap() - 4.0094).abs() < 1e-9);
    assert!((b.roi.unwrap() - 4.2064).abs() < 1e-9);
    assert_eq!(b.net_cash_flow, Some(15_000.0));
    assert!((a.cagr.unwrap() - b.cagr.unwrap()).abs() > 1e-3);
}

#[test]
fn test_cagr_reference_case() {
    let value = cagr(100_000.0, 121_000.0, 0.0, 12).unwrap();
    assert!((value - 0.21).abs() < 1e-12);
}

#[test]
fn test_drawdown_reported_in_bundle() {
    let snapshots = monthly_series(2024, &[100_000.0, 90_000.0, 120_000.0]);
    let metrics =
        compute_performance(&snapshots, &CashFlowSeries::default(), &PerformanceConfig::default());

    assert!((metrics.max_drawdown.unwrap() + 10.0).abs() < 1e-9);
    assert_eq!(metrics.drawdown_duration, Some(3));
    assert_eq!(metrics.recovery_time, Some(2));
    assert_eq!(metrics.drawdown_recovered, Some(true));
}

#[test]
fn test_no_drawdown_leaves_recovery_flag_unset() {
    let snapshots = monthly_series(2024, &[100.0, 110.0, 120.0]);
    let metrics =
        compute_performance(&snapshots, &CashFlowSeries::default(), &PerformanceConfig::default());
    assert_eq!(metrics.max_drawdown, Some(0.0));
    assert_eq!(metrics.drawdown_recovered, None);
    assert_eq!(metrics.recovery_time, None);
}

#[test]
fn test_dividends_are_return_not_contribution() {
    let snapshots = monthly_series(2024, &[10_000.0, 10_100.0]);
    let transactions = [
        Transaction::new(TransactionKind::Income, 100.0, date(2024, 2, 1)).with_category("div")
    ];

    let separated = CashFlowSeries::from_transactions(&transactions, Some("div"));
    let merged = CashFlowSeries::from_transactions(&transactions, None);
    let config = PerformanceConfig::default();

    let with_dividends = compute_performance(&snapshots, &separated, &config);
    let without = compute_performance(&snapshots, &merged, &config);

    assert!((with_dividends.roi.unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(with_dividends.total_dividends, Some(100.0));
    assert!(without.roi.unwrap().abs() < 1e-9);
}

#[test]
fn test_cash_flow_in_first_snapshot_month_is_excluded() {
    let snapshots = monthly_series(2024, &[1_000.0, 1_100.0]);
    let flows = CashFlowSeries::from_transactions(&[contribution(500.0, 2024, 1)], None);
    let metrics = compute_performance(&snapshots, &flows, &PerformanceConfig::default());
    assert_eq!(metrics.net_cash_flow, Some(0.0));
    assert!((metrics.roi.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn test_money_weighted_differs_from_time_weighted_with_bad_timing() {
    // Large deposit right before a loss drags money-weighted below time-weighted
    let snapshots = monthly_series(
        2024,
        &[10_000.0, 11_000.0, 12_100.0, 110_000.0, 99_000.0, 108_900.0],
    );
    let flows = CashFlowSeries::from_transactions(&[contribution(96_690.0, 2024, 4)], None);
    let metrics = compute_performance(&snapshots, &flows, &PerformanceConfig::default());

    let twr = metrics.time_weighted_return.unwrap();
    let mwr = metrics.money_weighted_return.unwrap();
    assert!(mwr < twr, "mwr {mwr} twr {twr}");
}

#[test]
fn test_single_snapshot_twr_undefined() {
    let snapshots = vec![Snapshot::new(2024, 1, 5_000.0)];
    assert_eq!(time_weighted_return(&snapshots, &CashFlowSeries::default()), None);
}
