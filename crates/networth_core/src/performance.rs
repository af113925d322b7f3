//! The [`PerformanceMetrics`] bundle.
//!
//! Each metric is computed independently; one metric being undefined never
//! prevents the others from being reported.

use jiff::civil::Date;

use crate::cash_flows::CashFlowSeries;
use crate::config::PerformanceConfig;
use crate::error::DataError;
use crate::model::{PerformanceMetrics, Snapshot};
use crate::period::Period;
use crate::returns::{cagr, money_weighted_return, roi, span_months, time_weighted_return};
use crate::risk::{analyze_drawdown, annualized_volatility, sharpe_ratio};

#[inline]
fn percent(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Compute the full metrics bundle for a sorted snapshot series.
///
/// Fewer than two snapshots produces [`PerformanceMetrics::insufficient`].
#[must_use]
pub fn compute_performance(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
    config: &PerformanceConfig,
) -> PerformanceMetrics {
    let (first, last) = match snapshots {
        [first, .., last] => (first, last),
        _ => return PerformanceMetrics::insufficient(),
    };
    debug_assert!(
        snapshots
            .windows(2)
            .all(|w| w[0].month_index() < w[1].month_index()),
        "snapshot series must be sorted and unique"
    );

    let months = span_months(snapshots);
    let start_value = first.total_net_worth;
    let end_value = last.total_net_worth;
    let net_cash_flow = cash_flows.net_between(first.month_index(), last.month_index());
    let total_dividends = cash_flows.dividends_between(first.month_index(), last.month_index());

    let twr = time_weighted_return(snapshots, cash_flows);
    let annualized_twr = twr.and_then(|t| t.annualized);
    let volatility = annualized_volatility(snapshots, cash_flows);
    let drawdown = analyze_drawdown(snapshots, cash_flows);

    let sharpe = match (annualized_twr, volatility) {
        (Some(r), Some(v)) => sharpe_ratio(r, config.risk_free_rate, v),
        _ => None,
    };

    PerformanceMetrics {
        start_date: first.date().ok(),
        end_date: last.date().ok(),
        start_net_worth: Some(start_value),
        end_net_worth: Some(end_value),
        net_cash_flow: Some(net_cash_flow),
        total_dividends: Some(total_dividends),
        roi: roi(start_value, end_value, net_cash_flow).map(percent),
        cagr: months
            .and_then(|m| cagr(start_value, end_value, net_cash_flow, m))
            .map(percent),
        time_weighted_return: annualized_twr.map(percent),
        money_weighted_return: money_weighted_return(snapshots, cash_flows, &config.irr)
            .map(percent),
        volatility: volatility.map(percent),
        max_drawdown: drawdown.map(|d| percent(d.max_drawdown)),
        drawdown_duration: drawdown.and_then(|d| d.duration_months),
        recovery_time: drawdown.and_then(|d| d.recovery_months),
        drawdown_recovered: drawdown
            .filter(|d| d.has_drawdown())
            .map(|d| d.is_recovered()),
        sharpe_ratio: sharpe,
        number_of_months: months,
        has_insufficient_data: false,
    }
}

/// Restrict the series to a reporting period, then compute the bundle.
///
/// Cash flows outside the period are ignored by construction since all
/// lookups are bounded by the first and last snapshot in range.
pub fn performance_for_period(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
    period: Period,
    now: Date,
    config: &PerformanceConfig,
) -> Result<PerformanceMetrics, DataError> {
    let range = period.date_range(now)?;
    let in_range = range.filter_snapshots(snapshots);
    tracing::debug!(
        period = %period.label(),
        snapshots = in_range.len(),
        "computing performance"
    );
    Ok(compute_performance(&in_range, cash_flows, config))
}
