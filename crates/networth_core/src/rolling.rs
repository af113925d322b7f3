//! Rolling-window performance.
//!
//! Slides a window of `w` months (`w + 1` snapshots) across the sorted series.
//! Every window reads from the same pre-aggregated [`CashFlowSeries`], so the
//! whole pass does a constant amount of lookup work per window and never
//! re-queries a store.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::cash_flows::CashFlowSeries;
use crate::config::PerformanceConfig;
use crate::error::{ConfigError, DataError, Result};
use crate::model::{RollingWindowMetrics, Snapshot};
use crate::returns::{cagr, span_months};
use crate::risk::{annualized_volatility, sharpe_ratio};

/// Common window widths
pub const ONE_YEAR_WINDOW: usize = 12;
pub const THREE_YEAR_WINDOW: usize = 36;

fn window_metrics(
    window: &[Snapshot],
    cash_flows: &CashFlowSeries,
    config: &PerformanceConfig,
) -> std::result::Result<RollingWindowMetrics, DataError> {
    let (first, last) = (&window[0], &window[window.len() - 1]);
    let net_cash_flow = cash_flows.net_between(first.month_index(), last.month_index());

    let growth = span_months(window)
        .and_then(|m| cagr(first.total_net_worth, last.total_net_worth, net_cash_flow, m));
    let volatility = annualized_volatility(window, cash_flows);
    let sharpe = match (growth, volatility) {
        (Some(g), Some(v)) => sharpe_ratio(g, config.risk_free_rate, v),
        _ => None,
    };

    Ok(RollingWindowMetrics {
        start_date: first.date()?,
        end_date: last.date()?,
        cagr: growth.map(|g| g * 100.0),
        volatility: volatility.map(|v| v * 100.0),
        sharpe_ratio: sharpe,
    })
}

/// Metrics for every window `[i, i + window_months]` over a sorted series.
///
/// Returns an empty list when the series has fewer than `window_months + 1`
/// points. A zero-width window is a configuration error.
pub fn rolling_windows(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
    window_months: usize,
    config: &PerformanceConfig,
) -> Result<Vec<RollingWindowMetrics>> {
    if window_months == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "window_months",
            value: 0.0,
            reason: "window must span at least one month",
        }
        .into());
    }
    if snapshots.len() <= window_months {
        tracing::debug!(
            points = snapshots.len(),
            window_months,
            "series too short for rolling window"
        );
        return Ok(Vec::new());
    }

    let count = snapshots.len() - window_months;
    let compute = |i: usize| window_metrics(&snapshots[i..=i + window_months], cash_flows, config);

    #[cfg(feature = "parallel")]
    let windows = (0..count)
        .into_par_iter()
        .map(compute)
        .collect::<std::result::Result<Vec<_>, DataError>>()?;

    #[cfg(not(feature = "parallel"))]
    let windows = (0..count)
        .map(compute)
        .collect::<std::result::Result<Vec<_>, DataError>>()?;

    Ok(windows)
}
