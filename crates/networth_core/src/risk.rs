//! Risk metrics: volatility, drawdown and recovery timing, Sharpe ratio.
//!
//! Values are fractions; snapshot slices must be sorted ascending.

use crate::cash_flows::CashFlowSeries;
use crate::config::OUTLIER_RETURN_THRESHOLD;
use crate::model::{DrawdownAnalysis, Snapshot};
use crate::returns::period_returns;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Volatility at or below this is treated as zero (floating-point noise from
/// a constant-growth series)
const ZERO_VOLATILITY: f64 = 1e-12;

/// Cash-flow adjusted monthly returns with contribution artifacts removed.
///
/// Any return with magnitude at or above [`OUTLIER_RETURN_THRESHOLD`] is
/// dropped, as are pairs with a zero starting value and pairs spanning a
/// missing month, which are not monthly returns.
#[must_use]
pub fn filtered_monthly_returns(snapshots: &[Snapshot], cash_flows: &CashFlowSeries) -> Vec<f64> {
    let periods = period_returns(snapshots, cash_flows);
    let total = periods.len();
    let returns: Vec<f64> = periods
        .into_iter()
        .filter(|p| p.months == 1)
        .filter_map(|p| p.value)
        .filter(|r| r.abs() < OUTLIER_RETURN_THRESHOLD)
        .collect();

    if returns.len() < total {
        tracing::debug!(
            discarded = total - returns.len(),
            kept = returns.len(),
            "dropped gap or outlier monthly returns"
        );
    }
    returns
}

/// Sample standard deviation (N-1 denominator); `None` with fewer than two values
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Annualized volatility of monthly returns (`sigma * sqrt(12)`).
#[must_use]
pub fn annualized_volatility(snapshots: &[Snapshot], cash_flows: &CashFlowSeries) -> Option<f64> {
    let returns = filtered_monthly_returns(snapshots, cash_flows);
    sample_std_dev(&returns).map(|sigma| sigma * MONTHS_PER_YEAR.sqrt())
}

/// Net worth with cumulative external cash flow removed, one value per snapshot.
///
/// Flows are accumulated from the month after the first snapshot, so the
/// first adjusted value equals the first net worth.
#[must_use]
pub fn cash_flow_adjusted_values(snapshots: &[Snapshot], cash_flows: &CashFlowSeries) -> Vec<f64> {
    let Some(first) = snapshots.first() else {
        return Vec::new();
    };
    let origin = first.month_index();
    snapshots
        .iter()
        .map(|s| s.total_net_worth - cash_flows.net_between(origin, s.month_index()))
        .collect()
}

/// Maximum drawdown with its duration and recovery time.
///
/// `None` with fewer than two snapshots. A series that never drops below its
/// running peak yields [`DrawdownAnalysis::none`].
#[must_use]
pub fn analyze_drawdown(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
) -> Option<DrawdownAnalysis> {
    if snapshots.len() < 2 {
        return None;
    }
    let adjusted = cash_flow_adjusted_values(snapshots, cash_flows);

    let mut peak = (adjusted[0], 0usize);
    let mut worst: Option<(f64, usize, usize)> = None;

    for (i, &value) in adjusted.iter().enumerate() {
        if value >= peak.0 {
            peak = (value, i);
            continue;
        }
        if peak.0 <= 0.0 {
            continue;
        }
        let drawdown = (value - peak.0) / peak.0;
        if worst.is_none_or(|(w, _, _)| drawdown < w) {
            worst = Some((drawdown, peak.1, i));
        }
    }

    let Some((max_drawdown, peak_index, trough_index)) = worst else {
        return Some(DrawdownAnalysis::none());
    };

    let peak_value = adjusted[peak_index];
    let recovery_index = adjusted
        .iter()
        .enumerate()
        .skip(trough_index + 1)
        .find(|(_, v)| **v >= peak_value)
        .map(|(i, _)| i);

    let month_of = |i: usize| snapshots[i].month_index();
    let inclusive = |from: usize, to: usize| (month_of(to) - month_of(from) + 1).max(1) as u32;

    let end_index = recovery_index.unwrap_or(snapshots.len() - 1);
    Some(DrawdownAnalysis {
        max_drawdown,
        peak_index: Some(peak_index),
        trough_index: Some(trough_index),
        recovery_index,
        duration_months: Some(inclusive(peak_index, end_index)),
        recovery_months: recovery_index.map(|r| inclusive(trough_index, r)),
    })
}

/// `(annualized_return - risk_free_rate) / volatility`; `None` for (near) zero volatility
#[must_use]
pub fn sharpe_ratio(annualized_return: f64, risk_free_rate: f64, volatility: f64) -> Option<f64> {
    if volatility.abs() < ZERO_VOLATILITY || !volatility.is_finite() {
        return None;
    }
    let value = (annualized_return - risk_free_rate) / volatility;
    value.is_finite().then_some(value)
}
