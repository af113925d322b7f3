//! Point-in-time return metrics: ROI, CAGR, time-weighted and money-weighted
//! return.
//!
//! All functions return fractions (`0.21` = 21%) and `None` when a metric is
//! not computable. Snapshot slices must already be sorted ascending (see
//! [`prepare_series`](crate::model::prepare_series)).
//!
//! Cash flow attributed to the interval between two snapshots is the net
//! external flow of every month strictly after the earlier snapshot's month,
//! up to and including the later snapshot's month.

use serde::{Deserialize, Serialize};

use crate::cash_flows::CashFlowSeries;
use crate::config::IrrSolverConfig;
use crate::model::Snapshot;

/// Return on investment net of external cash flow.
///
/// `(end - start - net_cash_flow) / start`; `None` when `start` is zero.
#[must_use]
pub fn roi(start_value: f64, end_value: f64, net_cash_flow: f64) -> Option<f64> {
    if start_value == 0.0 {
        return None;
    }
    let value = (end_value - start_value - net_cash_flow) / start_value;
    value.is_finite().then_some(value)
}

/// Compound annual growth rate over `months`.
///
/// Treats the period's net cash flow as if it had been present from the
/// start: `(end / (start + net_cash_flow))^(12 / months) - 1`.
#[must_use]
pub fn cagr(start_value: f64, end_value: f64, net_cash_flow: f64, months: u32) -> Option<f64> {
    let adjusted_start = start_value + net_cash_flow;
    if adjusted_start <= 0.0 || months == 0 {
        return None;
    }
    let value = (end_value / adjusted_start).powf(12.0 / f64::from(months)) - 1.0;
    value.is_finite().then_some(value)
}

/// Return between two consecutive snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodReturn {
    /// Position of the later snapshot in the series
    pub index: usize,
    pub start_value: f64,
    pub end_value: f64,
    pub cash_flow: f64,
    pub months: u32,
    /// `(end - cash_flow) / start - 1`; `None` when `start` is zero
    pub value: Option<f64>,
}

/// Sub-period returns for every consecutive snapshot pair.
#[must_use]
pub fn period_returns(snapshots: &[Snapshot], cash_flows: &CashFlowSeries) -> Vec<PeriodReturn> {
    snapshots
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (prev, next) = (&pair[0], &pair[1]);
            let cash_flow = cash_flows.net_between(prev.month_index(), next.month_index());
            let value = if prev.total_net_worth == 0.0 {
                None
            } else {
                let r = (next.total_net_worth - cash_flow) / prev.total_net_worth - 1.0;
                r.is_finite().then_some(r)
            };
            PeriodReturn {
                index: i + 1,
                start_value: prev.total_net_worth,
                end_value: next.total_net_worth,
                cash_flow,
                months: (next.month_index() - prev.month_index()).max(0) as u32,
                value,
            }
        })
        .collect()
}

/// Whole months spanned by a sorted series
#[must_use]
pub fn span_months(snapshots: &[Snapshot]) -> Option<u32> {
    let (first, last) = (snapshots.first()?, snapshots.last()?);
    u32::try_from(last.month_index() - first.month_index()).ok()
}

/// Geometrically linked time-weighted return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWeightedReturn {
    /// Product of `(1 + r_i)` minus one
    pub cumulative: f64,
    /// `linked^(12 / total_months) - 1`; `None` when the series spans zero months
    pub annualized: Option<f64>,
}

/// Time-weighted return, insensitive to the size and timing of contributions.
///
/// Pairs with a zero starting value are skipped. `None` with fewer than two
/// snapshots or when no pair could be linked.
#[must_use]
pub fn time_weighted_return(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
) -> Option<TimeWeightedReturn> {
    if snapshots.len() < 2 {
        return None;
    }

    let mut linked = 1.0;
    let mut linked_any = false;
    for period in period_returns(snapshots, cash_flows) {
        if let Some(r) = period.value {
            linked *= 1.0 + r;
            linked_any = true;
        }
    }
    if !linked_any || !linked.is_finite() {
        return None;
    }

    let total_months = span_months(snapshots)?;
    let annualized = if total_months == 0 || linked < 0.0 {
        None
    } else {
        let value = linked.powf(12.0 / f64::from(total_months)) - 1.0;
        value.is_finite().then_some(value)
    };

    Some(TimeWeightedReturn {
        cumulative: linked - 1.0,
        annualized,
    })
}

/// A cash flow placed on the monthly timeline, from the owner's perspective
/// (negative = money put in, positive = money taken out)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedCashFlow {
    pub month: u32,
    pub amount: f64,
}

/// Result of the Newton-Raphson IRR iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrrOutcome {
    Converged { rate: f64, iterations: usize },
    /// NPV derivative was exactly zero at `rate`
    ZeroDerivative { rate: f64, iteration: usize },
    /// Iteration cap reached, or the iterate became non-finite
    NotConverged { last_rate: f64 },
}

impl IrrOutcome {
    #[must_use]
    pub fn rate(self) -> Option<f64> {
        match self {
            IrrOutcome::Converged { rate, .. } => Some(rate),
            _ => None,
        }
    }
}

/// NPV and its derivative at an annual `rate`, with time measured in years
fn npv_and_derivative(flows: &[TimedCashFlow], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    flows.iter().fold((0.0, 0.0), |(npv, d_npv), cf| {
        let t = f64::from(cf.month) / 12.0;
        let discount = base.powf(-t);
        (
            npv + cf.amount * discount,
            d_npv - t * cf.amount * discount / base,
        )
    })
}

/// Solve for the annual discount rate that zeroes the NPV of `flows`.
#[must_use]
pub fn solve_irr(flows: &[TimedCashFlow], config: &IrrSolverConfig) -> IrrOutcome {
    let mut rate = config.initial_guess.max(config.rate_floor);

    for iteration in 0..config.max_iterations {
        let (npv, d_npv) = npv_and_derivative(flows, rate);
        if !npv.is_finite() {
            break;
        }
        if npv.abs() < config.tolerance {
            return IrrOutcome::Converged {
                rate,
                iterations: iteration,
            };
        }
        if d_npv == 0.0 {
            return IrrOutcome::ZeroDerivative { rate, iteration };
        }

        let next = (rate - npv / d_npv).max(config.rate_floor);
        if !next.is_finite() {
            break;
        }
        rate = next;
    }

    tracing::debug!(rate, "IRR did not converge");
    IrrOutcome::NotConverged { last_rate: rate }
}

/// Build the money-weighted timeline for a sorted series.
///
/// The starting value is an outflow at month 0, each month's net external
/// cash flow is placed at its offset with the owner's sign, and the ending
/// value is an inflow at the final month.
#[must_use]
pub fn money_weighted_timeline(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
) -> Vec<TimedCashFlow> {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return Vec::new();
    };
    let origin = first.month_index();
    let Ok(total_months) = u32::try_from(last.month_index() - origin) else {
        return Vec::new();
    };

    let mut flows = Vec::with_capacity(snapshots.len() + 2);
    flows.push(TimedCashFlow {
        month: 0,
        amount: -first.total_net_worth,
    });
    for record in cash_flows.in_range(origin + 1, last.month_index()) {
        if record.net_cash_flow != 0.0 {
            flows.push(TimedCashFlow {
                month: (record.month_index() - origin) as u32,
                amount: -record.net_cash_flow,
            });
        }
    }
    flows.push(TimedCashFlow {
        month: total_months,
        amount: last.total_net_worth,
    });
    flows
}

/// Money-weighted return (IRR) as an annual rate.
#[must_use]
pub fn money_weighted_return(
    snapshots: &[Snapshot],
    cash_flows: &CashFlowSeries,
    config: &IrrSolverConfig,
) -> Option<f64> {
    if snapshots.len() < 2 {
        return None;
    }
    let flows = money_weighted_timeline(snapshots, cash_flows);
    solve_irr(&flows, config).rate()
}
