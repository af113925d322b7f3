//! Derived performance and risk result bundles.
//!
//! Every numeric field is an `Option`: `None` means "not computable" and must
//! never be presented as zero.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Return and risk metrics for one period.
///
/// Percentage fields (`roi`, `cagr`, `time_weighted_return`,
/// `money_weighted_return`, `volatility`, `max_drawdown`) are in percent, so a
/// 10% decline is `-10.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub start_net_worth: Option<f64>,
    pub end_net_worth: Option<f64>,
    /// External contributions minus withdrawals over the period (dividends excluded)
    pub net_cash_flow: Option<f64>,
    /// Dividend income over the period
    pub total_dividends: Option<f64>,
    pub roi: Option<f64>,
    pub cagr: Option<f64>,
    pub time_weighted_return: Option<f64>,
    pub money_weighted_return: Option<f64>,
    pub volatility: Option<f64>,
    pub max_drawdown: Option<f64>,
    /// Months from the drawdown peak to recovery (or to the latest point if open)
    pub drawdown_duration: Option<u32>,
    /// Months from the trough to recovery; `None` while the drawdown is open
    pub recovery_time: Option<u32>,
    /// `false` when the maximum drawdown has not yet been recovered
    pub drawdown_recovered: Option<bool>,
    pub sharpe_ratio: Option<f64>,
    pub number_of_months: Option<u32>,
    pub has_insufficient_data: bool,
}

impl PerformanceMetrics {
    /// Bundle for a series too short to analyze
    #[must_use]
    pub fn insufficient() -> Self {
        Self {
            has_insufficient_data: true,
            ..Self::default()
        }
    }
}

/// Peak-to-trough analysis of a cash-flow adjusted value series.
///
/// Indices refer to positions in the analyzed snapshot series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownAnalysis {
    /// Most negative drawdown as a fraction (`-0.10` for a 10% decline); `0.0`
    /// when the series never fell below its running peak
    pub max_drawdown: f64,
    pub peak_index: Option<usize>,
    pub trough_index: Option<usize>,
    pub recovery_index: Option<usize>,
    /// Inclusive month count from peak to recovery, or to the last point when open
    pub duration_months: Option<u32>,
    /// Inclusive month count from trough to recovery
    pub recovery_months: Option<u32>,
}

impl DrawdownAnalysis {
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_drawdown: 0.0,
            peak_index: None,
            trough_index: None,
            recovery_index: None,
            duration_months: None,
            recovery_months: None,
        }
    }

    #[must_use]
    pub fn has_drawdown(&self) -> bool {
        self.trough_index.is_some()
    }

    #[must_use]
    pub fn is_recovered(&self) -> bool {
        self.recovery_index.is_some()
    }
}

/// Metrics for a single rolling window; percentages in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingWindowMetrics {
    pub start_date: Date,
    pub end_date: Date,
    pub cagr: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
}
