//! Net-worth performance and risk analytics
//!
//! This crate turns a monthly series of net-worth snapshots and categorized
//! cash-flow transactions into return, risk and projection metrics:
//! - Cash-flow adjusted ROI and CAGR, time-weighted and money-weighted (IRR) return
//! - Volatility with contribution-artifact filtering, drawdown depth/duration/recovery, Sharpe ratio
//! - Rolling-window performance
//! - Monte Carlo withdrawal-phase simulation with percentile bands and failure statistics
//! - Deterministic bear/base/bull FIRE projections
//!
//! Metrics that cannot be computed are `None`, never a misleading zero.
//!
//! # Example
//!
//! ```ignore
//! use networth_core::{PortfolioAnalytics, InMemoryStore, Period};
//!
//! let analytics = PortfolioAnalytics::in_memory(InMemoryStore::new(snapshots, transactions))
//!     .with_dividend_category("dividends");
//! let metrics = analytics.performance(Period::ONE_YEAR, jiff::civil::date(2025, 6, 30))?;
//! println!("TWR: {:?}%", metrics.time_weighted_return);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cash_flows;
pub mod date_math;
pub mod error;
pub mod fire;
pub mod monte_carlo;
pub mod performance;
pub mod period;
pub mod repository;
pub mod returns;
pub mod risk;
pub mod rolling;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cash_flows::{CashFlowSeries, aggregate_cash_flows};
pub use config::{
    EstimationConfig, FireConfig, IrrSolverConfig, MonteCarloConfig, PerformanceConfig,
};
pub use error::{AnalyticsError, ConfigError, DataError, StoreError};
pub use fire::project_fire;
pub use monte_carlo::{HistoricalParameters, estimate_parameters, monte_carlo_simulate};
pub use performance::{compute_performance, performance_for_period};
pub use period::{DateRange, Period};
pub use repository::{InMemoryStore, PortfolioAnalytics, SnapshotStore, TransactionStore};
pub use rolling::rolling_windows;
