//! Store boundary and the [`PortfolioAnalytics`] facade.
//!
//! The engine itself never fetches data. Stores are injected, each request
//! reads them once, and the aggregated cash flows are passed down explicitly
//! instead of being cached between calls.

use std::sync::Arc;

use jiff::civil::Date;

use crate::cash_flows::CashFlowSeries;
use crate::config::{EstimationConfig, PerformanceConfig};
use crate::error::{Result, StoreError};
use crate::model::{PerformanceMetrics, RollingWindowMetrics, Snapshot, Transaction, prepare_series};
use crate::monte_carlo::{HistoricalParameters, estimate_parameters};
use crate::performance::{compute_performance, performance_for_period};
use crate::period::{DateRange, Period};
use crate::rolling::rolling_windows;

/// Source of monthly net-worth snapshots
pub trait SnapshotStore: Send + Sync {
    /// Snapshots whose month falls inside `range`, in any order
    fn snapshots(&self, range: &DateRange) -> std::result::Result<Vec<Snapshot>, StoreError>;
}

/// Source of income and expense transactions
pub trait TransactionStore: Send + Sync {
    /// Transactions dated inside `range`
    fn transactions(&self, range: &DateRange) -> std::result::Result<Vec<Transaction>, StoreError>;
}

/// Store backed by vectors already in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshots: Vec<Snapshot>,
    transactions: Vec<Transaction>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(snapshots: Vec<Snapshot>, transactions: Vec<Transaction>) -> Self {
        Self {
            snapshots,
            transactions,
        }
    }
}

impl SnapshotStore for InMemoryStore {
    fn snapshots(&self, range: &DateRange) -> std::result::Result<Vec<Snapshot>, StoreError> {
        Ok(range.filter_snapshots(&self.snapshots))
    }
}

impl TransactionStore for InMemoryStore {
    fn transactions(&self, range: &DateRange) -> std::result::Result<Vec<Transaction>, StoreError> {
        Ok(range.filter_transactions(&self.transactions))
    }
}

/// Sorted snapshots plus the cash flows aggregated over the same range
struct LoadedSeries {
    snapshots: Vec<Snapshot>,
    cash_flows: CashFlowSeries,
}

/// Analytics over injected snapshot and transaction stores
pub struct PortfolioAnalytics {
    snapshot_store: Arc<dyn SnapshotStore>,
    transaction_store: Arc<dyn TransactionStore>,
    dividend_category: Option<String>,
    config: PerformanceConfig,
}

impl PortfolioAnalytics {
    pub fn new(
        snapshot_store: Arc<dyn SnapshotStore>,
        transaction_store: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            snapshot_store,
            transaction_store,
            dividend_category: None,
            config: PerformanceConfig::default(),
        }
    }

    /// Both stores served by one in-memory value
    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store)
    }

    /// Treat income in this category as dividends rather than contributions
    #[must_use]
    pub fn with_dividend_category(mut self, category: impl Into<String>) -> Self {
        self.dividend_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PerformanceConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    fn load(&self, range: &DateRange) -> Result<LoadedSeries> {
        self.config.validate()?;
        let snapshots = prepare_series(self.snapshot_store.snapshots(range)?)?;
        let transactions = self.transaction_store.transactions(range)?;
        let cash_flows =
            CashFlowSeries::from_transactions(&transactions, self.dividend_category.as_deref());
        tracing::debug!(
            snapshots = snapshots.len(),
            transactions = transactions.len(),
            cash_flow_months = cash_flows.records().len(),
            "loaded series"
        );
        Ok(LoadedSeries {
            snapshots,
            cash_flows,
        })
    }

    /// Metrics bundle for one reporting period
    pub fn performance(&self, period: Period, now: Date) -> Result<PerformanceMetrics> {
        let range = period.date_range(now)?;
        let series = self.load(&range)?;
        Ok(compute_performance(
            &series.snapshots,
            &series.cash_flows,
            &self.config,
        ))
    }

    /// Metrics for several periods from a single read of each store
    pub fn performance_by_period(
        &self,
        periods: &[Period],
        now: Date,
    ) -> Result<Vec<(Period, PerformanceMetrics)>> {
        let series = self.load(&DateRange::all_until(now))?;
        periods
            .iter()
            .map(|&period| -> Result<(Period, PerformanceMetrics)> {
                let metrics = performance_for_period(
                    &series.snapshots,
                    &series.cash_flows,
                    period,
                    now,
                    &self.config,
                )?;
                Ok((period, metrics))
            })
            .collect()
    }

    /// Rolling windows over the whole history up to `now`
    pub fn rolling(&self, window_months: usize, now: Date) -> Result<Vec<RollingWindowMetrics>> {
        let series = self.load(&DateRange::all_until(now))?;
        rolling_windows(
            &series.snapshots,
            &series.cash_flows,
            window_months,
            &self.config,
        )
    }

    /// Equity and bond return assumptions from the whole snapshot history
    pub fn historical_parameters(
        &self,
        config: &EstimationConfig,
        now: Date,
    ) -> Result<HistoricalParameters> {
        let range = DateRange::all_until(now);
        let snapshots = prepare_series(self.snapshot_store.snapshots(&range)?)?;
        Ok(estimate_parameters(&snapshots, config))
    }
}
