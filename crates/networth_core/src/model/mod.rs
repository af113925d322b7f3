mod cash_flow;
mod metrics;
mod results;
mod scenario;
mod snapshot;

pub use cash_flow::{CashFlowRecord, Transaction, TransactionKind};
pub use metrics::{DrawdownAnalysis, PerformanceMetrics, RollingWindowMetrics};
pub use results::{
    FailureStatistics, HistogramBin, PercentileBand, SimulationResult, SimulationRun,
};
pub use scenario::{FireProjection, ProjectionPoint, ProjectionScenario, ScenarioKind};
pub use snapshot::{Snapshot, prepare_series};
