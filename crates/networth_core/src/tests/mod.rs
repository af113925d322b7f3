//! Integration tests for the analytics engine
//!
//! Tests are organized by topic:
//! - `performance` - Metrics bundle, cash-flow attribution, periods
//! - `monte_carlo` - Simulation determinism and aggregation
//! - `fire` - Scenario projection behavior
//! - `properties` - Property-based invariants across all components

mod fire;
mod performance;
mod properties;

use crate::model::Snapshot;

/// Consecutive monthly snapshots starting in January of `start_year`
pub(crate) fn monthly_series(start_year: i16, values: &[f64]) -> Vec<Snapshot> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Snapshot::new(start_year + (i / 12) as i16, (i % 12) as i8 + 1, v))
        .collect()
}
