//! Monthly net-worth snapshots
//!
//! A snapshot records the owner's total net worth (and its split by asset
//! class) for one calendar month. The store owns upsert semantics; the engine
//! only needs an ordered, de-duplicated series.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{month_index, month_start};
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub year: i16,
    /// Calendar month, 1..=12
    pub month: i8,
    pub total_net_worth: f64,
    /// Amount held per asset class (e.g. "stocks", "bonds", "cash")
    #[serde(default)]
    pub by_asset_class: BTreeMap<String, f64>,
    /// Back-filled by the store rather than recorded by the owner
    #[serde(default)]
    pub synthetic: bool,
}

impl Snapshot {
    #[must_use]
    pub fn new(year: i16, month: i8, total_net_worth: f64) -> Self {
        Self {
            year,
            month,
            total_net_worth,
            by_asset_class: BTreeMap::new(),
            synthetic: false,
        }
    }

    /// Builder-style helper to attach an asset-class amount
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>, amount: f64) -> Self {
        self.by_asset_class.insert(class.into(), amount);
        self
    }

    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Ordering key as a flat month index
    #[inline]
    #[must_use]
    pub fn month_index(&self) -> i32 {
        month_index(self.year, self.month)
    }

    /// First day of the snapshot's month
    pub fn date(&self) -> Result<Date, DataError> {
        month_start(self.year, self.month)
    }
}

/// Validate and order a snapshot series.
///
/// Sorts ascending by `(year, month)`. When the same month appears more than
/// once, the snapshot supplied last wins.
pub fn prepare_series(snapshots: Vec<Snapshot>) -> Result<Vec<Snapshot>, DataError> {
    let mut by_month: BTreeMap<i32, Snapshot> = BTreeMap::new();
    for snapshot in snapshots {
        if !(1..=12).contains(&snapshot.month) {
            return Err(DataError::InvalidMonth {
                year: snapshot.year,
                month: snapshot.month,
            });
        }
        by_month.insert(snapshot.month_index(), snapshot);
    }
    Ok(by_month.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_series_sorts_and_dedups_last_wins() {
        let series = prepare_series(vec![
            Snapshot::new(2024, 3, 300.0),
            Snapshot::new(2024, 1, 100.0),
            Snapshot::new(2024, 3, 333.0),
            Snapshot::new(2023, 12, 50.0),
        ])
        .unwrap();

        let values: Vec<f64> = series.iter().map(|s| s.total_net_worth).collect();
        assert_eq!(values, vec![50.0, 100.0, 333.0]);
    }

    #[test]
    fn test_prepare_series_rejects_bad_month() {
        let err = prepare_series(vec![Snapshot::new(2024, 0, 1.0)]).unwrap_err();
        assert_eq!(err, DataError::InvalidMonth { year: 2024, month: 0 });
    }

    #[test]
    fn test_snapshot_yaml_defaults() {
        let json = r#"{"year":2024,"month":5,"total_net_worth":1000.0}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(!snapshot.synthetic);
        assert!(snapshot.by_asset_class.is_empty());
        assert_eq!(snapshot.date().unwrap(), jiff::civil::date(2024, 5, 1));
    }
}
