use serde::{Deserialize, Serialize};

use super::ReturnAssumption;

// Long-run market defaults used when the owner's own history is too short.
// Chosen as round, conservative figures for a diversified equity index and an
// intermediate-term bond index; not fitted to any particular dataset.
pub const DEFAULT_EQUITY_RETURN: ReturnAssumption = ReturnAssumption::new(0.07, 0.15);
pub const DEFAULT_BOND_RETURN: ReturnAssumption = ReturnAssumption::new(0.03, 0.05);

fn default_equity_class() -> String {
    "stocks".to_string()
}

fn default_bond_class() -> String {
    "bonds".to_string()
}

fn default_min_history_months() -> usize {
    24
}

fn default_min_valid_points() -> usize {
    12
}

/// How to derive return assumptions from the owner's snapshot history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Asset-class key treated as equity
    #[serde(default = "default_equity_class")]
    pub equity_class: String,
    /// Asset-class key treated as bonds
    #[serde(default = "default_bond_class")]
    pub bond_class: String,
    /// Minimum number of real (non-synthetic) monthly snapshots
    #[serde(default = "default_min_history_months")]
    pub min_history_months: usize,
    /// Minimum surviving month-over-month changes per class
    #[serde(default = "default_min_valid_points")]
    pub min_valid_points: usize,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            equity_class: default_equity_class(),
            bond_class: default_bond_class(),
            min_history_months: default_min_history_months(),
            min_valid_points: default_min_valid_points(),
        }
    }
}
