use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{ProjectionScenario, ScenarioKind};

fn default_withdrawal_rate() -> f64 {
    0.04
}

fn default_max_years() -> u32 {
    60
}

fn default_tail_years() -> u32 {
    3
}

fn default_bear() -> ProjectionScenario {
    ProjectionScenario::BEAR
}

fn default_base() -> ProjectionScenario {
    ProjectionScenario::BASE
}

fn default_bull() -> ProjectionScenario {
    ProjectionScenario::BULL
}

/// FIRE projection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireConfig {
    pub initial_net_worth: f64,
    /// Nominal savings added every year; deliberately not inflation-adjusted
    #[serde(default)]
    pub annual_savings: f64,
    /// Today's annual spending
    pub annual_expenses: f64,
    /// Safe withdrawal rate (0.04 = 4% rule)
    #[serde(default = "default_withdrawal_rate")]
    pub withdrawal_rate: f64,
    /// Hard cap on projected years
    #[serde(default = "default_max_years")]
    pub max_years: u32,
    /// Years to keep projecting after every scenario has reached independence
    #[serde(default = "default_tail_years")]
    pub tail_years: u32,
    #[serde(default = "default_bear")]
    pub bear: ProjectionScenario,
    #[serde(default = "default_base")]
    pub base: ProjectionScenario,
    #[serde(default = "default_bull")]
    pub bull: ProjectionScenario,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            initial_net_worth: 0.0,
            annual_savings: 0.0,
            annual_expenses: 40_000.0,
            withdrawal_rate: default_withdrawal_rate(),
            max_years: default_max_years(),
            tail_years: default_tail_years(),
            bear: default_bear(),
            base: default_base(),
            bull: default_bull(),
        }
    }
}

impl FireConfig {
    #[must_use]
    pub fn scenario(&self, kind: ScenarioKind) -> ProjectionScenario {
        match kind {
            ScenarioKind::Bear => self.bear,
            ScenarioKind::Base => self.base,
            ScenarioKind::Bull => self.bull,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.withdrawal_rate > 0.0 && self.withdrawal_rate.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "withdrawal_rate",
                value: self.withdrawal_rate,
                reason: "must be positive",
            });
        }
        for (name, value) in [
            ("initial_net_worth", self.initial_net_worth),
            ("annual_savings", self.annual_savings),
            ("annual_expenses", self.annual_expenses),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        for kind in ScenarioKind::ALL {
            let scenario = self.scenario(kind);
            if !scenario.growth_rate.is_finite() || !scenario.inflation_rate.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name: "scenario",
                    value: scenario.growth_rate,
                    reason: "growth and inflation rates must be finite",
                });
            }
        }
        Ok(())
    }
}
