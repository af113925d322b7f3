//! Deterministic multi-scenario FIRE projection.
//!
//! All three scenarios advance in lockstep so their paths share the same
//! years. Savings are nominal and constant; expenses inflate at each
//! scenario's own rate.

use crate::config::FireConfig;
use crate::error::ConfigError;
use crate::model::{FireProjection, ProjectionPoint, ProjectionScenario, ScenarioKind};

struct ScenarioState {
    kind: ScenarioKind,
    assumptions: ProjectionScenario,
    net_worth: f64,
    expenses: f64,
    path: Vec<ProjectionPoint>,
    reached_at: Option<u32>,
}

impl ScenarioState {
    fn new(kind: ScenarioKind, config: &FireConfig) -> Self {
        Self {
            kind,
            assumptions: config.scenario(kind),
            net_worth: config.initial_net_worth,
            expenses: config.annual_expenses,
            path: Vec::with_capacity(config.max_years as usize + 1),
            reached_at: None,
        }
    }

    fn record(&mut self, year: u32, withdrawal_rate: f64) {
        let independence_number = self.expenses / withdrawal_rate;
        let reached = self.net_worth >= independence_number;
        if reached && self.reached_at.is_none() {
            self.reached_at = Some(year);
        }
        self.path.push(ProjectionPoint {
            year,
            net_worth: self.net_worth,
            annual_expenses: self.expenses,
            independence_number,
            reached,
        });
    }

    fn advance(&mut self, year: u32, config: &FireConfig) {
        self.net_worth = self.net_worth * (1.0 + self.assumptions.growth_rate) + config.annual_savings;
        self.expenses *= 1.0 + self.assumptions.inflation_rate;
        self.record(year, config.withdrawal_rate);
    }

    fn finish(self) -> FireProjection {
        FireProjection {
            scenario: self.kind,
            assumptions: self.assumptions,
            path: self.path,
            years_to_independence: self.reached_at,
        }
    }
}

fn all_reached(states: &[ScenarioState]) -> bool {
    states.iter().all(|s| s.reached_at.is_some())
}

/// Project bear, base and bull scenarios.
///
/// Year 0 compares today's net worth with today's (un-inflated) independence
/// number. Projection ends at `max_years`, or `tail_years` after the last
/// scenario reaches independence, whichever comes first.
pub fn project_fire(config: &FireConfig) -> Result<Vec<FireProjection>, ConfigError> {
    config.validate()?;

    let mut states: Vec<ScenarioState> = ScenarioKind::ALL
        .iter()
        .map(|&kind| ScenarioState::new(kind, config))
        .collect();
    for state in &mut states {
        state.record(0, config.withdrawal_rate);
    }

    let mut all_reached_at = all_reached(&states).then_some(0u32);

    for year in 1..=config.max_years {
        if let Some(at) = all_reached_at
            && year > at.saturating_add(config.tail_years)
        {
            break;
        }
        for state in &mut states {
            state.advance(year, config);
        }
        if all_reached_at.is_none() && all_reached(&states) {
            all_reached_at = Some(year);
        }
    }

    tracing::debug!(
        years = states.first().map_or(0, |s| s.path.len().saturating_sub(1)),
        all_reached_at,
        "fire projection complete"
    );
    Ok(states.into_iter().map(ScenarioState::finish).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(projections: &[FireProjection], kind: ScenarioKind) -> &FireProjection {
        projections
            .iter()
            .find(|p| p.scenario == kind)
            .expect("scenario present")
    }

    #[test]
    fn test_three_scenarios_in_order() {
        let projections = project_fire(&FireConfig {
            initial_net_worth: 100_000.0,
            annual_savings: 30_000.0,
            annual_expenses: 40_000.0,
            ..Default::default()
        })
        .unwrap();
        let kinds: Vec<ScenarioKind> = projections.iter().map(|p| p.scenario).collect();
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
    }

    #[test]
    fn test_bull_reaches_first() {
        let projections = project_fire(&FireConfig {
            initial_net_worth: 100_000.0,
            annual_savings: 40_000.0,
            annual_expenses: 40_000.0,
            ..Default::default()
        })
        .unwrap();
        let bear = projection(&projections, ScenarioKind::Bear).years_to_independence.unwrap();
        let base = projection(&projections, ScenarioKind::Base).years_to_independence.unwrap();
        let bull = projection(&projections, ScenarioKind::Bull).years_to_independence.unwrap();
        assert!(bull <= base && base <= bear);

        // Stops three years after the slowest scenario
        let last_year = projections[0].path.last().unwrap().year;
        assert_eq!(last_year, bear + 3);
    }

    #[test]
    fn test_growth_and_savings_step() {
        let projections = project_fire(&FireConfig {
            initial_net_worth: 1_000.0,
            annual_savings: 100.0,
            annual_expenses: 100.0,
            withdrawal_rate: 0.01,
            max_years: 2,
            ..Default::default()
        })
        .unwrap();
        let base = projection(&projections, ScenarioKind::Base);
        assert_eq!(base.path.len(), 3);
        assert!((base.path[1].net_worth - 1_170.0).abs() < 1e-9);
        assert!((base.path[1].annual_expenses - 102.5).abs() < 1e-9);
        assert!((base.path[1].independence_number - 10_250.0).abs() < 1e-9);
        assert_eq!(base.years_to_independence, None);
    }

    #[test]
    fn test_flat_scenario_never_catches_inflating_target() {
        let flat = ProjectionScenario {
            growth_rate: 0.0,
            inflation_rate: 0.03,
        };
        let config = FireConfig {
            initial_net_worth: 500_000.0,
            annual_savings: 0.0,
            annual_expenses: 40_000.0,
            max_years: 20,
            bear: flat,
            base: flat,
            bull: flat,
            ..Default::default()
        };
        let projections = project_fire(&config).unwrap();
        for p in &projections {
            assert!(p.path.iter().all(|pt| pt.net_worth == 500_000.0));
            assert_eq!(p.years_to_independence, None);
            assert_eq!(p.path.len(), 21);
        }
    }

    #[test]
    fn test_already_independent_at_year_zero() {
        let config = FireConfig {
            initial_net_worth: 2_000_000.0,
            annual_expenses: 40_000.0,
            ..Default::default()
        };
        let projections = project_fire(&config).unwrap();
        for p in &projections {
            assert_eq!(p.years_to_independence, Some(0));
            assert!((p.independence_number_at_target().unwrap() - 1_000_000.0).abs() < 1e-6);
            // year 0 plus the three-year tail
            assert_eq!(p.path.len(), 4);
        }
    }

    #[test]
    fn test_zero_withdrawal_rate_rejected() {
        let config = FireConfig {
            withdrawal_rate: 0.0,
            ..Default::default()
        };
        assert!(project_fire(&config).is_err());
    }
}
