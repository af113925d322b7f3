//! Tests for the FIRE projector

use crate::config::FireConfig;
use crate::fire::project_fire;
use crate::model::{ProjectionScenario, ScenarioKind};

fn flat(inflation_rate: f64) -> ProjectionScenario {
    ProjectionScenario {
        growth_rate: 0.0,
        inflation_rate,
    }
}

#[test]
fn test_flat_net_worth_with_inflating_target() {
    let config = FireConfig {
        initial_net_worth: 800_000.0,
        annual_savings: 0.0,
        annual_expenses: 40_000.0,
        max_years: 30,
        bear: flat(0.035),
        base: flat(0.025),
        bull: flat(0.02),
        ..Default::default()
    };
    for projection in project_fire(&config).unwrap() {
        let mut previous_number = 0.0;
        for point in &projection.path {
            assert_eq!(point.net_worth, 800_000.0);
            assert!(point.independence_number > previous_number);
            previous_number = point.independence_number;
        }
        assert_eq!(projection.years_to_independence, None);
    }
}

#[test]
fn test_flat_already_independent_stays_at_year_zero() {
    let config = FireConfig {
        initial_net_worth: 1_200_000.0,
        annual_savings: 0.0,
        annual_expenses: 40_000.0,
        bear: flat(0.03),
        base: flat(0.03),
        bull: flat(0.03),
        ..Default::default()
    };
    for projection in project_fire(&config).unwrap() {
        assert_eq!(projection.years_to_independence, Some(0));
        // Year 0 plus the default three-year tail
        assert_eq!(projection.path.len(), 4);
        assert!(projection.path.iter().all(|p| p.net_worth == 1_200_000.0));
    }
}

#[test]
fn test_year_cap_without_independence() {
    let config = FireConfig {
        initial_net_worth: 0.0,
        annual_savings: 1_000.0,
        annual_expenses: 100_000.0,
        max_years: 15,
        ..Default::default()
    };
    let projections = project_fire(&config).unwrap();
    assert_eq!(projections.len(), 3);
    for projection in &projections {
        assert_eq!(projection.path.len(), 16);
        assert_eq!(projection.path.last().map(|p| p.year), Some(15));
        assert_eq!(projection.years_to_independence, None);
    }
}

#[test]
fn test_scenario_overrides_are_used() {
    let config = FireConfig {
        initial_net_worth: 100_000.0,
        annual_expenses: 40_000.0,
        max_years: 1,
        bull: ProjectionScenario {
            growth_rate: 0.5,
            inflation_rate: 0.0,
        },
        ..Default::default()
    };
    let projections = project_fire(&config).unwrap();
    let bull = projections
        .iter()
        .find(|p| p.scenario == ScenarioKind::Bull)
        .unwrap();
    assert_eq!(bull.assumptions.growth_rate, 0.5);
    assert!((bull.path[1].net_worth - 150_000.0).abs() < 1e-9);
    assert_eq!(bull.path[1].annual_expenses, 40_000.0);
}
