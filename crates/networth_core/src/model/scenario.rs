use serde::{Deserialize, Serialize};

/// Named macro scenario driving a FIRE projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Bear,
    Base,
    Bull,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [ScenarioKind::Bear, ScenarioKind::Base, ScenarioKind::Bull];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::Bear => "Bear",
            ScenarioKind::Base => "Base",
            ScenarioKind::Bull => "Bull",
        }
    }
}

/// Growth and inflation assumptions for one scenario (fractions, 0.07 = 7%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionScenario {
    pub growth_rate: f64,
    pub inflation_rate: f64,
}

impl ProjectionScenario {
    pub const BEAR: ProjectionScenario = ProjectionScenario {
        growth_rate: 0.04,
        inflation_rate: 0.035,
    };
    pub const BASE: ProjectionScenario = ProjectionScenario {
        growth_rate: 0.07,
        inflation_rate: 0.025,
    };
    pub const BULL: ProjectionScenario = ProjectionScenario {
        growth_rate: 0.10,
        inflation_rate: 0.02,
    };
}

/// State of one scenario at the end of a projected year (year 0 = today)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub net_worth: f64,
    pub annual_expenses: f64,
    /// Net worth needed to cover `annual_expenses` at the withdrawal rate
    pub independence_number: f64,
    pub reached: bool,
}

/// Full projection for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireProjection {
    pub scenario: ScenarioKind,
    pub assumptions: ProjectionScenario,
    pub path: Vec<ProjectionPoint>,
    /// First year net worth met the independence number, if ever
    pub years_to_independence: Option<u32>,
}

impl FireProjection {
    /// Independence number in the year it was first reached
    #[must_use]
    pub fn independence_number_at_target(&self) -> Option<f64> {
        let year = self.years_to_independence?;
        self.path
            .iter()
            .find(|p| p.year == year)
            .map(|p| p.independence_number)
    }
}
