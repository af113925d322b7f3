//! Command implementations
//!
//! Each command returns a serializable report; `main` decides how to print it.

use clap::ValueEnum;
use color_eyre::eyre::Result;
use jiff::civil::Date;
use networth_core::config::{FireConfig, MonteCarloConfig};
use networth_core::model::{
    FireProjection, PerformanceMetrics, RollingWindowMetrics, SimulationResult,
};
use networth_core::{HistoricalParameters, Period, monte_carlo_simulate, project_fire};
use serde::Serialize;

use crate::input::PortfolioFile;

/// Reporting periods selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Ytd,
    #[value(name = "1y")]
    OneYear,
    #[value(name = "3y")]
    ThreeYears,
    #[value(name = "5y")]
    FiveYears,
    All,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Ytd => Period::YearToDate,
            PeriodArg::OneYear => Period::ONE_YEAR,
            PeriodArg::ThreeYears => Period::THREE_YEARS,
            PeriodArg::FiveYears => Period::FIVE_YEARS,
            PeriodArg::All => Period::AllTime,
        }
    }
}

/// Every standard period, in display order
pub const STANDARD_PERIODS: [PeriodArg; 5] = [
    PeriodArg::Ytd,
    PeriodArg::OneYear,
    PeriodArg::ThreeYears,
    PeriodArg::FiveYears,
    PeriodArg::All,
];

#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub label: String,
    pub period: Period,
    pub metrics: PerformanceMetrics,
}

/// Today's date in the system time zone
#[must_use]
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

pub fn performance(
    portfolio: &PortfolioFile,
    periods: &[Period],
    now: Date,
) -> Result<Vec<PeriodReport>> {
    let reports = portfolio
        .analytics()
        .performance_by_period(periods, now)?
        .into_iter()
        .map(|(period, metrics)| PeriodReport {
            label: period.label(),
            period,
            metrics,
        })
        .collect::<Vec<_>>();
    tracing::info!(periods = reports.len(), %now, "computed performance");
    Ok(reports)
}

pub fn rolling(
    portfolio: &PortfolioFile,
    window_months: usize,
    now: Date,
) -> Result<Vec<RollingWindowMetrics>> {
    let windows = portfolio.analytics().rolling(window_months, now)?;
    tracing::info!(window_months, windows = windows.len(), "computed rolling windows");
    Ok(windows)
}

pub fn estimate(portfolio: &PortfolioFile, now: Date) -> Result<HistoricalParameters> {
    Ok(portfolio
        .analytics()
        .historical_parameters(&portfolio.estimation, now)?)
}

/// Run the simulation, optionally replacing the return assumptions with
/// estimates from the owner's history first.
pub fn monte_carlo(
    mut config: MonteCarloConfig,
    history: Option<(&PortfolioFile, Date)>,
) -> Result<SimulationResult> {
    if let Some((portfolio, now)) = history {
        let params = estimate(portfolio, now)?;
        tracing::info!(
            equity_source = ?params.equity.source,
            bond_source = ?params.bond.source,
            "using estimated return assumptions"
        );
        params.apply_to(&mut config);
    }
    let result = monte_carlo_simulate(&config)?;
    tracing::info!(
        trials = result.num_trials,
        success_rate = result.success_rate,
        "simulation finished"
    );
    Ok(result)
}

pub fn fire(config: &FireConfig) -> Result<Vec<FireProjection>> {
    let projections = project_fire(config)?;
    for projection in &projections {
        tracing::info!(
            scenario = projection.scenario.label(),
            years = ?projection.years_to_independence,
            "projected independence"
        );
    }
    Ok(projections)
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
