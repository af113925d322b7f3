//! YAML input files
//!
//! A portfolio file carries the snapshot history and transaction ledger plus
//! optional analysis settings. Simulation and projection parameters live in
//! their own files so the same history can be run against many scenarios.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use networth_core::config::{EstimationConfig, FireConfig, MonteCarloConfig, PerformanceConfig};
use networth_core::model::{Snapshot, Transaction};
use networth_core::{InMemoryStore, PortfolioAnalytics};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Snapshot history and ledger as stored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioFile {
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Income category whose transactions are dividends, not contributions
    #[serde(default)]
    pub dividend_category: Option<String>,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub estimation: EstimationConfig,
}

impl PortfolioFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Analytics facade backed by this file's history
    #[must_use]
    pub fn analytics(&self) -> PortfolioAnalytics {
        let store = InMemoryStore::new(self.snapshots.clone(), self.transactions.clone());
        let analytics = PortfolioAnalytics::in_memory(store).with_config(self.performance);
        match &self.dividend_category {
            Some(category) => analytics.with_dividend_category(category.clone()),
            None => analytics,
        }
    }
}

fn load_yaml<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {what} file {}", path.display()))?;
    serde_saphyr::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse {what} file {}", path.display()))
}

pub fn load_portfolio(path: &Path) -> Result<PortfolioFile> {
    let portfolio: PortfolioFile = load_yaml(path, "portfolio")?;
    portfolio
        .performance
        .validate()
        .wrap_err_with(|| format!("Invalid performance settings in {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        snapshots = portfolio.snapshots.len(),
        transactions = portfolio.transactions.len(),
        "loaded portfolio"
    );
    Ok(portfolio)
}

pub fn load_monte_carlo(path: &Path) -> Result<MonteCarloConfig> {
    load_yaml(path, "simulation")
}

pub fn load_fire(path: &Path) -> Result<FireConfig> {
    load_yaml(path, "projection")
}
