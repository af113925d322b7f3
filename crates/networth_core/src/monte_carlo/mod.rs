//! Monte Carlo withdrawal-phase simulation.
//!
//! - [`sampler`]: Box-Muller and Student's t annual return draws
//! - [`simulation`]: seeded, batched trial execution
//! - [`summary`]: percentile bands, failure statistics and histogram
//! - [`historical`]: return assumptions estimated from snapshot history

pub mod historical;
pub mod sampler;
pub mod simulation;
pub mod summary;

pub use historical::{ClassEstimate, HistoricalParameters, ParameterSource, estimate_parameters};
pub use sampler::{BoxMuller, PortfolioSampler, ReturnSampler, box_muller};
pub use simulation::{BATCH_SIZE, monte_carlo_simulate, run_trial, simulate_trials};
pub use summary::{HISTOGRAM_BINS, percentile, summarize};
