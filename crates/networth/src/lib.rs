//! Command-line front end for the `networth_core` analytics engine
//!
//! Reads a portfolio history and scenario parameters from YAML, runs the
//! requested analysis and prints the result as JSON.

pub mod commands;
pub mod input;
pub mod logging;

pub use logging::{default_data_dir, init_logging, init_stderr_logging};
