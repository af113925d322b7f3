use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;
use networth::commands::{self, PeriodArg, STANDARD_PERIODS};
use networth::input::{load_fire, load_monte_carlo, load_portfolio};
use networth::{default_data_dir, init_logging, init_stderr_logging};
use networth_core::Period;

/// Net-worth performance, risk and retirement projections
#[derive(Parser, Debug)]
#[command(name = "networth", version, about)]
struct Args {
    /// Data directory for the log file (default: ~/.networth)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Log to stderr instead of the data directory
    #[arg(long, global = true)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Return and risk metrics for one or more reporting periods
    Performance {
        /// Portfolio YAML file
        portfolio: PathBuf,
        /// Periods to report (default: all standard periods)
        #[arg(short, long, value_enum)]
        period: Vec<PeriodArg>,
        /// Custom period start date, requires --to
        #[arg(long, requires = "to")]
        from: Option<Date>,
        /// Custom period end date
        #[arg(long, requires = "from")]
        to: Option<Date>,
        /// Treat this date as "now" (default: today)
        #[arg(long)]
        as_of: Option<Date>,
    },
    /// Metrics for every rolling window of the given width
    Rolling {
        portfolio: PathBuf,
        /// Window width in months
        #[arg(short, long, default_value_t = 12)]
        window: usize,
        #[arg(long)]
        as_of: Option<Date>,
    },
    /// Estimate equity and bond return assumptions from the history
    Estimate {
        portfolio: PathBuf,
        #[arg(long)]
        as_of: Option<Date>,
    },
    /// Withdrawal-phase Monte Carlo simulation
    MonteCarlo {
        /// Simulation YAML file
        config: PathBuf,
        /// Replace return assumptions with estimates from this portfolio file
        #[arg(long)]
        estimate_from: Option<PathBuf>,
        #[arg(long)]
        trials: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        as_of: Option<Date>,
    },
    /// Bear/base/bull projection to financial independence
    Fire {
        /// Projection YAML file
        config: PathBuf,
    },
}

fn run(command: Command) -> color_eyre::Result<String> {
    match command {
        Command::Performance {
            portfolio,
            period,
            from,
            to,
            as_of,
        } => {
            let portfolio = load_portfolio(&portfolio)?;
            let mut periods: Vec<Period> = period.into_iter().map(Period::from).collect();
            if let (Some(start), Some(end)) = (from, to) {
                periods.push(Period::Custom { start, end });
            }
            if periods.is_empty() {
                periods = STANDARD_PERIODS.iter().map(|&p| p.into()).collect();
            }
            let now = as_of.unwrap_or_else(commands::today);
            commands::to_json(&commands::performance(&portfolio, &periods, now)?)
        }
        Command::Rolling {
            portfolio,
            window,
            as_of,
        } => {
            let portfolio = load_portfolio(&portfolio)?;
            let now = as_of.unwrap_or_else(commands::today);
            commands::to_json(&commands::rolling(&portfolio, window, now)?)
        }
        Command::Estimate { portfolio, as_of } => {
            let portfolio = load_portfolio(&portfolio)?;
            let now = as_of.unwrap_or_else(commands::today);
            commands::to_json(&commands::estimate(&portfolio, now)?)
        }
        Command::MonteCarlo {
            config,
            estimate_from,
            trials,
            seed,
            as_of,
        } => {
            let mut config = load_monte_carlo(&config)?;
            if let Some(trials) = trials {
                config.num_trials = trials;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let history = estimate_from.map(|path| load_portfolio(&path)).transpose()?;
            let now = as_of.unwrap_or_else(commands::today);
            let result = commands::monte_carlo(config, history.as_ref().map(|p| (p, now)))?;
            commands::to_json(&result)
        }
        Command::Fire { config } => {
            let config = load_fire(&config)?;
            commands::to_json(&commands::fire(&config)?)
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if args.log_stderr {
        init_stderr_logging(&args.log_level);
    } else {
        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        init_logging(&data_dir, &args.log_level)?;
    }

    tracing::info!(command = ?args.command, "networth starting");
    let output = run(args.command)?;
    println!("{output}");
    tracing::info!("networth finished");

    Ok(())
}
