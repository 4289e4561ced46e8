use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Velo bicycle-station Markov chain analysis.
#[derive(Parser)]
#[command(
    name = "velo",
    version,
    about = "Markov chain analysis of bicycles moving between stations"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (defaults are used when omitted).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Override the number of decimal digits printed.
    #[arg(short, long, global = true)]
    pub precision: Option<usize>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the usage guide.
    Guide,
    /// Show the station of every bicycle on every day.
    Trajectories,
    /// Show the distribution of bicycles on day 1.
    Initial,
    /// Show the transition matrix.
    Matrix,
    /// Show the transition matrix raised to a power and the distribution on that day.
    Day(DayArgs),
    /// Show raw transition counts per origin station.
    Counts,
    /// Show the long-run (stationary) distribution.
    Stationary(StationaryArgs),
    /// Show everything above in one report.
    Report(ReportArgs),
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    /// Number of steps (days) to propagate the initial distribution.
    #[arg(short, long)]
    pub n: u32,

    /// Override the propagation convention from config (`matrix-vector` or `vector-matrix`).
    #[arg(long)]
    pub propagation: Option<String>,
}

/// Arguments for the `stationary` subcommand.
#[derive(clap::Args)]
pub struct StationaryArgs {
    /// Solve the stationary equations directly instead of iterating.
    #[arg(long)]
    pub exact: bool,

    /// Override the power-iteration budget from config.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Stop early once rows agree within this tolerance.
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Arguments for the `report` subcommand.
#[derive(clap::Args)]
pub struct ReportArgs {
    /// Day used for the n-step section.
    #[arg(short, long, default_value_t = 2)]
    pub n: u32,

    /// Solve the stationary equations directly instead of iterating.
    #[arg(long)]
    pub exact: bool,
}
