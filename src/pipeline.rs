use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use velo_fleet::{generate_uniform, simulate_fleet};
use velo_markov::{StationChain, TrajectoryTable};

use crate::cli::Cli;
use crate::config::VeloConfig;
use crate::convert::{self, Source};

/// Everything a subcommand needs: the resolved config, the observed fleet
/// and the chain fitted to it.
pub struct Session {
    pub config: VeloConfig,
    pub precision: usize,
    pub table: TrajectoryTable,
    pub chain: StationChain,
}

impl Session {
    /// Load config, produce trajectories and fit the chain.
    pub fn open(cli: &Cli) -> Result<Self> {
        let mut config = VeloConfig::load(cli.config.as_deref())?;
        if let Some(s) = cli.seed {
            config.seed = Some(s);
        }
        let precision = cli.precision.unwrap_or(config.report.precision);

        let mut rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };

        let table = load_trajectories(&config, &mut rng)?;
        info!(
            n_bicycles = table.n_bicycles(),
            n_stations = table.n_stations(),
            n_days = table.n_days(),
            "trajectories ready"
        );

        let chain = StationChain::fit(&table).context("failed to fit the station chain")?;
        Ok(Self {
            config,
            precision,
            table,
            chain,
        })
    }
}

/// Produce the trajectory table from the configured source.
fn load_trajectories(config: &VeloConfig, rng: &mut StdRng) -> Result<TrajectoryTable> {
    let fleet_cfg = convert::build_fleet_config(&config.fleet)?;
    match convert::parse_source(&config.fleet.source)? {
        Source::Uniform => {
            info!("drawing uniform trajectories");
            generate_uniform(&fleet_cfg, rng).context("failed to generate trajectories")
        }
        Source::Chain => {
            info!("simulating trajectories from the configured chain");
            let (transitions, initial) = convert::build_known_chain(&config.fleet)?;
            simulate_fleet(&transitions, &initial, &fleet_cfg, rng)
                .context("failed to simulate trajectories")
        }
    }
}
