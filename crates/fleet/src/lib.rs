//! Synthetic trajectory source for the velo station chain.
//!
//! Produces [`TrajectoryTable`](velo_markov::TrajectoryTable)s either with
//! independent uniform draws or by simulating a known transition matrix.
//! Every generator takes the random source as an argument, so results are
//! reproducible from a seed.
//!
//! # Quick start
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use velo_fleet::{FleetConfig, generate_uniform};
//!
//! let config = FleetConfig::new().with_n_bicycles(10);
//! let mut rng = StdRng::seed_from_u64(42);
//! let table = generate_uniform(&config, &mut rng).unwrap();
//! assert_eq!(table.n_bicycles(), 10);
//! assert_eq!(table.n_days(), 30);
//! ```

pub mod config;
pub mod error;
pub mod generate;

pub use config::FleetConfig;
pub use error::FleetError;
pub use generate::{generate_uniform, sample_station, simulate_fleet, simulate_trajectory};
