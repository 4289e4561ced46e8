//! Discrete-time Markov chain of bicycles moving between stations.
//!
//! This crate turns an observed bicycles × days table of station ids into an
//! initial distribution, a row-stochastic transition matrix and raw move
//! counts, and derives n-step and long-run distributions from them.
//!
//! # Pipeline
//!
//! ```text
//!                      ┌──────────────────┐
//!                 ┌───▶│ initial          │──────────────────────┐
//!                 │    └──────────────────┘                      ▼
//!  ┌────────────┐ │    ┌──────────────────┐   ┌─────────┐   ┌───────────┐
//!  │ trajectory │─┼───▶│ transition       │──▶│ power   │──▶│ propagate │
//!  └────────────┘ │    └──────────────────┘   └─────────┘   └───────────┘
//!                 │             │             ┌────────────┐
//!                 │             └────────────▶│ stationary │
//!                 │    ┌──────────────────┐   └────────────┘
//!                 └───▶│ counts           │
//!                      └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use velo_markov::{Propagation, StationChain, StationaryConfig, TrajectoryTable};
//!
//! let table = TrajectoryTable::new(2, vec![vec![1, 2, 1], vec![1, 1, 2]]).unwrap();
//! let chain = StationChain::fit(&table).unwrap();
//!
//! assert_eq!(chain.initial().as_slice(), &[1.0, 0.0]);
//! let day_3 = chain.distribution_after(3, Propagation::VectorMatrix).unwrap();
//! assert!((day_3.sum() - 1.0).abs() < 1e-9);
//!
//! let long_run = chain.stationary(&StationaryConfig::new()).unwrap();
//! assert!(long_run.converged());
//! ```

pub mod chain;
pub mod config;
pub mod counts;
pub mod error;
pub mod initial;
pub mod matrix;
pub mod power;
pub mod propagate;
pub mod stationary;
pub mod station;
pub mod trajectory;
pub mod transition;

pub use chain::StationChain;
pub use config::{StationaryConfig, StationaryMethod};
pub use counts::{TransitionCounts, TransitionKey, count_transitions};
pub use error::MarkovError;
pub use initial::initial_distribution;
pub use matrix::{Distribution, Matrix, ROW_SUM_TOLERANCE};
pub use power::matrix_power;
pub use propagate::{Propagation, distribution_after, propagate, propagate_n, propagate_row};
pub use station::Station;
pub use stationary::{StationaryEstimate, approximate_stationary, solve_stationary, stationary};
pub use trajectory::TrajectoryTable;
pub use transition::{TransitionMatrix, estimate_transition_matrix};
