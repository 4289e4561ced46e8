use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Velo configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct VeloConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Fleet (trajectory source) settings.
    #[serde(default)]
    pub fleet: FleetToml,

    /// Chain estimation settings.
    #[serde(default)]
    pub chain: ChainToml,

    /// Output settings.
    #[serde(default)]
    pub report: ReportToml,
}

impl VeloConfig {
    /// Reads a configuration file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FleetToml {
    #[serde(default = "default_n_bicycles")]
    pub n_bicycles: usize,
    #[serde(default = "default_n_stations")]
    pub n_stations: usize,
    #[serde(default = "default_n_days")]
    pub n_days: usize,
    /// `"uniform"` or `"chain"`.
    #[serde(default = "default_source")]
    pub source: String,
    /// Row-stochastic matrix used when `source = "chain"`.
    #[serde(default)]
    pub transition_matrix: Option<Vec<Vec<f64>>>,
    /// Day-1 distribution used when `source = "chain"` (uniform when omitted).
    #[serde(default)]
    pub initial: Option<Vec<f64>>,
}

impl Default for FleetToml {
    fn default() -> Self {
        Self {
            n_bicycles: default_n_bicycles(),
            n_stations: default_n_stations(),
            n_days: default_n_days(),
            source: default_source(),
            transition_matrix: None,
            initial: None,
        }
    }
}

fn default_n_bicycles() -> usize {
    140
}
fn default_n_stations() -> usize {
    12
}
fn default_n_days() -> usize {
    30
}
fn default_source() -> String {
    "uniform".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainToml {
    /// `"power"` or `"exact"`.
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub tolerance: Option<f64>,
    /// `"matrix-vector"` or `"vector-matrix"`.
    #[serde(default = "default_propagation")]
    pub propagation: String,
}

impl Default for ChainToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            iterations: default_iterations(),
            tolerance: None,
            propagation: default_propagation(),
        }
    }
}

fn default_method() -> String {
    "power".to_string()
}
fn default_iterations() -> usize {
    velo_markov::config::DEFAULT_ITERATIONS
}
fn default_propagation() -> String {
    "matrix-vector".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportToml {
    /// Decimal digits printed for probabilities.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for ReportToml {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    5
}
