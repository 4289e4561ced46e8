//! Conversion from TOML config structs to library config types.

use anyhow::{Context, Result, bail};

use velo_fleet::FleetConfig;
use velo_markov::{Distribution, Matrix, Propagation, StationaryConfig, StationaryMethod, TransitionMatrix};

use crate::config::{ChainToml, FleetToml};

/// Where the trajectory table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Uniform,
    Chain,
}

/// Parse a stationary method string.
pub fn parse_method(s: &str) -> Result<StationaryMethod> {
    match s.to_lowercase().as_str() {
        "power" | "power-iteration" => Ok(StationaryMethod::PowerIteration),
        "exact" => Ok(StationaryMethod::Exact),
        other => bail!("unknown stationary method: {other:?}"),
    }
}

/// Parse a propagation convention string.
pub fn parse_propagation(s: &str) -> Result<Propagation> {
    match s.to_lowercase().as_str() {
        "matrix-vector" => Ok(Propagation::MatrixVector),
        "vector-matrix" => Ok(Propagation::VectorMatrix),
        other => bail!("unknown propagation: {other:?}"),
    }
}

/// Parse a fleet source string.
pub fn parse_source(s: &str) -> Result<Source> {
    match s.to_lowercase().as_str() {
        "uniform" => Ok(Source::Uniform),
        "chain" => Ok(Source::Chain),
        other => bail!("unknown fleet source: {other:?}"),
    }
}

/// Build a `FleetConfig` from TOML.
pub fn build_fleet_config(toml: &FleetToml) -> Result<FleetConfig> {
    let cfg = FleetConfig::new()
        .with_n_bicycles(toml.n_bicycles)
        .with_n_stations(toml.n_stations)
        .with_n_days(toml.n_days);
    cfg.validate().context("invalid [fleet] config")?;
    Ok(cfg)
}

/// Build a `StationaryConfig` from TOML, applying CLI overrides.
pub fn build_stationary_config(
    toml: &ChainToml,
    exact: bool,
    iterations: Option<usize>,
    tolerance: Option<f64>,
) -> Result<StationaryConfig> {
    let method = if exact {
        StationaryMethod::Exact
    } else {
        parse_method(&toml.method)?
    };
    let cfg = StationaryConfig::new()
        .with_method(method)
        .with_iterations(iterations.unwrap_or(toml.iterations))
        .with_tolerance(tolerance.or(toml.tolerance));
    cfg.validate().context("invalid [chain] config")?;
    Ok(cfg)
}

/// Build the known chain used when `source = "chain"`.
///
/// The initial distribution defaults to uniform over the stations.
pub fn build_known_chain(toml: &FleetToml) -> Result<(TransitionMatrix, Distribution)> {
    let Some(rows) = toml.transition_matrix.clone() else {
        bail!("[fleet] source = \"chain\" requires transition_matrix");
    };
    let matrix = Matrix::from_rows(rows).context("invalid [fleet] transition_matrix")?;
    let transitions =
        TransitionMatrix::from_probs(matrix).context("invalid [fleet] transition_matrix")?;
    let n = transitions.n_stations();
    let initial = match &toml.initial {
        Some(v) => Distribution::from_vec(v.clone()).context("invalid [fleet] initial")?,
        None if n == 0 => bail!("[fleet] transition_matrix has no stations"),
        None => Distribution::from_vec(vec![1.0 / n as f64; n])?,
    };
    Ok((transitions, initial))
}
