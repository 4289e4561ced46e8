//! Synthetic bicycle trajectories.

use tracing::debug;
use velo_markov::{Distribution, Station, TrajectoryTable, TransitionMatrix};

use crate::config::FleetConfig;
use crate::error::FleetError;

/// Draws every observation uniformly from `1..=n_stations`.
///
/// Each bicycle's station on each day is independent of every other draw.
#[tracing::instrument(skip_all, fields(n_bicycles = config.n_bicycles(), n_stations = config.n_stations(), n_days = config.n_days()))]
pub fn generate_uniform(
    config: &FleetConfig,
    rng: &mut impl rand::Rng,
) -> Result<TrajectoryTable, FleetError> {
    config.validate()?;
    let s = config.n_stations();
    let rows: Vec<Vec<usize>> = (0..config.n_bicycles())
        .map(|_| (0..config.n_days()).map(|_| rng.random_range(1..=s)).collect())
        .collect();
    debug!("uniform trajectories generated");
    Ok(TrajectoryTable::new(s, rows)?)
}

/// Samples a station from a distribution using its cumulative sum.
///
/// Falls back to the last station with positive probability if rounding
/// prevents a match.
pub fn sample_station(
    distribution: &Distribution,
    rng: &mut impl rand::Rng,
) -> Result<Station, FleetError> {
    let mass = distribution.sum();
    if mass <= 0.0 {
        return Err(FleetError::EmptyDistribution);
    }
    let u: f64 = rng.random::<f64>() * mass;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &p) in distribution.as_slice().iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        last_positive = Some(Station::from_index(i));
        cumulative += p;
        if cumulative >= u {
            return Ok(Station::from_index(i));
        }
    }
    last_positive.ok_or(FleetError::EmptyDistribution)
}

/// Simulates one bicycle's stations for `n_days` days, starting at `start`.
///
/// The first entry is `start`; each following day is drawn from the
/// transition row of the previous day's station.
pub fn simulate_trajectory(
    transitions: &TransitionMatrix,
    start: Station,
    n_days: usize,
    rng: &mut impl rand::Rng,
) -> Vec<usize> {
    let mut out = Vec::with_capacity(n_days);
    if n_days == 0 {
        return out;
    }
    let mut current = start;
    out.push(current.id());
    for _ in 1..n_days {
        current = transitions.sample(current, rng);
        out.push(current.id());
    }
    out
}

/// Simulates a whole fleet moving according to a known chain.
///
/// Day-1 stations are drawn from `initial`; later days follow `transitions`.
/// A station whose transition row is all zero keeps its bicycles in place.
///
/// # Errors
///
/// - [`FleetError::StationMismatch`] if the chain size differs from `config.n_stations()`.
/// - [`FleetError::EmptyDistribution`] if `initial` has no mass.
#[tracing::instrument(skip_all, fields(n_bicycles = config.n_bicycles(), n_days = config.n_days()))]
pub fn simulate_fleet(
    transitions: &TransitionMatrix,
    initial: &Distribution,
    config: &FleetConfig,
    rng: &mut impl rand::Rng,
) -> Result<TrajectoryTable, FleetError> {
    config.validate()?;
    let s = config.n_stations();
    for chain in [transitions.n_stations(), initial.len()] {
        if chain != s {
            return Err(FleetError::StationMismatch { config: s, chain });
        }
    }

    let mut rows = Vec::with_capacity(config.n_bicycles());
    for _ in 0..config.n_bicycles() {
        let start = sample_station(initial, rng)?;
        rows.push(simulate_trajectory(transitions, start, config.n_days(), rng));
    }
    debug!("fleet simulated from chain");
    Ok(TrajectoryTable::new(s, rows)?)
}
