//! Transition matrix estimation from observed trajectories.

use ndarray::{Array2, ArrayView1};
use tracing::warn;

use crate::error::MarkovError;
use crate::matrix::{Matrix, ROW_SUM_TOLERANCE};
use crate::station::Station;
use crate::trajectory::TrajectoryTable;

/// An `S × S` row-stochastic transition matrix between stations.
///
/// Row `i` holds the probabilities of a bicycle at station `i` being at each
/// station on the following day. A station never observed as an origin has
/// an all-zero row: no outgoing mass is invented for it, so later matrix
/// powers carry zero mass out of that station.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    probs: Matrix,
    /// Number of observed moves out of each station before normalisation.
    row_totals: Vec<u64>,
}

impl TransitionMatrix {
    /// Wraps an existing matrix of probabilities.
    ///
    /// Row totals are unknown for a matrix that was not estimated from data;
    /// they are set to 1 for stochastic rows and 0 for zero rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a row is neither stochastic nor all-zero.
    pub fn from_probs(probs: Matrix) -> Result<Self, MarkovError> {
        probs.validate_stochastic(ROW_SUM_TOLERANCE)?;
        let row_totals = probs
            .row_sums()
            .into_iter()
            .map(|s| u64::from(s > 0.0))
            .collect();
        Ok(Self { probs, row_totals })
    }

    /// Returns the number of stations `S`.
    pub fn n_stations(&self) -> usize {
        self.probs.n()
    }

    /// Returns the full probability matrix.
    pub fn probs(&self) -> &Matrix {
        &self.probs
    }

    /// Returns the probability of moving from one station to another.
    pub fn prob(&self, from: Station, to: Station) -> f64 {
        self.probs.prob(from, to)
    }

    /// Returns the transition probabilities out of a station.
    pub fn row(&self, from: Station) -> ArrayView1<'_, f64> {
        self.probs.row(from.as_index())
    }

    /// Returns the number of observed moves out of each station.
    pub fn row_totals(&self) -> &[u64] {
        &self.row_totals
    }

    /// Returns the number of observed moves out of a station.
    pub fn row_total(&self, from: Station) -> u64 {
        self.row_totals[from.as_index()]
    }

    /// Returns the stations whose row is all zero (never observed as an origin).
    pub fn unvisited_origins(&self) -> Vec<Station> {
        self.row_totals
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == 0)
            .map(|(i, _)| Station::from_index(i))
            .collect()
    }

    /// Validates that every row sums to 1.0 or is all zero (tolerance 1e-9).
    pub fn validate(&self) -> Result<(), MarkovError> {
        self.probs.validate_stochastic(ROW_SUM_TOLERANCE)
    }

    /// Samples the next station given the current one, using the cumulative row.
    ///
    /// Draws a uniform random number and returns the first station whose
    /// cumulative probability meets or exceeds it. A station with an all-zero
    /// row keeps the bicycle where it is. Falls back to the last station with
    /// positive probability if rounding prevents a match.
    pub fn sample(&self, from: Station, rng: &mut impl rand::Rng) -> Station {
        let row = self.row(from);
        if self.row_total(from) == 0 {
            return from;
        }
        let u: f64 = rng.random();
        let mut cumulative = 0.0;
        let mut last_positive = from;
        for (j, &p) in row.iter().enumerate() {
            if p <= 0.0 {
                continue;
            }
            last_positive = Station::from_index(j);
            cumulative += p;
            if cumulative >= u {
                return last_positive;
            }
        }
        last_positive
    }
}

/// Estimates the transition matrix from consecutive day pairs.
///
/// For every bicycle and every day `k`, the move from the day-`k` station to
/// the day-`k+1` station increments `counts[origin][destination]`. Each row is
/// then divided by its total. Rows with no observed moves stay all zero and
/// are logged as a warning.
///
/// The result depends only on `table`: repeated calls return identical matrices.
#[tracing::instrument(skip_all, fields(n_bicycles = table.n_bicycles(), n_days = table.n_days(), n_stations = table.n_stations()))]
pub fn estimate_transition_matrix(table: &TrajectoryTable) -> TransitionMatrix {
    let s = table.n_stations();

    let mut counts = Array2::<f64>::zeros((s, s));
    let mut row_totals = vec![0_u64; s];
    for (origin, destination) in table.moves() {
        counts[[origin.as_index(), destination.as_index()]] += 1.0;
        row_totals[origin.as_index()] += 1;
    }

    for (i, mut row) in counts.rows_mut().into_iter().enumerate() {
        let total = row_totals[i];
        if total > 0 {
            row /= total as f64;
        }
    }

    let tm = TransitionMatrix {
        probs: Matrix::from_array(counts),
        row_totals,
    };

    let unvisited = tm.unvisited_origins();
    if !unvisited.is_empty() {
        let ids: Vec<String> = unvisited.iter().map(ToString::to_string).collect();
        warn!(
            stations = %ids.join(","),
            "stations never observed as an origin have all-zero transition rows"
        );
    }

    tm
}
