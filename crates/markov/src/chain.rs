//! The fitted chain: every quantity derived from one trajectory table.

use crate::config::StationaryConfig;
use crate::counts::{TransitionCounts, count_transitions};
use crate::error::MarkovError;
use crate::initial::initial_distribution;
use crate::matrix::{Distribution, Matrix};
use crate::power::matrix_power;
use crate::propagate::{Propagation, distribution_after};
use crate::stationary::{StationaryEstimate, stationary};
use crate::trajectory::TrajectoryTable;
use crate::transition::{TransitionMatrix, estimate_transition_matrix};

/// Initial distribution, transition matrix and raw counts of one fleet.
#[derive(Debug, Clone)]
pub struct StationChain {
    initial: Distribution,
    transitions: TransitionMatrix,
    counts: TransitionCounts,
}

impl StationChain {
    /// Fits the chain to an observed trajectory table.
    ///
    /// # Errors
    ///
    /// Fails when the initial distribution cannot be built (no bicycles or no days).
    #[tracing::instrument(skip_all, fields(n_bicycles = table.n_bicycles(), n_days = table.n_days()))]
    pub fn fit(table: &TrajectoryTable) -> Result<Self, MarkovError> {
        let initial = initial_distribution(table)?;
        let transitions = estimate_transition_matrix(table);
        let counts = count_transitions(table);
        Ok(Self {
            initial,
            transitions,
            counts,
        })
    }

    /// Returns the number of stations.
    pub fn n_stations(&self) -> usize {
        self.transitions.n_stations()
    }

    /// Returns the day-1 distribution.
    pub fn initial(&self) -> &Distribution {
        &self.initial
    }

    /// Returns the estimated transition matrix.
    pub fn transitions(&self) -> &TransitionMatrix {
        &self.transitions
    }

    /// Returns the raw move counts.
    pub fn counts(&self) -> &TransitionCounts {
        &self.counts
    }

    /// Returns the transition matrix raised to the power `n`.
    pub fn power(&self, n: u32) -> Matrix {
        matrix_power(self.transitions.probs(), n)
    }

    /// Returns the station distribution after `n` steps from the initial distribution.
    pub fn distribution_after(
        &self,
        n: u32,
        propagation: Propagation,
    ) -> Result<Distribution, MarkovError> {
        distribution_after(self.transitions.probs(), &self.initial, n, propagation)
    }

    /// Estimates the long-run distribution.
    pub fn stationary(&self, config: &StationaryConfig) -> Result<StationaryEstimate, MarkovError> {
        stationary(self.transitions.probs(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fit_two_station_example() {
        let table = TrajectoryTable::new(2, vec![vec![1, 2, 1], vec![1, 1, 2]]).unwrap();
        let chain = StationChain::fit(&table).unwrap();
        assert_eq!(chain.n_stations(), 2);
        assert_eq!(chain.initial().as_slice(), &[1.0, 0.0]);
        assert_eq!(chain.counts().total(), 4);
        assert_eq!(chain.counts().row_totals(), chain.transitions().row_totals());
    }

    #[test]
    fn day_one_distribution_with_row_convention() {
        let table = TrajectoryTable::new(2, vec![vec![1, 2, 1], vec![1, 1, 2]]).unwrap();
        let chain = StationChain::fit(&table).unwrap();
        let d = chain
            .distribution_after(1, Propagation::VectorMatrix)
            .unwrap();
        assert_abs_diff_eq!(d.as_slice()[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.as_slice()[1], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn fit_rejects_empty_fleet() {
        let table = TrajectoryTable::new(2, vec![]).unwrap();
        assert!(matches!(
            StationChain::fit(&table),
            Err(MarkovError::EmptyFleet)
        ));
    }
}
