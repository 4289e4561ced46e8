//! Error types for the velo-fleet crate.

use velo_markov::MarkovError;

/// Error type for all fallible operations in the velo-fleet crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FleetError {
    /// Returned when a fleet dimension is zero.
    #[error("invalid fleet configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the chain and the configuration disagree on the station count.
    #[error("station count mismatch: config has {config}, chain has {chain}")]
    StationMismatch {
        /// Stations in the fleet configuration.
        config: usize,
        /// Stations in the transition matrix or initial distribution.
        chain: usize,
    },

    /// Returned when the initial distribution has no mass to sample from.
    #[error("initial distribution has no probability mass")]
    EmptyDistribution,

    /// Errors from the Markov chain crate.
    #[error(transparent)]
    Markov(#[from] MarkovError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let e = FleetError::InvalidConfig {
            reason: "n_days must be at least 1".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid fleet configuration: n_days must be at least 1"
        );
    }

    #[test]
    fn error_station_mismatch() {
        let e = FleetError::StationMismatch {
            config: 12,
            chain: 3,
        };
        assert_eq!(
            e.to_string(),
            "station count mismatch: config has 12, chain has 3"
        );
    }

    #[test]
    fn error_from_markov() {
        let e: FleetError = MarkovError::NoStations.into();
        assert_eq!(e.to_string(), "station count must be at least 1");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<FleetError>();
    }
}
