//! Error types for the velo-markov crate.

/// Error type for all fallible operations in the velo-markov crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkovError {
    /// Returned when the station count is zero.
    #[error("station count must be at least 1")]
    NoStations,

    /// Returned when a distribution is requested from a table without bicycles.
    #[error("trajectory table has no bicycles")]
    EmptyFleet,

    /// Returned when a distribution is requested from a table without days.
    #[error("trajectory table has no observed days")]
    NoObservations,

    /// Returned when a station id is outside `1..=n_stations`.
    #[error("station id {id} out of range (must be 1..={n_stations})")]
    InvalidStationId {
        /// The offending id.
        id: usize,
        /// Number of stations.
        n_stations: usize,
    },

    /// Returned when an observation is outside `1..=n_stations`.
    #[error(
        "invalid station {station} for bicycle {bicycle} on day {day} (must be 1..={n_stations})"
    )]
    InvalidStation {
        /// 0-based bicycle row.
        bicycle: usize,
        /// 0-based day column.
        day: usize,
        /// The offending station id.
        station: usize,
        /// Number of stations in the table.
        n_stations: usize,
    },

    /// Returned when a bicycle's trajectory has a different number of days than the first one.
    #[error("ragged trajectory table: bicycle {bicycle} has {got} days, expected {expected}")]
    RaggedTrajectory {
        /// 0-based bicycle row.
        bicycle: usize,
        /// Day count of the first row.
        expected: usize,
        /// Day count of this row.
        got: usize,
    },

    /// Returned when a matrix is not square.
    #[error("matrix is not square: {rows} rows, row {row} has {cols} columns")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// First offending row.
        row: usize,
        /// Length of that row.
        cols: usize,
    },

    /// Returned when two operands have incompatible sizes.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },

    /// Returned when an entry is NaN, infinite or negative.
    #[error("invalid probability at {index}: {value}")]
    InvalidProbability {
        /// Flat index of the offending entry.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a non-zero matrix row does not sum to one.
    #[error("row {row} sums to {sum}, expected 1.0 or an all-zero row")]
    NotStochastic {
        /// 0-based row index.
        row: usize,
        /// Actual row sum.
        sum: f64,
    },

    /// Returned when the exact stationary system has no unique solution.
    #[error("stationary system is singular (pivot {pivot:e} in column {column})")]
    SingularSystem {
        /// Column where elimination failed.
        column: usize,
        /// Magnitude of the best available pivot.
        pivot: f64,
    },

    /// Returned when the exact stationary solution is not preserved by the chain.
    ///
    /// Happens when probability can reach a station whose row is all zero.
    #[error("no distribution is preserved by the chain (largest |πM - π| entry {residual:e}); probability leaks into stations with no outgoing moves")]
    NotInvariant {
        /// Largest entry of `|πM − π|`.
        residual: f64,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
