//! Station identifiers.

use std::fmt;

use crate::error::MarkovError;

/// A bicycle station, identified by a 1-based id in `1..=n_stations`.
///
/// Stations carry no state of their own; they are an index into the rows and
/// columns of a transition matrix. Displayed as `E<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Station(usize);

impl Station {
    /// Creates a station from its 1-based id, checking it against the station count.
    pub fn new(id: usize, n_stations: usize) -> Result<Self, MarkovError> {
        if id == 0 || id > n_stations {
            return Err(MarkovError::InvalidStationId { id, n_stations });
        }
        Ok(Self(id))
    }

    /// Creates a station from its 0-based matrix index.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// Returns the 1-based station id.
    pub fn id(self) -> usize {
        self.0
    }

    /// Returns the zero-based index of this station (its matrix row/column).
    pub fn as_index(self) -> usize {
        self.0 - 1
    }

    /// Iterates over all stations `1..=n_stations` in index order.
    pub fn all(n_stations: usize) -> impl Iterator<Item = Station> {
        (0..n_stations).map(Self::from_index)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}
