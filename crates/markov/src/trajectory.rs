//! Observed bicycle trajectories.

use crate::error::MarkovError;
use crate::station::Station;

/// A bicycles × days table of observed station ids.
///
/// Row `b` holds the station of bicycle `b` on each observed day. Every
/// entry is validated to lie in `1..=n_stations` and every row has the same
/// number of days. The table is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryTable {
    n_stations: usize,
    n_bicycles: usize,
    n_days: usize,
    /// Row-major station ids, `n_bicycles * n_days` entries.
    stations: Vec<usize>,
}

impl TrajectoryTable {
    /// Builds a table from one row of 1-based station ids per bicycle.
    ///
    /// An empty `rows` is accepted (a fleet with no bicycles); operations
    /// that need at least one bicycle reject it themselves.
    ///
    /// # Errors
    ///
    /// - [`MarkovError::NoStations`] if `n_stations == 0`.
    /// - [`MarkovError::RaggedTrajectory`] if rows differ in length.
    /// - [`MarkovError::InvalidStation`] if an id is outside `1..=n_stations`.
    pub fn new(n_stations: usize, rows: Vec<Vec<usize>>) -> Result<Self, MarkovError> {
        if n_stations == 0 {
            return Err(MarkovError::NoStations);
        }
        let n_bicycles = rows.len();
        let n_days = rows.first().map_or(0, Vec::len);
        let mut stations = Vec::with_capacity(rows.len() * n_days);

        for (bicycle, row) in rows.into_iter().enumerate() {
            if row.len() != n_days {
                return Err(MarkovError::RaggedTrajectory {
                    bicycle,
                    expected: n_days,
                    got: row.len(),
                });
            }
            for (day, &station) in row.iter().enumerate() {
                if station == 0 || station > n_stations {
                    return Err(MarkovError::InvalidStation {
                        bicycle,
                        day,
                        station,
                        n_stations,
                    });
                }
            }
            stations.extend(row);
        }

        Ok(Self {
            n_stations,
            n_bicycles,
            n_days,
            stations,
        })
    }

    /// Returns the number of stations `S`.
    pub fn n_stations(&self) -> usize {
        self.n_stations
    }

    /// Returns the number of bicycles `B`.
    pub fn n_bicycles(&self) -> usize {
        self.n_bicycles
    }

    /// Returns the number of observed days `D`.
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Returns the station ids of one bicycle, in day order.
    ///
    /// # Panics
    ///
    /// Panics if `bicycle >= n_bicycles()`.
    pub fn bicycle(&self, bicycle: usize) -> &[usize] {
        let start = bicycle * self.n_days;
        &self.stations[start..start + self.n_days]
    }

    /// Iterates over all bicycle rows.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.n_bicycles()).map(|b| self.bicycle(b))
    }

    /// Iterates over every bicycle's first-day station.
    pub fn first_day(&self) -> impl Iterator<Item = Station> + '_ {
        self.rows()
            .filter_map(|row| row.first())
            .map(|&id| Station::from_index(id - 1))
    }

    /// Iterates over every consecutive `(origin, destination)` day pair of every bicycle.
    ///
    /// Yields `n_bicycles * (n_days - 1)` pairs, bicycle by bicycle.
    pub fn moves(&self) -> impl Iterator<Item = (Station, Station)> + '_ {
        self.rows().flat_map(|row| {
            row.windows(2)
                .map(|w| (Station::from_index(w[0] - 1), Station::from_index(w[1] - 1)))
        })
    }
}
