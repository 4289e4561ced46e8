//! Raw origin → destination move counts.

use std::collections::BTreeMap;
use std::fmt;

use crate::station::Station;
use crate::trajectory::TrajectoryTable;

/// An `(origin, destination)` pair of stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionKey {
    /// Station on day `k`.
    pub origin: Station,
    /// Station on day `k + 1`.
    pub destination: Station,
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

/// Counts of observed moves for every `(origin, destination)` pair.
///
/// The map holds all `S²` keys, unobserved pairs with a count of zero, so
/// lookups for any valid station pair never fail. Iteration is ordered by
/// origin, then destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCounts {
    n_stations: usize,
    counts: BTreeMap<TransitionKey, u64>,
}

impl TransitionCounts {
    fn zeroed(n_stations: usize) -> Self {
        let counts = Station::all(n_stations)
            .flat_map(|origin| {
                Station::all(n_stations).map(move |destination| {
                    (
                        TransitionKey {
                            origin,
                            destination,
                        },
                        0,
                    )
                })
            })
            .collect();
        Self { n_stations, counts }
    }

    /// Returns the number of stations `S`.
    pub fn n_stations(&self) -> usize {
        self.n_stations
    }

    /// Returns the count for a pair, zero if the pair was never observed.
    ///
    /// Stations outside the table's range also report zero.
    pub fn get(&self, origin: Station, destination: Station) -> u64 {
        self.counts
            .get(&TransitionKey {
                origin,
                destination,
            })
            .copied()
            .unwrap_or(0)
    }

    /// Returns the total number of moves out of `origin`.
    pub fn row_total(&self, origin: Station) -> u64 {
        Station::all(self.n_stations)
            .map(|destination| self.get(origin, destination))
            .sum()
    }

    /// Returns the per-origin totals in station order.
    pub fn row_totals(&self) -> Vec<u64> {
        Station::all(self.n_stations)
            .map(|o| self.row_total(o))
            .collect()
    }

    /// Returns the total number of observed moves.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Returns the number of keys (always `S²`).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over every key and its count, ordered by origin then destination.
    pub fn iter(&self) -> impl Iterator<Item = (TransitionKey, u64)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }
}

/// Tallies every consecutive day pair of every bicycle.
#[tracing::instrument(skip_all, fields(n_bicycles = table.n_bicycles(), n_stations = table.n_stations()))]
pub fn count_transitions(table: &TrajectoryTable) -> TransitionCounts {
    let mut tc = TransitionCounts::zeroed(table.n_stations());
    for (origin, destination) in table.moves() {
        *tc.counts
            .entry(TransitionKey {
                origin,
                destination,
            })
            .or_insert(0) += 1;
    }
    tc
}
