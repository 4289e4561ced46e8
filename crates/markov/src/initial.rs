//! Initial station distribution from the first observed day.

use tracing::debug;

use crate::error::MarkovError;
use crate::matrix::Distribution;
use crate::trajectory::TrajectoryTable;

/// Builds the day-1 distribution of bicycles over stations.
///
/// Counts each bicycle's first-day station and divides every count by the
/// number of bicycles.
///
/// # Errors
///
/// - [`MarkovError::EmptyFleet`] if the table has no bicycles.
/// - [`MarkovError::NoObservations`] if the table has no days.
#[tracing::instrument(skip_all, fields(n_bicycles = table.n_bicycles(), n_stations = table.n_stations()))]
pub fn initial_distribution(table: &TrajectoryTable) -> Result<Distribution, MarkovError> {
    let n_bicycles = table.n_bicycles();
    if n_bicycles == 0 {
        return Err(MarkovError::EmptyFleet);
    }
    if table.n_days() == 0 {
        return Err(MarkovError::NoObservations);
    }

    let mut counts = vec![0.0_f64; table.n_stations()];
    for station in table.first_day() {
        counts[station.as_index()] += 1.0;
    }

    let total = n_bicycles as f64;
    for c in &mut counts {
        *c /= total;
    }
    debug!(?counts, "initial distribution");

    Ok(Distribution::from_raw(counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ROW_SUM_TOLERANCE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn all_start_at_first_station() {
        let table = TrajectoryTable::new(2, vec![vec![1, 2, 1], vec![1, 1, 2]]).unwrap();
        let d = initial_distribution(&table).unwrap();
        assert_eq!(d.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn fractions_of_fleet() {
        let table = TrajectoryTable::new(
            3,
            vec![vec![1, 1], vec![3, 2], vec![3, 3], vec![2, 1]],
        )
        .unwrap();
        let d = initial_distribution(&table).unwrap();
        assert_abs_diff_eq!(d.as_slice()[0], 0.25);
        assert_abs_diff_eq!(d.as_slice()[1], 0.25);
        assert_abs_diff_eq!(d.as_slice()[2], 0.5);
        assert!(d.is_normalized(ROW_SUM_TOLERANCE));
    }

    #[test]
    fn empty_fleet_error() {
        let table = TrajectoryTable::new(3, vec![]).unwrap();
        assert!(matches!(
            initial_distribution(&table),
            Err(MarkovError::EmptyFleet)
        ));
    }

    #[test]
    fn no_days_error() {
        let table = TrajectoryTable::new(3, vec![vec![]]).unwrap();
        assert!(matches!(
            initial_distribution(&table),
            Err(MarkovError::NoObservations)
        ));
    }
}
