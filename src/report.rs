//! Plain-text tables for the console.
//!
//! Every formatter returns a `String`; printing is left to the commands.

use velo_markov::{
    Distribution, Matrix, Station, StationaryEstimate, TrajectoryTable, TransitionCounts,
    TransitionMatrix,
};

/// Usage text shown by `velo guide`.
pub const GUIDE: &str = "\
velo models bicycles moving between stations as a Markov chain.

Every bicycle is observed once per day at one station (E1, E2, ...).
From those observations velo builds:

  initial      the share of bicycles at each station on day 1
  matrix       the probability of moving from one station to another
               overnight, estimated from consecutive days
  day --n N    the matrix raised to the power N and the expected share of
               bicycles at each station N days after day 1
  counts       how many times each move was observed, with row totals
  stationary   the long-run share of bicycles at each station
  report       all of the above

Stations never observed as an origin have an all-zero matrix row and are
listed under the matrix. The long-run estimate multiplies the matrix by
itself 1000 times and reads one row; when rows disagree (absorbing,
periodic or disconnected stations) a warning is logged. Pass --exact to
solve the stationary equations directly instead.

Trajectories are random: set `seed` in the config file or pass --seed to
reproduce a run. Use -v, -vv or -vvv for more log output.
";

/// Width of one probability cell: `0.` plus the digits, with some padding.
fn cell_width(precision: usize) -> usize {
    (precision + 4).max(6)
}

/// The `Bicycle/Day` table of stations.
pub fn format_trajectories(table: &TrajectoryTable) -> String {
    let mut out = format!("{:<12}", "Bicycle/Day");
    for day in 1..=table.n_days() {
        out.push_str(&format!("{day:>5}"));
    }
    out.push('\n');
    for (b, row) in table.rows().enumerate() {
        out.push_str(&format!("{:<12}", format!("Bicycle {}", b + 1)));
        for &id in row {
            out.push_str(&format!("{:>5}", format!("E{id}")));
        }
        out.push('\n');
    }
    out
}

/// One `Station E<id>: <p>` line per station under a title.
pub fn format_distribution(title: &str, distribution: &Distribution, precision: usize) -> String {
    let mut out = format!("{title}\n");
    for (i, p) in distribution.as_slice().iter().enumerate() {
        out.push_str(&format!(
            "Station {}: {p:.precision$}\n",
            Station::from_index(i)
        ));
    }
    out
}

/// The `From/To` table of a square matrix.
pub fn format_matrix(matrix: &Matrix, precision: usize) -> String {
    let width = cell_width(precision);
    let mut out = format!("{:<10}", "From/To");
    for to in Station::all(matrix.n()) {
        out.push_str(&format!("{:>width$}", to.to_string()));
    }
    out.push('\n');
    for from in Station::all(matrix.n()) {
        out.push_str(&format!("{:<10}", from.to_string()));
        for p in matrix.row(from.as_index()) {
            out.push_str(&format!("{p:>width$.precision$}"));
        }
        out.push('\n');
    }
    out
}

/// The estimated transition matrix followed by the stations never left.
pub fn format_transitions(transitions: &TransitionMatrix, precision: usize) -> String {
    let mut out = format_matrix(transitions.probs(), precision);
    let unvisited = transitions.unvisited_origins();
    if !unvisited.is_empty() {
        let names: Vec<String> = unvisited.iter().map(ToString::to_string).collect();
        out.push_str(&format!(
            "Never observed as origin (all-zero rows): {}\n",
            names.join(", ")
        ));
    }
    out
}

/// One line per origin: every `E<i>->E<j>=<count>` followed by the row total.
pub fn format_counts(counts: &TransitionCounts) -> String {
    let s = counts.n_stations();
    let mut out = String::new();
    for origin in Station::all(s) {
        let cells: Vec<String> = Station::all(s)
            .map(|destination| {
                format!(
                    "{origin}->{destination}={:>4}",
                    counts.get(origin, destination)
                )
            })
            .collect();
        out.push_str(&cells.join("  "));
        out.push_str(&format!(" | Sum: {}\n", counts.row_total(origin)));
    }
    out
}

/// The powered matrix (power iteration only), a note when the estimate did
/// not settle, and the long-run distribution.
pub fn format_stationary(estimate: &StationaryEstimate, precision: usize) -> String {
    let mut out = String::new();
    if let Some(powered) = estimate.powered_matrix() {
        out.push_str(&format!(
            "Transition matrix to the power {}\n",
            estimate.iterations() + 1
        ));
        out.push_str(&format_matrix(powered, precision));
        out.push('\n');
    }
    if !estimate.converged() {
        out.push_str("Note: the rows above disagree or have lost mass; see the warning log.\n");
    }
    out.push_str(&format_distribution(
        "Long-run distribution",
        estimate.distribution(),
        precision,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use velo_markov::{
        StationaryConfig, StationaryMethod, approximate_stationary, count_transitions,
        estimate_transition_matrix, stationary,
    };

    fn table() -> TrajectoryTable {
        TrajectoryTable::new(2, vec![vec![1, 2, 1], vec![1, 1, 2]]).unwrap()
    }

    #[test]
    fn trajectories_table() {
        let text = format_trajectories(&table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Bicycle/Day"));
        assert!(lines[0].ends_with("    1    2    3"));
        assert_eq!(lines[1], "Bicycle 1      E1   E2   E1");
        assert_eq!(lines[2], "Bicycle 2      E1   E1   E2");
    }

    #[test]
    fn distribution_lines_use_precision() {
        let d = Distribution::from_vec(vec![0.5, 0.25, 0.25]).unwrap();
        let text = format_distribution("Day 1", &d, 3);
        assert_eq!(
            text,
            "Day 1\nStation E1: 0.500\nStation E2: 0.250\nStation E3: 0.250\n"
        );
    }

    #[test]
    fn matrix_table_and_unvisited_origins() {
        let t = TrajectoryTable::new(3, vec![vec![1, 2], vec![2, 1]]).unwrap();
        let transitions = estimate_transition_matrix(&t);
        let text = format_transitions(&transitions, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("From/To"));
        assert!(lines[1].starts_with("E1"));
        assert!(lines[1].contains("1.00"));
        assert!(lines[3].starts_with("E3"));
        assert_eq!(lines[4], "Never observed as origin (all-zero rows): E3");
    }

    #[test]
    fn stochastic_matrix_has_no_unvisited_line() {
        let text = format_transitions(&estimate_transition_matrix(&table()), 5);
        assert!(!text.contains("Never observed"));
        assert!(text.contains("0.33333"));
        assert!(text.contains("0.66667"));
    }

    #[test]
    fn counts_rows_with_sums() {
        let text = format_counts(&count_transitions(&table()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "E1->E1=   1  E1->E2=   2 | Sum: 3");
        assert_eq!(lines[1], "E2->E1=   1  E2->E2=   0 | Sum: 1");
    }

    #[test]
    fn stationary_shows_powered_matrix() {
        let m = Matrix::from_rows(vec![vec![0.7, 0.3], vec![0.1, 0.9]]).unwrap();
        let est = approximate_stationary(&m, &StationaryConfig::new()).unwrap();
        let text = format_stationary(&est, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Transition matrix to the power 1001");
        assert!(lines[1].starts_with("From/To"));
        assert!(lines[2].contains("0.25") && lines[2].contains("0.75"));
        assert!(!text.contains("Note:"));
        assert!(text.ends_with("Long-run distribution\nStation E1: 0.25\nStation E2: 0.75\n"));
    }

    #[test]
    fn stationary_notes_lost_mass() {
        let m = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.0, 0.0]]).unwrap();
        let est = approximate_stationary(&m, &StationaryConfig::new()).unwrap();
        assert!(format_stationary(&est, 3).contains("Note: the rows above disagree or have lost mass"));
    }

    #[test]
    fn exact_stationary_has_no_matrix() {
        let m = Matrix::from_rows(vec![vec![0.7, 0.3], vec![0.1, 0.9]]).unwrap();
        let config = StationaryConfig::new().with_method(StationaryMethod::Exact);
        let text = format_stationary(&stationary(&m, &config).unwrap(), 2);
        assert!(text.starts_with("Long-run distribution\n"));
    }

    #[test]
    fn guide_mentions_every_subcommand() {
        for word in ["initial", "matrix", "day --n", "counts", "stationary", "report"] {
            assert!(GUIDE.contains(word), "guide is missing {word}");
        }
    }
}
