use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use velo_markov::{
    MarkovError, Matrix, Propagation, ROW_SUM_TOLERANCE, Station, StationChain, StationaryConfig,
    StationaryMethod, TrajectoryTable, approximate_stationary, count_transitions, distribution_after,
    estimate_transition_matrix, initial_distribution, matrix_power, propagate_n,
};

/// Uniformly random trajectories for `n_bicycles` bicycles over `n_days` days.
fn random_table(n_stations: usize, n_bicycles: usize, n_days: usize, seed: u64) -> TrajectoryTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n_bicycles)
        .map(|_| {
            (0..n_days)
                .map(|_| rng.random_range(1..=n_stations))
                .collect()
        })
        .collect();
    TrajectoryTable::new(n_stations, rows).expect("valid table")
}

fn assert_matrix_close(a: &Matrix, b: &Matrix, eps: f64) {
    assert_eq!(a.n(), b.n());
    for (x, y) in a.as_array().iter().zip(b.as_array()) {
        assert_abs_diff_eq!(*x, *y, epsilon = eps);
    }
}

// ---------------------------------------------------------------------------
// 1. two_station_scenario
// ---------------------------------------------------------------------------
#[test]
fn two_station_scenario() {
    let table = TrajectoryTable::new(2, vec![vec![1, 2, 1], vec![1, 1, 2]]).unwrap();
    let e1 = Station::new(1, 2).unwrap();
    let e2 = Station::new(2, 2).unwrap();

    let initial = initial_distribution(&table).unwrap();
    assert_eq!(initial.as_slice(), &[1.0, 0.0]);

    let counts = count_transitions(&table);
    assert_eq!(counts.get(e1, e1), 1);
    assert_eq!(counts.get(e1, e2), 2);
    assert_eq!(counts.get(e2, e1), 1);
    assert_eq!(counts.get(e2, e2), 0);
    assert_eq!(counts.total(), 4);

    let tm = estimate_transition_matrix(&table);
    assert_abs_diff_eq!(tm.prob(e1, e1), 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(tm.prob(e1, e2), 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(tm.prob(e2, e1), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(tm.prob(e2, e2), 0.0, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// 2. rows_stochastic_or_zero_for_random_tables
// ---------------------------------------------------------------------------
#[test]
fn rows_stochastic_or_zero_for_random_tables() {
    for seed in 0..20 {
        let table = random_table(12, 15, 4, seed);
        let tm = estimate_transition_matrix(&table);
        for (i, sum) in tm.probs().row_sums().into_iter().enumerate() {
            assert!(
                sum == 0.0 || (sum - 1.0).abs() <= ROW_SUM_TOLERANCE,
                "seed {seed}, row {i}: sum = {sum}"
            );
            let zero_row = tm.probs().row(i).iter().all(|&p| p == 0.0);
            assert_eq!(zero_row, tm.row_totals()[i] == 0);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. distributions_sum_to_one
// ---------------------------------------------------------------------------
#[test]
fn distributions_sum_to_one() {
    let table = random_table(12, 140, 30, 7);
    let chain = StationChain::fit(&table).unwrap();
    assert!(chain.transitions().unvisited_origins().is_empty());
    assert!(chain.initial().is_normalized(ROW_SUM_TOLERANCE));
    for n in [1, 2, 5, 30] {
        let d = chain
            .distribution_after(n, Propagation::VectorMatrix)
            .unwrap();
        assert!(d.is_normalized(ROW_SUM_TOLERANCE), "day {n}: sum = {}", d.sum());
    }
}

// ---------------------------------------------------------------------------
// 4. power_associativity
// ---------------------------------------------------------------------------
#[test]
fn power_associativity() {
    let tm = estimate_transition_matrix(&random_table(6, 40, 10, 3));
    let m = tm.probs();
    assert_eq!(&matrix_power(m, 1), m);
    for a in 1..=3 {
        for b in 1..=3 {
            let lhs = matrix_power(m, a + b);
            let rhs = matrix_power(m, a).mul(&matrix_power(m, b)).unwrap();
            assert_matrix_close(&lhs, &rhs, 1e-12);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. n_step_equals_repeated_propagation
// ---------------------------------------------------------------------------
#[test]
fn n_step_equals_repeated_propagation() {
    let table = random_table(5, 30, 8, 11);
    let m = estimate_transition_matrix(&table);
    let v0 = initial_distribution(&table).unwrap();
    for propagation in [Propagation::MatrixVector, Propagation::VectorMatrix] {
        for n in 1..=10 {
            let direct = distribution_after(m.probs(), &v0, n, propagation).unwrap();
            let stepped = propagate_n(m.probs(), &v0, n, propagation).unwrap();
            for (a, b) in direct.as_slice().iter().zip(stepped.as_slice()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 6. counter_matches_matrix_totals
// ---------------------------------------------------------------------------
#[test]
fn counter_matches_matrix_totals() {
    for seed in 0..10 {
        let table = random_table(8, 25, 12, seed);
        let counts = count_transitions(&table);
        let tm = estimate_transition_matrix(&table);
        assert_eq!(counts.row_totals(), tm.row_totals());
        assert_eq!(counts.len(), 64);
        assert_eq!(counts.total(), 25 * 11);
    }
}

// ---------------------------------------------------------------------------
// 7. builder_is_bit_identical
// ---------------------------------------------------------------------------
#[test]
fn builder_is_bit_identical() {
    let table = random_table(12, 140, 30, 99);
    let a = estimate_transition_matrix(&table);
    let b = estimate_transition_matrix(&table);
    let bits = |m: &velo_markov::TransitionMatrix| -> Vec<u64> {
        m.probs().as_array().iter().map(|x| x.to_bits()).collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

// ---------------------------------------------------------------------------
// 8. stationary_rows_agree_for_random_fleet
// ---------------------------------------------------------------------------
#[test]
fn stationary_rows_agree_for_random_fleet() {
    let chain = StationChain::fit(&random_table(12, 140, 30, 5)).unwrap();
    let est = chain.stationary(&StationaryConfig::new()).unwrap();
    assert!(est.converged(), "row spread {}", est.row_spread());
    assert!(est.distribution().is_normalized(1e-9));

    let powered = matrix_power(chain.transitions().probs(), 1001);
    for (a, b) in est
        .distribution()
        .as_slice()
        .iter()
        .zip(powered.row(0).iter())
    {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// 9. zero_row_stationary_does_not_fail
// ---------------------------------------------------------------------------
#[test]
fn zero_row_stationary_does_not_fail() {
    // Station 3 is only ever seen on the last day, so its row is all zero.
    let table = TrajectoryTable::new(
        3,
        vec![vec![1, 2, 1, 3], vec![2, 1, 2, 2], vec![1, 1, 2, 1]],
    )
    .unwrap();
    let tm = estimate_transition_matrix(&table);
    assert_eq!(tm.unvisited_origins(), vec![Station::from_index(2)]);

    let est = approximate_stationary(tm.probs(), &StationaryConfig::new()).unwrap();
    let d = est.distribution().as_slice();
    assert!(d.iter().all(|p| p.is_finite() && *p >= 0.0));
    // Mass that reaches station 3 never comes back.
    assert!(d[2] < 1e-12, "E3 share = {}", d[2]);
    // The decayed rows agree, but the lost mass keeps the estimate unconverged.
    assert!(!est.converged());
    assert!(!est.distribution().is_normalized(ROW_SUM_TOLERANCE));

    let exact = StationChain::fit(&table)
        .unwrap()
        .stationary(&StationaryConfig::new().with_method(StationaryMethod::Exact));
    assert!(matches!(exact, Err(MarkovError::NotInvariant { .. })));
}

// ---------------------------------------------------------------------------
// 10. shared_matrix_across_threads
// ---------------------------------------------------------------------------
#[test]
fn shared_matrix_across_threads() {
    let tm = estimate_transition_matrix(&random_table(6, 20, 10, 2));
    let m = tm.probs();
    let (p3, p5) = std::thread::scope(|s| {
        let h3 = s.spawn(|| matrix_power(m, 3));
        let h5 = s.spawn(|| matrix_power(m, 5));
        (h3.join().unwrap(), h5.join().unwrap())
    });
    assert_matrix_close(&p3, &matrix_power(m, 3), 0.0);
    assert_matrix_close(&p5, &p3.mul(&matrix_power(m, 2)).unwrap(), 1e-12);
}
