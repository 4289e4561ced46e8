//! Long-run (stationary) station distribution.
//!
//! The default estimate raises the transition matrix to a high power and reads
//! one row of the result. For an ergodic, aperiodic chain every row of `Mᵏ`
//! converges to the same limiting distribution, so any row will do.
//!
//! # Limitations
//!
//! Power iteration cannot tell whether the chain is ergodic. With absorbing
//! stations, periodic structure or disconnected groups of stations the rows
//! of `Mᵏ` never agree, and the reported row is only the long-run
//! distribution of a bicycle that started at that row's station. This is
//! surfaced through [`StationaryEstimate::converged`] and a warning, never
//! as an error. Stations with an all-zero row leak mass: any row that can
//! reach them decays towards zero.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::config::{StationaryConfig, StationaryMethod};
use crate::error::MarkovError;
use crate::matrix::{Distribution, Matrix, ROW_SUM_TOLERANCE};

/// Row spread under which the rows of `Mᵏ` are reported as converged when no
/// tolerance is configured.
pub const DEFAULT_SPREAD_TOLERANCE: f64 = 1e-9;

/// Pivots smaller than this make the exact system singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// Largest `|π M − π|` entry accepted from the exact solver.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Result of a stationary distribution estimate.
#[derive(Debug, Clone)]
pub struct StationaryEstimate {
    distribution: Distribution,
    iterations: usize,
    row_spread: f64,
    converged: bool,
    source_row: Option<usize>,
    powered: Option<Matrix>,
}

impl StationaryEstimate {
    /// Returns the estimated long-run distribution.
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Consumes the estimate, returning the distribution.
    pub fn into_distribution(self) -> Distribution {
        self.distribution
    }

    /// Returns the number of matrix multiplications performed (0 for the exact solver).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the largest disagreement between rows of the final matrix.
    pub fn row_spread(&self) -> f64 {
        self.row_spread
    }

    /// Returns `true` if the rows of the final matrix agreed within tolerance.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns the row of `Mᵏ` the distribution was read from (`None` for the exact solver).
    pub fn source_row(&self) -> Option<usize> {
        self.source_row
    }

    /// Returns the final matrix `M^(iterations + 1)` of power iteration
    /// (`None` for the exact solver).
    pub fn powered_matrix(&self) -> Option<&Matrix> {
        self.powered.as_ref()
    }
}

/// Estimates the stationary distribution with the configured method.
pub fn stationary(
    m: &Matrix,
    config: &StationaryConfig,
) -> Result<StationaryEstimate, MarkovError> {
    match config.method() {
        StationaryMethod::PowerIteration => approximate_stationary(m, config),
        StationaryMethod::Exact => {
            let distribution = solve_stationary(m)?;
            Ok(StationaryEstimate {
                distribution,
                iterations: 0,
                row_spread: 0.0,
                converged: true,
                source_row: None,
                powered: None,
            })
        }
    }
}

/// Approximates the stationary distribution by repeated multiplication.
///
/// Starting from `M_0 = M`, computes `M_(k+1) = M_k × M` for
/// `config.iterations()` steps, or fewer when a tolerance is set and the
/// largest column spread between rows drops below it. A result is always
/// returned: the first row of the final matrix that carries any mass (row 0
/// when every row is zero).
///
/// # Errors
///
/// Returns an error only for an invalid `config`.
#[tracing::instrument(skip_all, fields(n_stations = m.n(), iterations = config.iterations()))]
pub fn approximate_stationary(
    m: &Matrix,
    config: &StationaryConfig,
) -> Result<StationaryEstimate, MarkovError> {
    config.validate()?;

    let mut current = m.clone();
    let mut performed = 0;
    for _ in 0..config.iterations() {
        current = current.mul_unchecked(m);
        performed += 1;
        if let Some(tol) = config.tolerance() {
            if current.max_row_spread() < tol {
                debug!(iterations = performed, "rows agree, stopping early");
                break;
            }
        }
    }

    let row_spread = current.max_row_spread();
    let rows_agree = row_spread <= config.tolerance().unwrap_or(DEFAULT_SPREAD_TOLERANCE);

    let source_row = (0..current.n())
        .find(|&i| current.row(i).sum() > 0.0)
        .unwrap_or(0);
    let distribution = Distribution::from_raw(if current.n() == 0 {
        Vec::new()
    } else {
        current.row(source_row).to_vec()
    });
    let keeps_mass = distribution.is_normalized(ROW_SUM_TOLERANCE);

    if !keeps_mass {
        warn!(
            mass = distribution.sum(),
            iterations = performed,
            "long-run probability drains into stations with no outgoing moves"
        );
    } else if !rows_agree {
        warn!(
            row_spread,
            iterations = performed,
            "rows of the powered matrix disagree; chain may be periodic, reducible or absorbing"
        );
    }
    let converged = rows_agree && keeps_mass;

    Ok(StationaryEstimate {
        distribution,
        iterations: performed,
        row_spread,
        converged,
        source_row: Some(source_row),
        powered: Some(current),
    })
}

/// Solves `π M = π` with `Σ π = 1` directly.
///
/// Builds the system `(Mᵀ − I) π = 0`, replaces its last equation with the
/// normalisation constraint and solves it by LU decomposition. Replacing an
/// equation is only sound when the balance equations are linearly dependent,
/// so the solution is checked against `π M = π` before it is returned.
///
/// # Errors
///
/// - [`MarkovError::NotStochastic`] / [`MarkovError::InvalidProbability`] if
///   `m` is not row-stochastic (zero rows allowed).
/// - [`MarkovError::SingularSystem`] if the stationary distribution is not
///   unique (e.g. several closed classes of stations).
/// - [`MarkovError::NotInvariant`] if probability reaches a station with an
///   all-zero row, so no distribution is preserved by the chain.
/// - [`MarkovError::InvalidProbability`] if the solution has a clearly negative entry.
#[tracing::instrument(skip_all, fields(n_stations = m.n()))]
pub fn solve_stationary(m: &Matrix) -> Result<Distribution, MarkovError> {
    m.validate_stochastic(ROW_SUM_TOLERANCE)?;
    let n = m.n();
    if n == 0 {
        return Err(MarkovError::NoStations);
    }

    // A = Mᵀ − I with the last row replaced by ones; b = e_n.
    let a = DMatrix::<f64>::from_fn(n, n, |i, j| {
        if i == n - 1 {
            1.0
        } else {
            m.get(j, i) - if i == j { 1.0 } else { 0.0 }
        }
    });
    let mut b = DVector::<f64>::zeros(n);
    b[n - 1] = 1.0;

    let lu = a.lu();
    if let Some((column, pivot)) = lu
        .u()
        .diagonal()
        .iter()
        .map(|d| d.abs())
        .enumerate()
        .find(|(_, d)| *d < PIVOT_EPSILON)
    {
        return Err(MarkovError::SingularSystem { column, pivot });
    }
    let solution = lu.solve(&b).ok_or(MarkovError::SingularSystem {
        column: n - 1,
        pivot: 0.0,
    })?;

    let mut pi: Vec<f64> = solution.iter().copied().collect();
    for (index, p) in pi.iter_mut().enumerate() {
        if !p.is_finite() {
            return Err(MarkovError::InvalidProbability { index, value: *p });
        }
        if *p < 0.0 {
            if *p > -PIVOT_EPSILON.sqrt() {
                *p = 0.0;
            } else {
                return Err(MarkovError::InvalidProbability { index, value: *p });
            }
        }
    }

    let residual = (0..n)
        .map(|j| {
            let flowed: f64 = (0..n).map(|i| pi[i] * m.get(i, j)).sum();
            (flowed - pi[j]).abs()
        })
        .fold(0.0_f64, f64::max);
    if residual > RESIDUAL_TOLERANCE {
        return Err(MarkovError::NotInvariant { residual });
    }
    debug!(residual, "stationary system solved");

    Ok(Distribution::from_raw(pi))
}
