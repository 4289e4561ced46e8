//! Applying a transition matrix to a station distribution.

use ndarray::Array1;

use crate::error::MarkovError;
use crate::matrix::{Distribution, Matrix};
use crate::power::matrix_power;

/// How a distribution is multiplied by a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Column convention `r = M · v`, i.e. `r[i] = Σ_j M[i][j] · v[j]`.
    #[default]
    MatrixVector,
    /// Row convention `r = v · M`, i.e. `r[j] = Σ_i v[i] · M[i][j]`.
    ///
    /// Preserves total mass when `M` is row-stochastic.
    VectorMatrix,
}

fn check_dims(m: &Matrix, v: &Distribution) -> Result<(), MarkovError> {
    if m.n() != v.len() {
        return Err(MarkovError::DimensionMismatch {
            expected: m.n(),
            got: v.len(),
        });
    }
    Ok(())
}

/// Matrix–vector product `r[i] = Σ_j M[i][j] · v[j]`.
///
/// # Errors
///
/// Returns [`MarkovError::DimensionMismatch`] if `v` does not have one entry
/// per matrix row.
pub fn propagate(m: &Matrix, v: &Distribution) -> Result<Distribution, MarkovError> {
    check_dims(m, v)?;
    let r: Array1<f64> = m.as_array().dot(&v.view());
    Ok(Distribution::from_raw(r.to_vec()))
}

/// Vector–matrix product `r[j] = Σ_i v[i] · M[i][j]`.
///
/// # Errors
///
/// Returns [`MarkovError::DimensionMismatch`] on a size mismatch.
pub fn propagate_row(v: &Distribution, m: &Matrix) -> Result<Distribution, MarkovError> {
    check_dims(m, v)?;
    let r: Array1<f64> = v.view().dot(m.as_array());
    Ok(Distribution::from_raw(r.to_vec()))
}

/// Applies one step with the chosen convention.
pub fn step(
    m: &Matrix,
    v: &Distribution,
    propagation: Propagation,
) -> Result<Distribution, MarkovError> {
    match propagation {
        Propagation::MatrixVector => propagate(m, v),
        Propagation::VectorMatrix => propagate_row(v, m),
    }
}

/// Applies `n` single steps in succession: `v0 → v1 → … → vn`.
pub fn propagate_n(
    m: &Matrix,
    v: &Distribution,
    n: u32,
    propagation: Propagation,
) -> Result<Distribution, MarkovError> {
    check_dims(m, v)?;
    let mut current = v.clone();
    for _ in 0..n {
        current = step(m, &current, propagation)?;
    }
    Ok(current)
}

/// Distribution after `n` days, computed as one product with `Mⁿ`.
///
/// `n == 0` returns `v` unchanged.
#[tracing::instrument(skip(m, v), fields(n_stations = m.n()))]
pub fn distribution_after(
    m: &Matrix,
    v: &Distribution,
    n: u32,
    propagation: Propagation,
) -> Result<Distribution, MarkovError> {
    check_dims(m, v)?;
    step(&matrix_power(m, n), v, propagation)
}
