//! Integer powers of a square matrix.

use tracing::trace;

use crate::matrix::Matrix;

/// Raises `m` to the power `n` by repeated dense multiplication.
///
/// - `n == 0` returns the identity matrix.
/// - `n == 1` returns `m` unchanged.
/// - `n > 1` performs `n - 1` products `result = result × m`, each into a
///   freshly allocated buffer, so `m` is only ever read.
///
/// Row-stochastic inputs give row-stochastic outputs (up to rounding); an
/// all-zero row stays all zero.
pub fn matrix_power(m: &Matrix, n: u32) -> Matrix {
    if n == 0 {
        return Matrix::identity(m.n());
    }
    let mut result = m.clone();
    for step in 1..n {
        result = result.mul_unchecked(m);
        trace!(step, "matrix power step");
    }
    result
}
