//! Dense square matrices and probability vectors.
//!
//! Both types wrap `ndarray` storage and are immutable through the public
//! API: every operation returns a freshly allocated value, so a `&Matrix`
//! can be shared freely between threads.

use ndarray::{Array2, ArrayView1};

use crate::error::MarkovError;
use crate::station::Station;

/// Tolerance used when checking that rows and distributions sum to one.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// A dense `n × n` matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::NotSquare`] if any row's length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MarkovError> {
        let n = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(MarkovError::NotSquare {
                rows: n,
                row,
                cols: r.len(),
            });
        }
        let data = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
        Ok(Self { data })
    }

    /// Wraps an existing square array.
    pub(crate) fn from_array(data: Array2<f64>) -> Self {
        debug_assert_eq!(data.nrows(), data.ncols());
        Self { data }
    }

    /// Returns the `n × n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: Array2::zeros((n, n)),
        }
    }

    /// Returns the `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self {
            data: Array2::eye(n),
        }
    }

    /// Returns the dimension `n`.
    pub fn n(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the entry at `(row, col)` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// Returns the probability of moving from one station to another.
    pub fn prob(&self, from: Station, to: Station) -> f64 {
        self.data[[from.as_index(), to.as_index()]]
    }

    /// Returns row `i` as a view.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.row(i)
    }

    /// Returns the underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Returns the rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Returns the sum of every row.
    pub fn row_sums(&self) -> Vec<f64> {
        self.data.rows().into_iter().map(|r| r.sum()).collect()
    }

    /// Dense product `self × rhs` into a new matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::DimensionMismatch`] if the dimensions differ.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix, MarkovError> {
        if self.n() != rhs.n() {
            return Err(MarkovError::DimensionMismatch {
                expected: self.n(),
                got: rhs.n(),
            });
        }
        Ok(self.mul_unchecked(rhs))
    }

    /// Dense product for operands already known to share a dimension.
    pub(crate) fn mul_unchecked(&self, rhs: &Matrix) -> Matrix {
        Self {
            data: self.data.dot(&rhs.data),
        }
    }

    /// Checks that every row is either stochastic or entirely zero.
    ///
    /// Entries must be finite and non-negative, and each non-zero row must sum
    /// to 1.0 within `tolerance`.
    pub fn validate_stochastic(&self, tolerance: f64) -> Result<(), MarkovError> {
        let n = self.n();
        for (i, row) in self.data.rows().into_iter().enumerate() {
            for (j, &p) in row.iter().enumerate() {
                if !p.is_finite() || p < 0.0 {
                    return Err(MarkovError::InvalidProbability {
                        index: i * n + j,
                        value: p,
                    });
                }
            }
            let sum = row.sum();
            if sum != 0.0 && (sum - 1.0).abs() > tolerance {
                return Err(MarkovError::NotStochastic { row: i, sum });
            }
        }
        Ok(())
    }

    /// Maximum over columns of the spread `max_i M[i][j] - min_i M[i][j]`.
    ///
    /// Zero when all rows agree exactly.
    pub fn max_row_spread(&self) -> f64 {
        self.data
            .columns()
            .into_iter()
            .map(|col| {
                let (lo, hi) = col
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                if lo.is_finite() { hi - lo } else { 0.0 }
            })
            .fold(0.0, f64::max)
    }
}

/// A probability vector over stations.
///
/// Entries are non-negative and sum to one, or are all zero when the source
/// had no mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: Vec<f64>,
}

impl Distribution {
    /// Builds a distribution from raw probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InvalidProbability`] for negative or non-finite
    /// entries. The sum is not checked; see [`Distribution::is_normalized`].
    pub fn from_vec(probs: Vec<f64>) -> Result<Self, MarkovError> {
        if let Some((index, &value)) = probs
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(MarkovError::InvalidProbability { index, value });
        }
        Ok(Self { probs })
    }

    pub(crate) fn from_raw(probs: Vec<f64>) -> Self {
        Self { probs }
    }

    /// Returns the number of stations.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Returns `true` if the distribution has no stations.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Returns the probability of a station.
    pub fn prob(&self, station: Station) -> f64 {
        self.probs[station.as_index()]
    }

    /// Returns the probabilities in station order.
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    /// Returns the probabilities as an `ndarray` view.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.probs[..])
    }

    /// Returns the total probability mass.
    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Returns `true` if the entries sum to 1.0 within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }
}
