//! Configuration for the stationary distribution estimate.

use crate::error::MarkovError;

/// Default number of matrix multiplications used by power iteration.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// How the long-run distribution is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StationaryMethod {
    /// Repeated multiplication `M_(k+1) = M_k × M`, reading one row of the result.
    #[default]
    PowerIteration,
    /// Direct solve of `π M = π, Σ π = 1` by Gaussian elimination.
    Exact,
}

/// Configuration for stationary distribution estimation.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use velo_markov::StationaryConfig;
///
/// let config = StationaryConfig::new()
///     .with_iterations(500)
///     .with_tolerance(Some(1e-12));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct StationaryConfig {
    iterations: usize,
    tolerance: Option<f64>,
    method: StationaryMethod,
}

impl StationaryConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `iterations = 1000`, `tolerance = None` (always run the full
    /// budget), `method = PowerIteration`.
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            tolerance: None,
            method: StationaryMethod::PowerIteration,
        }
    }

    /// Sets the multiplication budget for power iteration.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the early-stop tolerance on the spread between rows.
    ///
    /// `None` disables early stopping.
    pub fn with_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the estimation method.
    pub fn with_method(mut self, method: StationaryMethod) -> Self {
        self.method = method;
        self
    }

    // --- Accessors ---

    /// Returns the multiplication budget.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the early-stop tolerance.
    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    /// Returns the estimation method.
    pub fn method(&self) -> StationaryMethod {
        self.method
    }

    /// Validates this configuration.
    ///
    /// Checks that the budget is at least one multiplication and that a
    /// tolerance, if set, is finite and positive.
    pub fn validate(&self) -> Result<(), MarkovError> {
        if self.iterations == 0 {
            return Err(MarkovError::InvalidConfig {
                reason: "iterations must be at least 1".to_string(),
            });
        }
        if let Some(tol) = self.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(MarkovError::InvalidConfig {
                    reason: format!("tolerance must be finite and positive, got {tol}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for StationaryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = StationaryConfig::new();
        assert_eq!(cfg.iterations(), 1000);
        assert!(cfg.tolerance().is_none());
        assert_eq!(cfg.method(), StationaryMethod::PowerIteration);
    }

    #[test]
    fn builder_chaining() {
        let cfg = StationaryConfig::new()
            .with_iterations(20)
            .with_tolerance(Some(1e-6))
            .with_method(StationaryMethod::Exact);
        assert_eq!(cfg.iterations(), 20);
        assert_eq!(cfg.tolerance(), Some(1e-6));
        assert_eq!(cfg.method(), StationaryMethod::Exact);
    }

    #[test]
    fn validate_ok() {
        assert!(StationaryConfig::new().validate().is_ok());
    }

    #[test]
    fn validate_zero_iterations() {
        assert!(
            StationaryConfig::new()
                .with_iterations(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_bad_tolerance() {
        for tol in [0.0, -1e-9, f64::NAN, f64::INFINITY] {
            assert!(
                StationaryConfig::new()
                    .with_tolerance(Some(tol))
                    .validate()
                    .is_err(),
                "tolerance {tol} should be rejected"
            );
        }
    }
}
