//! Configuration for synthetic fleet generation.

use crate::error::FleetError;

/// Configuration for trajectory generation.
///
/// # Example
///
/// ```
/// use velo_fleet::FleetConfig;
///
/// let config = FleetConfig::new()
///     .with_n_stations(4)
///     .with_n_bicycles(10)
///     .with_n_days(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleetConfig {
    n_bicycles: usize,
    n_stations: usize,
    n_days: usize,
}

impl FleetConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: 140 bicycles, 12 stations, 30 days.
    pub fn new() -> Self {
        Self {
            n_bicycles: 140,
            n_stations: 12,
            n_days: 30,
        }
    }

    /// Sets the number of bicycles.
    pub fn with_n_bicycles(mut self, n: usize) -> Self {
        self.n_bicycles = n;
        self
    }

    /// Sets the number of stations.
    pub fn with_n_stations(mut self, n: usize) -> Self {
        self.n_stations = n;
        self
    }

    /// Sets the number of observed days.
    pub fn with_n_days(mut self, n: usize) -> Self {
        self.n_days = n;
        self
    }

    /// Returns the number of bicycles.
    pub fn n_bicycles(&self) -> usize {
        self.n_bicycles
    }

    /// Returns the number of stations.
    pub fn n_stations(&self) -> usize {
        self.n_stations
    }

    /// Returns the number of observed days.
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Validates this configuration: every dimension must be at least 1.
    pub fn validate(&self) -> Result<(), FleetError> {
        for (name, value) in [
            ("n_bicycles", self.n_bicycles),
            ("n_stations", self.n_stations),
            ("n_days", self.n_days),
        ] {
            if value == 0 {
                return Err(FleetError::InvalidConfig {
                    reason: format!("{name} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self::new()
    }
}
