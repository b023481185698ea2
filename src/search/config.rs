//! Local search configuration.

use crate::tour::Orientation;

/// Configuration for [`LocalSearchEngine`](super::LocalSearchEngine).
///
/// # Examples
///
/// ```
/// use u_lkh::search::SearchConfig;
///
/// let config = SearchConfig::default().with_max_iterations(10_000);
/// assert!((config.tolerance - 0.01).abs() < 1e-12);
/// assert_eq!(config.max_iterations, 10_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Allowed difference between tracked and recomputed tour length.
    pub tolerance: f64,

    /// Gains at or below this are floating-point noise and are not offered
    /// to the tabu list.
    pub epsilon: f64,

    /// Maximum improving iterations per run. 0 = no limit.
    pub max_iterations: usize,

    /// Symmetries ignored by the tour fingerprint.
    pub orientation: Orientation,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            epsilon: 1e-10,
            max_iterations: 0,
            orientation: Orientation::Directed,
        }
    }
}

impl SearchConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(format!("tolerance must be positive, got {}", self.tolerance));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(format!("epsilon must be non-negative, got {}", self.epsilon));
        }
        Ok(())
    }
}
