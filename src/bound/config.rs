//! Subgradient optimization configuration.

/// Configuration for [`SubgradientBound`](super::SubgradientBound).
///
/// # Examples
///
/// ```
/// use u_lkh::bound::SubgradientConfig;
///
/// let config = SubgradientConfig::default()
///     .with_max_iterations(200)
///     .with_initial_step(0.5)
///     .with_step_decay(0.9);
/// assert_eq!(config.max_iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubgradientConfig {
    /// Maximum number of 1-tree evaluations.
    pub max_iterations: usize,

    /// Step size of the first penalty update.
    ///
    /// `None` derives it from the first bound: 1% of `|bound| / N`, at
    /// least `1e-6`.
    pub initial_step: Option<f64>,

    /// Geometric step decay factor in (0, 1).
    pub step_decay: f64,

    /// The search stops once the step falls below this value.
    pub min_step: f64,

    /// Special node of every 1-tree.
    pub special_node: usize,
}

impl Default for SubgradientConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            initial_step: None,
            step_decay: 0.95,
            min_step: 1e-9,
            special_node: 0,
        }
    }
}

impl SubgradientConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = Some(step);
        self
    }

    pub fn with_step_decay(mut self, decay: f64) -> Self {
        self.step_decay = decay;
        self
    }

    pub fn with_min_step(mut self, step: f64) -> Self {
        self.min_step = step;
        self
    }

    pub fn with_special_node(mut self, node: usize) -> Self {
        self.special_node = node;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if let Some(step) = self.initial_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(format!("initial_step must be positive, got {step}"));
            }
        }
        if self.step_decay <= 0.0 || self.step_decay >= 1.0 {
            return Err(format!(
                "step_decay must be in (0, 1), got {}",
                self.step_decay
            ));
        }
        if self.min_step < 0.0 {
            return Err(format!("min_step must be non-negative, got {}", self.min_step));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SubgradientConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert!(config.initial_step.is_none());
        assert!((config.step_decay - 0.95).abs() < 1e-12);
        assert_eq!(config.special_node, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_decay() {
        assert!(SubgradientConfig::default()
            .with_step_decay(1.0)
            .validate()
            .is_err());
        assert!(SubgradientConfig::default()
            .with_step_decay(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_step() {
        assert!(SubgradientConfig::default()
            .with_initial_step(-1.0)
            .validate()
            .is_err());
        assert!(SubgradientConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
    }
}
