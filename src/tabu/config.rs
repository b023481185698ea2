//! Tabu Search configuration.

use crate::search::SearchConfig;

/// Configuration parameters for [`TabuSearch`](super::TabuSearch).
///
/// # Examples
///
/// ```
/// use u_lkh::tabu::TabuSearchConfig;
///
/// let config = TabuSearchConfig::default()
///     .with_max_rounds(100)
///     .with_tabu_capacity(5_000)
///     .with_max_no_improve(10);
/// assert_eq!(config.max_rounds, 100);
/// assert_eq!(config.tabu_capacity, 5_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuSearchConfig {
    /// Maximum number of local searches (restarts).
    pub max_rounds: usize,
    /// Maximum number of tours the tabu list may hold.
    pub tabu_capacity: usize,
    /// Rounds without a new best tour before stopping.
    pub max_no_improve: usize,
    /// Random seed for perturbations (None for random).
    pub seed: Option<u64>,
    /// Settings of every local search.
    pub search: SearchConfig,
}

impl Default for TabuSearchConfig {
    fn default() -> Self {
        Self {
            max_rounds: 50,
            tabu_capacity: 100_000,
            max_no_improve: 20,
            seed: None,
            search: SearchConfig::default(),
        }
    }
}

impl TabuSearchConfig {
    /// Sets the maximum number of rounds.
    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_capacity(mut self, n: usize) -> Self {
        self.tabu_capacity = n;
        self
    }

    /// Sets the number of rounds without improvement before stopping.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the local search settings.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be at least 1".into());
        }
        if self.tabu_capacity == 0 {
            return Err("tabu_capacity must be at least 1".into());
        }
        if self.max_no_improve == 0 {
            return Err("max_no_improve must be at least 1".into());
        }
        self.search.validate()
    }
}
