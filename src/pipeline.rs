//! End-to-end LKH-style pipeline.
//!
//! # Algorithm
//!
//! 1. Subgradient optimization of node penalties (Held-Karp bound)
//! 2. Minimum 1-tree under the best penalties
//! 3. Alpha-nearness and per-node candidate lists
//! 4. Initial tour from the candidates, guided by the best tour so far
//! 5. Tabu-controlled 2-opt restricted to the candidates
//!
//! Tours found by [`Lkh::solve`] are kept, so repeated calls start from
//! constructions informed by earlier results.

use log::info;

use crate::bound::{
    AlphaMatrix, AlphaNearness, MinimumOneTree, OneTree, SubgradientBound, SubgradientConfig,
    SubgradientStop,
};
use crate::construct::{InitialTour, InitialTourBuilder, InitialTourConfig, SolutionSet};
use crate::error::{TspError, TspResult};
use crate::matrix::WeightMatrix;
use crate::search::TwoOpt;
use crate::tabu::{TabuSearch, TabuSearchConfig, TabuSearchResult};

/// Configuration for [`Lkh`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LkhConfig {
    /// Penalty optimization.
    pub subgradient: SubgradientConfig,
    /// Initial tour construction.
    pub initial: InitialTourConfig,
    /// Alpha threshold for initial-tour candidates.
    ///
    /// `None` uses the 1-tree weight divided by N.
    pub excess: Option<f64>,
    /// Tabu-controlled local search.
    pub tabu: TabuSearchConfig,
}

impl LkhConfig {
    pub fn with_subgradient(mut self, subgradient: SubgradientConfig) -> Self {
        self.subgradient = subgradient;
        self
    }

    pub fn with_initial(mut self, initial: InitialTourConfig) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_excess(mut self, excess: f64) -> Self {
        self.excess = Some(excess);
        self
    }

    pub fn with_tabu(mut self, tabu: TabuSearchConfig) -> Self {
        self.tabu = tabu;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.subgradient.validate()?;
        if self.initial.candidate_count == 0 {
            return Err("candidate_count must be at least 1".into());
        }
        if let Some(excess) = self.excess {
            if excess.is_nan() || excess < 0.0 {
                return Err(format!("excess must be non-negative, got {excess}"));
            }
        }
        self.tabu.validate()
    }
}

/// Everything computed before local search starts.
#[derive(Debug, Clone)]
pub struct Preparation {
    /// Penalties that gave the best bound.
    pub pi: Vec<f64>,
    /// Held-Karp lower bound.
    pub lower_bound: f64,
    /// Why the subgradient loop stopped.
    pub subgradient_stop: SubgradientStop,
    /// Minimum 1-tree under the penalized weights.
    pub one_tree: OneTree,
    /// Alpha values under the penalized weights.
    pub alpha: AlphaMatrix,
    /// Alpha-ranked candidates per node.
    pub candidates: Vec<Vec<usize>>,
    /// Excess used for construction.
    pub excess: f64,
    /// Constructed starting tour.
    pub initial_tour: InitialTour,
}

/// Result of [`Lkh::solve`].
#[derive(Debug, Clone)]
pub struct LkhResult {
    /// Bound and candidate data.
    pub preparation: Preparation,
    /// Local search outcome.
    pub search: TabuSearchResult,
}

/// LKH-style solver over a fixed weight matrix.
///
/// # Examples
///
/// ```
/// use u_lkh::pipeline::{Lkh, LkhConfig};
///
/// let mut lkh = Lkh::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
/// let result = lkh.solve(&LkhConfig::default()).unwrap();
/// assert!(result.preparation.lower_bound <= 4.0 + 1e-9);
/// assert!((result.search.best_length - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Lkh {
    weights: WeightMatrix,
    solutions: SolutionSet,
}

impl Lkh {
    /// Creates a solver for `weights`.
    pub fn new(weights: WeightMatrix) -> Self {
        Self {
            weights,
            solutions: SolutionSet::new(),
        }
    }

    /// Creates a solver over Euclidean distances between `points`.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::new(WeightMatrix::from_points(points))
    }

    /// The weight matrix.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Tours found by earlier [`solve`](Self::solve) calls.
    pub fn solutions(&self) -> &SolutionSet {
        &self.solutions
    }

    /// Computes the bound, candidates and a starting tour.
    ///
    /// Needs at least 3 nodes.
    pub fn prepare(&self, config: &LkhConfig) -> TspResult<Preparation> {
        config.validate().map_err(TspError::Config)?;
        let n = self.weights.len();
        let sub = SubgradientBound::run(&self.weights, &config.subgradient)?;

        let penalized = self.weights.penalized(&sub.best_pi)?;
        let one_tree =
            MinimumOneTree::build_with_special(&penalized, config.subgradient.special_node)?;
        let alpha = AlphaNearness::build(&penalized, &one_tree);
        let candidates = alpha.candidates(&self.weights, config.initial.candidate_count);

        let excess = config
            .excess
            .unwrap_or_else(|| (one_tree.total_price() / n as f64).abs());
        let initial_tour = InitialTourBuilder::new(config.initial.clone()).build(
            &alpha,
            &self.weights,
            self.solutions.get_best().ok(),
            excess,
        )?;

        info!(
            "lkh: lower_bound={:.6} initial={:.6} excess={excess:.6}",
            sub.best_bound, initial_tour.length
        );

        Ok(Preparation {
            pi: sub.best_pi,
            lower_bound: sub.best_bound,
            subgradient_stop: sub.stop,
            one_tree,
            alpha,
            candidates,
            excess,
            initial_tour,
        })
    }

    /// Prepares and runs tabu-controlled 2-opt over the alpha candidates.
    pub fn solve(&mut self, config: &LkhConfig) -> TspResult<LkhResult> {
        let preparation = self.prepare(config)?;
        let search = TabuSearch::run(
            &self.weights,
            preparation.initial_tour.tour.clone(),
            TwoOpt::with_candidates(preparation.candidates.clone()),
            &config.tabu,
        )?;

        for solution in search.solutions.iter() {
            self.solutions.insert(solution.tour.clone(), solution.length);
        }
        info!(
            "lkh: best={:.6} gap={:.4}%",
            search.best_length,
            gap_percent(search.best_length, preparation.lower_bound)
        );

        Ok(LkhResult {
            preparation,
            search,
        })
    }
}

fn gap_percent(length: f64, bound: f64) -> f64 {
    if bound.abs() < f64::EPSILON {
        0.0
    } else {
        100.0 * (length - bound) / bound.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::validate_tour;

    fn clustered(n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let cluster = (i % 3) as f64 * 50.0;
                let x = cluster + ((i * 13) % 17) as f64;
                let y = cluster / 2.0 + ((i * 7) % 11) as f64;
                (x, y)
            })
            .collect()
    }

    #[test]
    fn test_unit_square_pipeline() {
        let lkh = Lkh::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let prep = lkh.prepare(&LkhConfig::default()).unwrap();
        assert!(prep.lower_bound <= 4.0 + 1e-9);
        assert_eq!(prep.subgradient_stop, SubgradientStop::TourFound);
        assert!((prep.initial_tour.length - 4.0).abs() < 1e-9);
        assert!(prep.alpha.get(0, 2) > 0.0);
        assert!(prep.alpha.get(1, 3) > 0.0);
    }

    #[test]
    fn test_bound_below_solution() {
        let mut lkh = Lkh::from_points(&clustered(30));
        let config = LkhConfig::default()
            .with_initial(InitialTourConfig::default().with_seed(4))
            .with_tabu(TabuSearchConfig::default().with_max_rounds(10).with_seed(4));
        let result = lkh.solve(&config).unwrap();

        assert!(result.preparation.lower_bound <= result.search.best_length + 1e-9);
        assert!(result.search.best_length <= result.preparation.initial_tour.length + 1e-9);
        assert!(validate_tour(&result.search.best, 30).is_ok());
        assert_eq!(result.preparation.candidates.len(), 30);
        assert!(result.preparation.candidates.iter().all(|c| c.len() == 5));
    }

    #[test]
    fn test_solutions_accumulate() {
        let mut lkh = Lkh::from_points(&clustered(20));
        assert!(lkh.solutions().is_empty());
        let config = LkhConfig::default()
            .with_initial(InitialTourConfig::default().with_seed(1))
            .with_tabu(TabuSearchConfig::default().with_max_rounds(5).with_seed(1));
        let first = lkh.solve(&config).unwrap();
        assert!(!lkh.solutions().is_empty());

        let second = lkh.solve(&config).unwrap();
        let best = lkh.solutions().get_best().unwrap().length;
        assert!(best <= first.search.best_length + 1e-9);
        assert!(best <= second.search.best_length + 1e-9);
    }

    #[test]
    fn test_explicit_excess() {
        let lkh = Lkh::from_points(&clustered(12));
        let config = LkhConfig::default().with_excess(0.0);
        let prep = lkh.prepare(&config).unwrap();
        assert_eq!(prep.excess, 0.0);
        assert!(validate_tour(&prep.initial_tour.tour, 12).is_ok());
    }

    #[test]
    fn test_too_few_nodes() {
        let lkh = Lkh::from_points(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            lkh.prepare(&LkhConfig::default()),
            Err(TspError::InvalidMatrix { .. })
        ));
    }

    #[test]
    fn test_config_validate() {
        assert!(LkhConfig::default().validate().is_ok());
        assert!(LkhConfig::default().with_excess(-1.0).validate().is_err());
        assert!(LkhConfig::default()
            .with_initial(InitialTourConfig::default().with_candidate_count(0))
            .validate()
            .is_err());
        let lkh = Lkh::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert!(matches!(
            lkh.prepare(&LkhConfig::default().with_excess(f64::NAN)),
            Err(TspError::Config(_))
        ));
    }

    #[test]
    fn test_gap_percent() {
        assert!((gap_percent(110.0, 100.0) - 10.0).abs() < 1e-12);
        assert_eq!(gap_percent(5.0, 0.0), 0.0);
    }
}
