//! Local search driver.
//!
//! # Algorithm
//!
//! Standalone ([`LocalSearchEngine::optimize`]):
//!
//! 1. Call the strategy's `improve`
//! 2. Gain `<= 0`: converged
//! 3. Verify the tracked length against a full recomputation
//! 4. Fingerprint the tour; a repeat means the search is cycling
//!
//! Under tabu control ([`LocalSearchEngine::meta_heuristic_optimize`]) the
//! tabu list's fingerprint set replaces the engine's own, so duplicates are
//! detected across every local search of the whole metaheuristic run. Every
//! improvement above `epsilon` must be accepted by the tabu list or the run
//! ends.

use std::collections::HashSet;

use log::{debug, info};

use super::collector::Collector;
use super::config::SearchConfig;
use super::types::{MoveStrategy, SearchState};
use crate::error::{TspError, TspResult};
use crate::matrix::WeightMatrix;
use crate::tabu::TabuSet;
use crate::tour::{validate_tour, Fingerprinter};

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The strategy found no improving move.
    Converged,
    /// The current tour had been visited before.
    CycleDetected,
    /// The tabu list refused the current tour.
    TabuRejected,
    /// `max_iterations` improving moves were applied.
    IterationLimit,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Final tour length.
    pub length: f64,
    /// Final tour.
    pub tour: Vec<usize>,
    /// Termination reason.
    pub status: SearchStatus,
    /// Number of improving moves applied.
    pub iterations: usize,
}

/// Drives a [`MoveStrategy`] to a local optimum.
///
/// # Examples
///
/// ```
/// use u_lkh::matrix::WeightMatrix;
/// use u_lkh::search::{LocalSearchEngine, SearchConfig, TwoOpt};
///
/// let m = WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
/// let mut engine =
///     LocalSearchEngine::from_tour(&m, vec![0, 2, 1, 3], TwoOpt::new(), SearchConfig::default())
///         .unwrap();
/// let outcome = engine.optimize(None).unwrap();
/// assert!((outcome.length - 4.0).abs() < 1e-9);
/// ```
pub struct LocalSearchEngine<'a, S: MoveStrategy> {
    state: SearchState<'a>,
    strategy: S,
    config: SearchConfig,
    fingerprinter: Fingerprinter,
    seen: HashSet<u64>,
}

impl<'a, S: MoveStrategy> LocalSearchEngine<'a, S> {
    /// Creates an engine from a tour and its known length.
    ///
    /// Fails if the tour is not a permutation or `length` disagrees with the
    /// recomputed length beyond the configured tolerance.
    pub fn new(
        weights: &'a WeightMatrix,
        tour: Vec<usize>,
        length: f64,
        strategy: S,
        config: SearchConfig,
    ) -> TspResult<Self> {
        config.validate().map_err(TspError::Config)?;
        validate_tour(&tour, weights.len())?;

        let mut fingerprinter = Fingerprinter::default().with_orientation(config.orientation);
        let mut seen = HashSet::new();
        seen.insert(fingerprinter.compute(&tour));

        let engine = Self {
            state: SearchState::new(weights, tour, length),
            strategy,
            config,
            fingerprinter,
            seen,
        };
        engine.check_consistency()?;
        Ok(engine)
    }

    /// Creates an engine, computing the tour length from `weights`.
    pub fn from_tour(
        weights: &'a WeightMatrix,
        tour: Vec<usize>,
        strategy: S,
        config: SearchConfig,
    ) -> TspResult<Self> {
        let length = weights.tour_length(&tour);
        Self::new(weights, tour, length, strategy, config)
    }

    /// Tracked length of the current tour.
    pub fn length(&self) -> f64 {
        self.state.length
    }

    /// Current tour.
    pub fn tour(&self) -> &[usize] {
        &self.state.tour
    }

    /// The move strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Number of distinct tours seen by standalone runs.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Consumes the engine and returns its strategy.
    pub fn into_strategy(self) -> S {
        self.strategy
    }

    /// Runs local search until convergence or until a tour repeats.
    ///
    /// A length inconsistency is returned as [`TspError::LengthMismatch`].
    pub fn optimize(
        &mut self,
        mut collector: Option<&mut dyn Collector>,
    ) -> TspResult<SearchOutcome> {
        let name = self.strategy.name().to_string();
        info!("{name}: start length={:.6}", self.state.length);
        if let Some(c) = collector.as_mut() {
            c.record(&[("length", self.state.length), ("gain", 0.0)]);
        }

        let mut iterations = 0;
        let status = loop {
            if self.limit_reached(iterations) {
                break SearchStatus::IterationLimit;
            }

            let gain = self.strategy.improve(&mut self.state);
            if gain.is_nan() || gain <= 0.0 {
                break SearchStatus::Converged;
            }
            iterations += 1;
            debug!("{name} {iterations}: length={:.6} gain={gain:.6}", self.state.length);
            if let Some(c) = collector.as_mut() {
                c.record(&[("length", self.state.length), ("gain", gain)]);
            }

            self.check_consistency()?;

            let h = self.fingerprinter.compute(&self.state.tour);
            if !self.seen.insert(h) {
                break SearchStatus::CycleDetected;
            }
        };

        info!("{name}: end length={:.6} status={status:?}", self.state.length);
        Ok(self.outcome(status, iterations))
    }

    /// Runs local search under control of a tabu list.
    ///
    /// Every improvement larger than `epsilon` is offered to `tabu`; the run
    /// ends normally when the list refuses it. Fails with
    /// [`TspError::Config`] if `tabu` compares tours under a different
    /// orientation than this engine.
    pub fn meta_heuristic_optimize(
        &mut self,
        tabu: &mut TabuSet,
        mut collector: Option<&mut dyn Collector>,
    ) -> TspResult<SearchOutcome> {
        if tabu.orientation() != self.config.orientation {
            return Err(TspError::Config(format!(
                "tabu list orientation {:?} differs from search orientation {:?}",
                tabu.orientation(),
                self.config.orientation
            )));
        }
        let name = self.strategy.name().to_string();
        info!(
            "{name}: start length={:.6} (tabu size {})",
            self.state.length,
            tabu.len()
        );
        if let Some(c) = collector.as_mut() {
            c.record(&[("length", self.state.length), ("gain", 0.0)]);
        }

        let mut iterations = 0;
        let status = loop {
            if self.limit_reached(iterations) {
                break SearchStatus::IterationLimit;
            }

            let gain = self.strategy.improve(&mut self.state);
            if gain.is_nan() || gain <= 0.0 {
                break SearchStatus::Converged;
            }
            iterations += 1;
            if let Some(c) = collector.as_mut() {
                c.record(&[("length", self.state.length), ("gain", gain)]);
            }

            self.check_consistency()?;

            if gain > self.config.epsilon {
                if !tabu.append(self.state.length, &self.state.tour) {
                    break SearchStatus::TabuRejected;
                }
                debug!(
                    "{name} {iterations}: length={:.6} tabu_size={}",
                    self.state.length,
                    tabu.len()
                );
            }
        };

        info!("{name}: end length={:.6} status={status:?}", self.state.length);
        Ok(self.outcome(status, iterations))
    }

    fn limit_reached(&self, iterations: usize) -> bool {
        self.config.max_iterations > 0 && iterations >= self.config.max_iterations
    }

    fn check_consistency(&self) -> TspResult<()> {
        let actual = self.state.recompute_length();
        let tracked = self.state.length;
        if (actual - tracked).abs() > self.config.tolerance || tracked.is_nan() {
            return Err(TspError::LengthMismatch {
                tracked,
                actual,
                tolerance: self.config.tolerance,
            });
        }
        Ok(())
    }

    fn outcome(&self, status: SearchStatus, iterations: usize) -> SearchOutcome {
        SearchOutcome {
            length: self.state.length,
            tour: self.state.tour.clone(),
            status,
            iterations,
        }
    }
}
