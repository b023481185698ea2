//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Offer the initial tour to the tabu list
//! 2. At each round:
//!    a. Run local search under tabu control from the current start tour
//!    b. Store the local optimum, update the global best
//!    c. Perturb the best tour with a double-bridge kick until the tabu
//!       list accepts the result; that becomes the next start tour
//! 3. Terminate after max rounds, stagnation, a full tabu list or
//!    cancellation
//!
//! All local searches share one tabu list, so a tour accepted in any round
//! is never accepted again.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Martin, O., Otto, S.W. & Felten, E.W. (1991). "Large-step Markov chains
//! for the traveling salesman problem", *Complex Systems* 5(3), 299-326.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::TabuSearchConfig;
use super::set::TabuSet;
use crate::construct::SolutionSet;
use crate::error::{TspError, TspResult};
use crate::matrix::WeightMatrix;
use crate::search::{LocalSearchEngine, MoveStrategy};
use crate::tour::validate_tour;

const KICK_ATTEMPTS: usize = 16;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuSearchResult {
    /// Best tour found.
    pub best: Vec<usize>,
    /// Length of the best tour.
    pub best_length: f64,
    /// Local searches executed.
    pub rounds: usize,
    /// 1-based round in which the best tour was found; 0 if no round beat
    /// the initial tour.
    pub best_round: usize,
    /// Best length after every round.
    pub length_history: Vec<f64>,
    /// Every local optimum reached, shortest first.
    pub solutions: SolutionSet,
    /// Number of tours in the tabu list at the end.
    pub tabu_size: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Tabu Search runner.
pub struct TabuSearch;

impl TabuSearch {
    /// Executes Tabu Search from `initial` with `strategy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_lkh::matrix::WeightMatrix;
    /// use u_lkh::search::TwoOpt;
    /// use u_lkh::tabu::{TabuSearch, TabuSearchConfig};
    ///
    /// let m = WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    /// let config = TabuSearchConfig::default().with_max_rounds(3).with_seed(1);
    /// let result = TabuSearch::run(&m, vec![0, 2, 1, 3], TwoOpt::new(), &config).unwrap();
    /// assert!((result.best_length - 4.0).abs() < 1e-9);
    /// ```
    pub fn run<S: MoveStrategy>(
        weights: &WeightMatrix,
        initial: Vec<usize>,
        strategy: S,
        config: &TabuSearchConfig,
    ) -> TspResult<TabuSearchResult> {
        Self::run_with_cancel(weights, initial, strategy, config, None)
    }

    /// Executes Tabu Search with an optional cancellation token.
    pub fn run_with_cancel<S: MoveStrategy>(
        weights: &WeightMatrix,
        initial: Vec<usize>,
        strategy: S,
        config: &TabuSearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TspResult<TabuSearchResult> {
        config.validate().map_err(TspError::Config)?;
        validate_tour(&initial, weights.len())?;

        let mut rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut tabu =
            TabuSet::new(config.tabu_capacity).with_orientation(config.search.orientation);
        let mut solutions = SolutionSet::new();
        let mut strategy = strategy;

        let mut start_length = weights.tour_length(&initial);
        tabu.append(start_length, &initial);
        let mut best = initial.clone();
        let mut best_length = start_length;
        let mut start = initial;
        let mut best_round = 0;

        let mut length_history = Vec::with_capacity(config.max_rounds);
        let mut no_improve = 0;
        let mut cancelled = false;

        info!("tabu: start length={start_length:.6}");

        for round in 0..config.max_rounds {
            if cancel.as_ref().is_some_and(|c| c.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }

            let mut engine =
                LocalSearchEngine::new(weights, start, start_length, strategy, config.search.clone())?;
            let outcome = engine.meta_heuristic_optimize(&mut tabu, None)?;
            strategy = engine.into_strategy();

            solutions.insert(outcome.tour.clone(), outcome.length);
            if outcome.length < best_length - config.search.epsilon {
                best = outcome.tour;
                best_length = outcome.length;
                best_round = round + 1;
                no_improve = 0;
            } else {
                no_improve += 1;
            }
            length_history.push(best_length);
            debug!(
                "tabu round {round}: local={:.6} best={best_length:.6} status={:?}",
                outcome.length, outcome.status
            );

            if no_improve >= config.max_no_improve {
                break;
            }

            // Next start: a kicked copy of the best tour the tabu list has not seen.
            let mut next = None;
            for _ in 0..KICK_ATTEMPTS {
                if tabu.is_full() {
                    break;
                }
                let candidate = double_bridge(&best, &mut rng);
                let length = weights.tour_length(&candidate);
                if tabu.append(length, &candidate) {
                    next = Some((candidate, length));
                    break;
                }
            }
            match next {
                Some((tour, length)) => {
                    start = tour;
                    start_length = length;
                }
                None => {
                    debug!("tabu: no unseen perturbation left");
                    break;
                }
            }
        }

        info!(
            "tabu: end best={best_length:.6} rounds={} tabu_size={}",
            length_history.len(),
            tabu.len()
        );

        Ok(TabuSearchResult {
            best,
            best_length,
            rounds: length_history.len(),
            best_round,
            length_history,
            solutions,
            tabu_size: tabu.len(),
            cancelled,
        })
    }
}

/// Double-bridge kick: splits the tour into `A B C D` and returns `A C B D`.
///
/// Tours shorter than 8 nodes get a random segment reversal instead; tours
/// shorter than 4 are returned unchanged.
pub fn double_bridge<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let n = tour.len();
    if n < 8 {
        let mut out = tour.to_vec();
        if n >= 4 {
            let i = rng.random_range(1..n - 1);
            let j = rng.random_range(i + 1..n);
            out[i..=j].reverse();
        }
        return out;
    }

    let mut cuts = rand::seq::index::sample(rng, n - 1, 3).into_vec();
    cuts.iter_mut().for_each(|c| *c += 1);
    cuts.sort_unstable();
    let (p1, p2, p3) = (cuts[0], cuts[1], cuts[2]);

    let mut out = Vec::with_capacity(n);
    out.extend_from_slice(&tour[..p1]);
    out.extend_from_slice(&tour[p2..p3]);
    out.extend_from_slice(&tour[p1..p2]);
    out.extend_from_slice(&tour[p3..]);
    out
}
