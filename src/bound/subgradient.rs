//! Held-Karp lower bound by subgradient optimization.
//!
//! # Algorithm
//!
//! 1. Build the minimum 1-tree under `w'(i, j) = w(i, j) + pi[i] + pi[j]`
//! 2. `bound = total_price - 2 * sum(pi)`
//! 3. `pi[i] += step * (degree[i] - 2)` pushes every degree towards 2
//! 4. Shrink `step` geometrically
//!
//! Stops when the 1-tree is a tour (the bound is tight), the iteration
//! budget runs out, or the step underflows. The bound is not monotone across
//! iterations, so the maximum is tracked together with the penalties that
//! produced it.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1971). "The traveling-salesman problem and minimum
//! spanning trees: Part II", *Mathematical Programming* 1, 6-25.

use log::{debug, info};

use super::config::SubgradientConfig;
use super::one_tree::MinimumOneTree;
use crate::error::{TspError, TspResult};
use crate::matrix::WeightMatrix;

/// Why the subgradient loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubgradientStop {
    /// The 1-tree became a tour; the bound equals its length.
    TourFound,
    /// `max_iterations` 1-trees were evaluated.
    IterationLimit,
    /// The step fell below `min_step`.
    StepExhausted,
}

/// Result of a subgradient run.
#[derive(Debug, Clone)]
pub struct SubgradientResult {
    /// Penalties after the last update.
    pub pi: Vec<f64>,
    /// Penalties that produced `best_bound`.
    pub best_pi: Vec<f64>,
    /// Largest lower bound observed.
    pub best_bound: f64,
    /// Number of 1-trees evaluated.
    pub iterations: usize,
    /// Termination reason.
    pub stop: SubgradientStop,
    /// Bound at every iteration.
    pub bound_history: Vec<f64>,
}

/// Subgradient optimizer for the Held-Karp bound.
pub struct SubgradientBound;

impl SubgradientBound {
    /// Runs subgradient optimization on `weights`.
    ///
    /// Non-convergence is not an error: the best bound seen so far is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_lkh::bound::{SubgradientBound, SubgradientConfig};
    /// use u_lkh::matrix::WeightMatrix;
    ///
    /// let m = WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    /// let result = SubgradientBound::run(&m, &SubgradientConfig::default()).unwrap();
    /// assert!(result.best_bound <= 4.0 + 1e-9);
    /// ```
    pub fn run(weights: &WeightMatrix, config: &SubgradientConfig) -> TspResult<SubgradientResult> {
        config.validate().map_err(TspError::Config)?;

        let n = weights.len();
        let mut pi = vec![0.0; n];
        let mut best_pi = pi.clone();
        let mut best_bound = f64::NEG_INFINITY;
        let mut step: Option<f64> = None;
        let mut stop = SubgradientStop::IterationLimit;
        let mut bound_history = Vec::with_capacity(config.max_iterations);

        for iteration in 0..config.max_iterations {
            let penalized = weights.penalized(&pi)?;
            let tree = MinimumOneTree::build_with_special(&penalized, config.special_node)?;
            let bound = tree.total_price() - 2.0 * pi.iter().sum::<f64>();
            bound_history.push(bound);

            if bound > best_bound {
                best_bound = bound;
                best_pi.clone_from(&pi);
            }

            if tree.is_tour() {
                stop = SubgradientStop::TourFound;
                break;
            }

            let t = *step.get_or_insert_with(|| {
                config
                    .initial_step
                    .unwrap_or_else(|| (0.01 * bound.abs() / n as f64).max(1e-6))
            });
            if t < config.min_step {
                stop = SubgradientStop::StepExhausted;
                break;
            }

            for (p, &degree) in pi.iter_mut().zip(tree.degrees()) {
                *p += t * (degree as f64 - 2.0);
            }
            step = Some(t * config.step_decay);

            debug!("subgradient {iteration}: bound={bound:.6} best={best_bound:.6} step={t:.3e}");
        }

        info!(
            "subgradient: best_bound={best_bound:.6} iterations={} stop={stop:?}",
            bound_history.len()
        );

        Ok(SubgradientResult {
            pi,
            best_pi,
            best_bound,
            iterations: bound_history.len(),
            stop,
            bound_history,
        })
    }
}
