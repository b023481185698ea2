//! Core trait for local-search move strategies.

use crate::matrix::WeightMatrix;

/// Mutable search state handed to a [`MoveStrategy`].
///
/// A strategy that changes `tour` must change `length` by exactly the same
/// amount; the engine verifies this after every improving call.
#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    weights: &'a WeightMatrix,
    /// Current tour.
    pub tour: Vec<usize>,
    /// Tracked length of `tour`.
    pub length: f64,
}

impl<'a> SearchState<'a> {
    /// Creates a state. The caller is responsible for `length` matching `tour`.
    pub fn new(weights: &'a WeightMatrix, tour: Vec<usize>, length: f64) -> Self {
        Self {
            weights,
            tour,
            length,
        }
    }

    /// The read-only weight matrix.
    pub fn weights(&self) -> &'a WeightMatrix {
        self.weights
    }

    /// Length of `tour` recomputed from scratch.
    pub fn recompute_length(&self) -> f64 {
        self.weights.tour_length(&self.tour)
    }
}

/// An edge-exchange move strategy (2-opt, 3-opt, Lin-Kernighan, ...).
///
/// # Examples
///
/// ```
/// use u_lkh::search::{MoveStrategy, SearchState};
///
/// /// Never finds anything.
/// struct Idle;
///
/// impl MoveStrategy for Idle {
///     fn name(&self) -> &str { "idle" }
///     fn improve(&mut self, _state: &mut SearchState<'_>) -> f64 { 0.0 }
/// }
/// ```
pub trait MoveStrategy {
    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;

    /// Searches for an improving move and applies it.
    ///
    /// Returns the length reduction achieved; a value `<= 0` means no
    /// improving move was found and the state is unchanged.
    fn improve(&mut self, state: &mut SearchState<'_>) -> f64;
}

impl<S: MoveStrategy + ?Sized> MoveStrategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn improve(&mut self, state: &mut SearchState<'_>) -> f64 {
        (**self).improve(state)
    }
}
