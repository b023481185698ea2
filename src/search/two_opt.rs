//! 2-opt move strategy.
//!
//! # Algorithm
//!
//! For tour edges `(a, b)` and `(c, d)`, where `b` follows `a` and `d`
//! follows `c`, reconnecting them as `(a, c)` and `(b, d)` changes the length
//! by
//!
//! ```text
//! delta = w(a, c) + w(b, d) - w(a, b) - w(c, d)
//! ```
//!
//! Each call applies the best move with `delta < 0` by reversing the path
//! between the two edges. With candidate lists only `c` among the candidates
//! of `a` are tried.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::types::{MoveStrategy, SearchState};
use crate::tour::positions;

const MIN_IMPROVEMENT: f64 = 1e-10;

/// Best-improvement 2-opt.
#[derive(Debug, Clone, Default)]
pub struct TwoOpt {
    candidates: Option<Vec<Vec<usize>>>,
}

impl TwoOpt {
    /// Full O(N²) neighbourhood.
    pub fn new() -> Self {
        Self::default()
    }

    /// Neighbourhood restricted to `candidates[a]` for every node `a`,
    /// e.g. the alpha-nearness candidate lists.
    pub fn with_candidates(candidates: Vec<Vec<usize>>) -> Self {
        Self {
            candidates: Some(candidates),
        }
    }

    fn best_move(&self, state: &SearchState<'_>) -> Option<(usize, usize, f64)> {
        let tour = &state.tour;
        let w = state.weights();
        let n = tour.len();
        let mut best: Option<(usize, usize, f64)> = None;
        let mut best_delta = -MIN_IMPROVEMENT;

        let mut consider = |i: usize, j: usize| {
            let (a, b) = (tour[i], tour[(i + 1) % n]);
            let (c, d) = (tour[j], tour[(j + 1) % n]);
            if c == b || d == a || a == c {
                return;
            }
            let delta = w.get(a, c) + w.get(b, d) - w.get(a, b) - w.get(c, d);
            if delta < best_delta {
                best_delta = delta;
                best = Some((i.min(j), i.max(j), delta));
            }
        };

        match &self.candidates {
            None => {
                for i in 0..n - 1 {
                    for j in (i + 2)..n {
                        consider(i, j);
                    }
                }
            }
            Some(candidates) => {
                let pos = positions(tour);
                for i in 0..n {
                    for &c in candidates.get(tour[i]).into_iter().flatten() {
                        consider(i, pos[c]);
                    }
                }
            }
        }
        best
    }
}

impl MoveStrategy for TwoOpt {
    fn name(&self) -> &str {
        "two_opt"
    }

    fn improve(&mut self, state: &mut SearchState<'_>) -> f64 {
        if state.tour.len() < 4 {
            return 0.0;
        }
        match self.best_move(state) {
            Some((i, j, delta)) => {
                state.tour[i + 1..=j].reverse();
                state.length += delta;
                -delta
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::{AlphaNearness, MinimumOneTree};
    use crate::matrix::WeightMatrix;

    fn ring(n: usize) -> WeightMatrix {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let a = k as f64 * 2.0 * std::f64::consts::PI / n as f64;
                (10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        WeightMatrix::from_points(&points)
    }

    fn run_to_convergence(strategy: &mut TwoOpt, state: &mut SearchState<'_>) -> usize {
        let mut moves = 0;
        while strategy.improve(state) > 0.0 {
            moves += 1;
            assert!((state.recompute_length() - state.length).abs() < 1e-6);
        }
        moves
    }

    #[test]
    fn test_single_move_gain_matches_length() {
        let m = WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let tour = vec![0, 2, 1, 3];
        let before = m.tour_length(&tour);
        let mut state = SearchState::new(&m, tour, before);
        let gain = TwoOpt::new().improve(&mut state);
        assert!((gain - (before - 4.0)).abs() < 1e-12);
        assert!((state.length - 4.0).abs() < 1e-12);
        assert!((state.recompute_length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ring_reaches_perimeter() {
        let m = ring(10);
        let optimum = m.tour_length(&(0..10).collect::<Vec<_>>());
        let tour = vec![0, 5, 1, 6, 2, 7, 3, 8, 4, 9];
        let len = m.tour_length(&tour);
        let mut state = SearchState::new(&m, tour, len);
        let moves = run_to_convergence(&mut TwoOpt::new(), &mut state);
        assert!(moves > 0);
        assert!((state.length - optimum).abs() < 1e-6);
    }

    #[test]
    fn test_candidates_restrict_search() {
        let m = ring(12);
        let tree = MinimumOneTree::build(&m).unwrap();
        let alpha = AlphaNearness::build(&m, &tree);
        let candidates = alpha.candidates(&m, 4);

        let tour = vec![0, 6, 1, 7, 2, 8, 3, 9, 4, 10, 5, 11];
        let len = m.tour_length(&tour);
        let mut state = SearchState::new(&m, tour, len);
        let mut strategy = TwoOpt::with_candidates(candidates);
        run_to_convergence(&mut strategy, &mut state);
        assert!(state.length < len);
        assert!((state.recompute_length() - state.length).abs() < 1e-6);
    }

    #[test]
    fn test_small_tours_untouched() {
        let m = ring(3);
        let mut state = SearchState::new(&m, vec![0, 2, 1], m.tour_length(&[0, 2, 1]));
        assert_eq!(TwoOpt::new().improve(&mut state), 0.0);
        assert_eq!(state.tour, vec![0, 2, 1]);
    }

    #[test]
    fn test_local_optimum_reports_no_gain() {
        let m = ring(8);
        let tour: Vec<usize> = (0..8).collect();
        let len = m.tour_length(&tour);
        let mut state = SearchState::new(&m, tour.clone(), len);
        assert_eq!(TwoOpt::new().improve(&mut state), 0.0);
        assert_eq!(state.tour, tour);
    }
}
