//! Helsgaun-style initial tour construction.
//!
//! # Algorithm
//!
//! 1. Pick a random start node
//! 2. From the current node, choose the next unvisited node among its
//!    alpha-ranked candidates whose alpha does not exceed `excess`,
//!    preferring
//!    a. a zero-alpha candidate that is also an edge of the best known tour
//!    b. otherwise the lowest-alpha admissible candidate
//! 3. If no candidate is admissible, fall back to the cheapest unvisited
//!    node by raw weight
//! 4. Close the cycle back to the start
//!
//! The fallback always succeeds, so construction never fails on a valid
//! instance; the number of fallback steps is reported instead.
//!
//! # Reference
//!
//! Helsgaun, K. (2000), Section 5.2.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::solutions::Solution;
use crate::bound::AlphaMatrix;
use crate::error::{TspError, TspResult};
use crate::matrix::WeightMatrix;
use crate::tour::{positions, validate_tour};

/// Configuration for [`InitialTourBuilder`].
///
/// # Examples
///
/// ```
/// use u_lkh::construct::InitialTourConfig;
///
/// let config = InitialTourConfig::default().with_candidate_count(8).with_seed(7);
/// assert_eq!(config.candidate_count, 8);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialTourConfig {
    /// Number of alpha-ranked candidates considered per node.
    pub candidate_count: usize,
    /// Random seed for the start node (None for random).
    pub seed: Option<u64>,
}

impl Default for InitialTourConfig {
    fn default() -> Self {
        Self {
            candidate_count: 5,
            seed: None,
        }
    }
}

impl InitialTourConfig {
    /// Sets the number of candidates per node.
    pub fn with_candidate_count(mut self, k: usize) -> Self {
        self.candidate_count = k;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A constructed tour.
#[derive(Debug, Clone)]
pub struct InitialTour {
    /// Node order.
    pub tour: Vec<usize>,
    /// Closed tour length under the weights used for construction.
    pub length: f64,
    /// Steps that had to leave the candidate set.
    pub fallback_steps: usize,
}

/// Greedy tour builder driven by alpha-nearness candidates.
#[derive(Debug, Clone, Default)]
pub struct InitialTourBuilder {
    config: InitialTourConfig,
}

impl InitialTourBuilder {
    /// Creates a builder.
    pub fn new(config: InitialTourConfig) -> Self {
        Self { config }
    }

    /// Builds a tour.
    ///
    /// `best_known` (typically [`SolutionSet::get_best`](super::SolutionSet::get_best))
    /// breaks ties among zero-alpha candidates in favour of its edges.
    /// Candidates with `alpha > excess` are not admissible.
    pub fn build(
        &self,
        alpha: &AlphaMatrix,
        weights: &WeightMatrix,
        best_known: Option<&Solution>,
        excess: f64,
    ) -> TspResult<InitialTour> {
        let n = weights.len();
        if alpha.len() != n {
            return Err(TspError::matrix(format!(
                "alpha matrix has {} nodes, weights have {n}",
                alpha.len()
            )));
        }
        if excess.is_nan() || excess < 0.0 {
            return Err(TspError::Config(format!(
                "excess must be non-negative, got {excess}"
            )));
        }
        if let Some(best) = best_known {
            validate_tour(&best.tour, n)?;
        }
        if n == 0 {
            return Ok(InitialTour {
                tour: Vec::new(),
                length: 0.0,
                fallback_steps: 0,
            });
        }

        let mut rng = match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let candidates = alpha.candidates(weights, self.config.candidate_count);
        let best_pos = best_known.map(|b| positions(&b.tour));
        let in_best = |i: usize, j: usize| -> bool {
            match (best_known, &best_pos) {
                (Some(best), Some(pos)) => {
                    let p = pos[i];
                    best.tour[(p + 1) % n] == j || best.tour[(p + n - 1) % n] == j
                }
                _ => false,
            }
        };

        let start = rng.random_range(0..n);
        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        visited[start] = true;
        tour.push(start);
        let mut current = start;
        let mut fallback_steps = 0;

        while tour.len() < n {
            let mut first_admissible = None;
            let mut preferred = None;
            for &j in &candidates[current] {
                let a = alpha.get(current, j);
                if visited[j] || a > excess {
                    continue;
                }
                if first_admissible.is_none() {
                    first_admissible = Some(j);
                }
                if a == 0.0 && in_best(current, j) {
                    preferred = Some(j);
                    break;
                }
            }

            let next = match preferred.or(first_admissible) {
                Some(j) => j,
                None => {
                    fallback_steps += 1;
                    cheapest_unvisited(weights, current, &visited)
                }
            };

            visited[next] = true;
            tour.push(next);
            current = next;
        }

        if fallback_steps > 0 {
            warn!("initial tour: {fallback_steps} steps left the candidate set");
        }
        let length = weights.tour_length(&tour);
        debug!("initial tour: length={length:.6} start={start}");

        Ok(InitialTour {
            tour,
            length,
            fallback_steps,
        })
    }
}

fn cheapest_unvisited(weights: &WeightMatrix, from: usize, visited: &[bool]) -> usize {
    let mut best = usize::MAX;
    let mut best_w = f64::INFINITY;
    for (j, &seen) in visited.iter().enumerate() {
        if seen {
            continue;
        }
        let w = weights.get(from, j);
        if best == usize::MAX || w < best_w {
            best = j;
            best_w = w;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::{AlphaNearness, MinimumOneTree};
    use proptest::prelude::*;

    fn prepare(points: &[(f64, f64)]) -> (WeightMatrix, AlphaMatrix, f64) {
        let m = WeightMatrix::from_points(points);
        let tree = MinimumOneTree::build(&m).unwrap();
        let alpha = AlphaNearness::build(&m, &tree);
        let excess = tree.total_price() / m.len() as f64;
        (m, alpha, excess)
    }

    #[test]
    fn test_unit_square_optimal() {
        let (m, alpha, excess) =
            prepare(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let builder = InitialTourBuilder::new(InitialTourConfig::default().with_seed(3));
        let result = builder.build(&alpha, &m, None, excess).unwrap();
        assert!(validate_tour(&result.tour, 4).is_ok());
        assert!((result.length - 4.0).abs() < 1e-12);
        assert_eq!(result.fallback_steps, 0);
    }

    #[test]
    fn test_fallback_when_no_candidates() {
        let (m, alpha, _) = prepare(&[
            (0.0, 0.0),
            (4.0, 1.0),
            (2.0, 3.0),
            (7.0, 2.0),
            (5.0, 6.0),
            (1.0, 5.0),
        ]);
        let builder = InitialTourBuilder::new(
            InitialTourConfig::default()
                .with_candidate_count(0)
                .with_seed(1),
        );
        let result = builder.build(&alpha, &m, None, 0.0).unwrap();
        assert!(validate_tour(&result.tour, 6).is_ok());
        assert_eq!(result.fallback_steps, 5);
        assert!((result.length - m.tour_length(&result.tour)).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_tour() {
        let (m, alpha, excess) = prepare(&[
            (0.0, 0.0),
            (4.0, 1.0),
            (2.0, 3.0),
            (7.0, 2.0),
            (5.0, 6.0),
            (1.0, 5.0),
        ]);
        let builder = InitialTourBuilder::new(InitialTourConfig::default().with_seed(11));
        let a = builder.build(&alpha, &m, None, excess).unwrap();
        let b = builder.build(&alpha, &m, None, excess).unwrap();
        assert_eq!(a.tour, b.tour);
    }

    #[test]
    fn test_rejects_bad_best_known() {
        let (m, alpha, excess) =
            prepare(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let best = Solution {
            tour: vec![0, 1, 2],
            length: 3.0,
        };
        let builder = InitialTourBuilder::default();
        assert!(matches!(
            builder.build(&alpha, &m, Some(&best), excess),
            Err(TspError::InvalidTour { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_excess() {
        let (m, alpha, _) = prepare(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let builder = InitialTourBuilder::default();
        assert!(matches!(
            builder.build(&alpha, &m, None, -1.0),
            Err(TspError::Config(_))
        ));
    }

    #[test]
    fn test_best_known_edges_preferred() {
        // Two zero-alpha choices at the middle of a line: the best known tour
        // decides which one is taken.
        let (m, alpha, _) = prepare(&[
            (0.0, 5.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
        ]);
        let best = Solution {
            tour: vec![0, 1, 2, 3],
            length: m.tour_length(&[0, 1, 2, 3]),
        };
        for seed in 0..8 {
            let builder = InitialTourBuilder::new(InitialTourConfig::default().with_seed(seed));
            let result = builder.build(&alpha, &m, Some(&best), 0.0).unwrap();
            assert!(validate_tour(&result.tour, 4).is_ok());
            assert!(result.length <= m.tour_length(&[0, 2, 1, 3]) + 1e-12);
        }
    }

    proptest! {
        #[test]
        fn prop_builds_permutation(
            points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 3..30),
            k in 0usize..6,
            seed in any::<u64>(),
        ) {
            let (m, alpha, excess) = prepare(&points);
            let builder = InitialTourBuilder::new(
                InitialTourConfig::default().with_candidate_count(k).with_seed(seed),
            );
            let result = builder.build(&alpha, &m, None, excess).unwrap();
            prop_assert!(validate_tour(&result.tour, points.len()).is_ok());
        }
    }
}
