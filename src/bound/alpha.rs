//! Alpha-nearness.
//!
//! `alpha(i, j)` is the increase in 1-tree weight when edge `(i, j)` is
//! forced into the minimum 1-tree. For two non-special nodes the new edge
//! closes a cycle and the heaviest tree edge on that cycle is dropped, so
//!
//! ```text
//! alpha(i, j) = w(i, j) - beta(i, j)
//! ```
//!
//! where `beta(i, j)` is the maximum edge weight on the tree path from `i`
//! to `j`. For an edge at the special node, the heavier of the two
//! attachment edges is dropped instead.
//!
//! Each row costs one O(N) pass over the tree in topological order, so the
//! whole matrix is O(N²). With the `parallel` feature the rows are computed
//! with rayon.
//!
//! # Reference
//!
//! Helsgaun, K. (2000). "An effective implementation of the Lin-Kernighan
//! traveling salesman heuristic", *European Journal of Operational Research*
//! 126(1), 106-130.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::one_tree::OneTree;
use crate::matrix::WeightMatrix;

/// N×N matrix of alpha values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaMatrix {
    n: usize,
    data: Vec<f64>,
}

impl AlphaMatrix {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if the matrix has no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Alpha value of edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// For every node, the `k` neighbours with the lowest alpha.
    ///
    /// Ties are broken by weight, then by node index.
    pub fn candidates(&self, weights: &WeightMatrix, k: usize) -> Vec<Vec<usize>> {
        (0..self.n)
            .map(|i| {
                let mut nbrs: Vec<usize> = (0..self.n).filter(|&j| j != i).collect();
                nbrs.sort_by(|&a, &b| {
                    self.get(i, a)
                        .total_cmp(&self.get(i, b))
                        .then(weights.get(i, a).total_cmp(&weights.get(i, b)))
                        .then(a.cmp(&b))
                });
                nbrs.truncate(k);
                nbrs
            })
            .collect()
    }
}

/// Alpha-nearness computation.
pub struct AlphaNearness;

impl AlphaNearness {
    /// Computes the alpha matrix of `tree`, which must have been built from
    /// `weights`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_lkh::bound::{AlphaNearness, MinimumOneTree};
    /// use u_lkh::matrix::WeightMatrix;
    ///
    /// let m = WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    /// let tree = MinimumOneTree::build(&m).unwrap();
    /// let alpha = AlphaNearness::build(&m, &tree);
    /// assert_eq!(alpha.get(0, 1), 0.0);
    /// assert!(alpha.get(0, 2) > 0.0);
    /// ```
    pub fn build(weights: &WeightMatrix, tree: &OneTree) -> AlphaMatrix {
        let n = weights.len();
        let special = tree.special();
        let mut data = vec![0.0; n * n];

        let row_of = |i: usize| tree_row(weights, tree, i);

        #[cfg(feature = "parallel")]
        let rows: Vec<(usize, Vec<f64>)> = tree.order().par_iter().map(|&i| (i, row_of(i))).collect();
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<(usize, Vec<f64>)> = tree.order().iter().map(|&i| (i, row_of(i))).collect();

        for (i, row) in rows {
            data[i * n..(i + 1) * n].copy_from_slice(&row);
        }

        let [first, second] = tree.attachments();
        let dropped = first.1.max(second.1);
        for j in (0..n).filter(|&j| j != special) {
            let a = if j == first.0 || j == second.0 {
                0.0
            } else {
                (weights.get(special, j) - dropped).max(0.0)
            };
            data[special * n + j] = a;
            data[j * n + special] = a;
        }

        AlphaMatrix { n, data }
    }
}

/// Row `i` of the alpha matrix over the non-special nodes. The entry at the
/// special node is left at 0 and filled in by the caller.
fn tree_row(weights: &WeightMatrix, tree: &OneTree, i: usize) -> Vec<f64> {
    let n = weights.len();
    let mut row = vec![0.0; n];
    let mut beta = vec![f64::NEG_INFINITY; n];
    let mut on_path = vec![false; n];

    // Path from i up to the root.
    on_path[i] = true;
    let mut k = i;
    while let Some(p) = tree.parent(k) {
        beta[p] = beta[k].max(weights.get(k, p));
        on_path[p] = true;
        k = p;
    }

    for &j in tree.order() {
        if j == i {
            continue;
        }
        if !on_path[j] {
            if let Some(p) = tree.parent(j) {
                beta[j] = beta[p].max(weights.get(j, p));
            }
        }
        row[j] = (weights.get(i, j) - beta[j]).max(0.0);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::MinimumOneTree;
    use proptest::prelude::*;

    fn unit_square() -> WeightMatrix {
        WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn test_unit_square_alpha() {
        let m = unit_square();
        let tree = MinimumOneTree::build(&m).unwrap();
        let alpha = AlphaNearness::build(&m, &tree);

        for (a, b) in tree.edges().pool().iter() {
            assert_eq!(alpha.get(a, b), 0.0);
            assert_eq!(alpha.get(b, a), 0.0);
        }
        let expected = 2f64.sqrt() - 1.0;
        assert!((alpha.get(0, 2) - expected).abs() < 1e-12);
        assert!((alpha.get(1, 3) - expected).abs() < 1e-12);
        assert!(alpha.get(0, 2) > 0.0);
        assert!(alpha.get(1, 3) > 0.0);
    }

    #[test]
    fn test_matches_forced_rebuild() {
        // Path 1-2-3-4 on a line plus special node 0 far above: forcing (1, 4)
        // drops the heaviest path edge.
        let m = WeightMatrix::from_points(&[
            (2.0, 10.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.0),
        ]);
        let tree = MinimumOneTree::build(&m).unwrap();
        let alpha = AlphaNearness::build(&m, &tree);
        // Path weights 1, 2, 1 -> beta(1, 4) = 2.
        assert!((alpha.get(1, 4) - (4.0 - 2.0)).abs() < 1e-12);
        assert!((alpha.get(1, 3) - (3.0 - 2.0)).abs() < 1e-12);
        assert_eq!(alpha.get(2, 3), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let m = WeightMatrix::from_points(&[
            (0.0, 0.0),
            (3.0, 1.0),
            (6.0, 0.5),
            (2.0, 5.0),
            (5.0, 4.0),
            (1.0, 2.0),
        ]);
        let tree = MinimumOneTree::build(&m).unwrap();
        let alpha = AlphaNearness::build(&m, &tree);
        for i in 0..m.len() {
            assert_eq!(alpha.get(i, i), 0.0);
            for j in 0..m.len() {
                assert!((alpha.get(i, j) - alpha.get(j, i)).abs() < 1e-9);
                assert!(alpha.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_candidates_prefer_tree_edges() {
        let m = unit_square();
        let tree = MinimumOneTree::build(&m).unwrap();
        let alpha = AlphaNearness::build(&m, &tree);
        let cands = alpha.candidates(&m, 2);
        assert_eq!(cands[0], vec![1, 3]);
        assert_eq!(cands[2], vec![1, 3]);
        let all = alpha.candidates(&m, 10);
        assert!(all.iter().all(|c| c.len() == 3));
        assert_eq!(all[0][2], 2);
    }

    proptest! {
        #[test]
        fn prop_tree_edges_have_zero_alpha(
            points in prop::collection::vec((0.0f64..50.0, 0.0f64..50.0), 3..20),
        ) {
            let m = WeightMatrix::from_points(&points);
            let tree = MinimumOneTree::build(&m).unwrap();
            let alpha = AlphaNearness::build(&m, &tree);
            for (a, b) in tree.edges().pool().iter() {
                prop_assert_eq!(alpha.get(a, b), 0.0);
            }
        }
    }
}
