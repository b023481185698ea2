//! Minimum 1-tree construction.
//!
//! A 1-tree is a minimum spanning tree over every node except a designated
//! special node, plus the special node's two cheapest incident edges. Every
//! tour is a 1-tree, so the minimum 1-tree weight is a lower bound on the
//! optimal tour length.
//!
//! # Complexity
//!
//! O(N²) dense Prim; no heap is needed when every pair is an edge.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1970). "The traveling-salesman problem and minimum
//! spanning trees", *Operations Research* 18(6), 1138-1162.

use crate::error::{TspError, TspResult};
use crate::graph::Graph;
use crate::matrix::WeightMatrix;

/// A minimum 1-tree.
#[derive(Debug, Clone)]
pub struct OneTree {
    special: usize,
    edges: Graph,
    parent: Vec<Option<usize>>,
    order: Vec<usize>,
    attachments: [(usize, f64); 2],
    degrees: Vec<usize>,
}

impl OneTree {
    /// Node attached through its two cheapest edges.
    pub fn special(&self) -> usize {
        self.special
    }

    /// Total weight: spanning tree plus both attachment edges.
    pub fn total_price(&self) -> f64 {
        self.edges.total_length()
    }

    /// All N edges of the 1-tree.
    pub fn edges(&self) -> &Graph {
        &self.edges
    }

    /// Degree of `node` in the 1-tree.
    pub fn degree(&self, node: usize) -> usize {
        self.degrees[node]
    }

    /// Degrees of all nodes.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Spanning-tree parent of `node`; `None` for the root and the special node.
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parent[node]
    }

    /// Non-special nodes in insertion order; every parent precedes its children.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The special node's two edges as `(neighbour, weight)`, cheapest first.
    pub fn attachments(&self) -> [(usize, f64); 2] {
        self.attachments
    }

    /// True when every node has degree 2, i.e. the 1-tree is a tour.
    pub fn is_tour(&self) -> bool {
        self.degrees.iter().all(|&d| d == 2)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Returns true if the tree spans no nodes.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }
}

/// Builder for minimum 1-trees.
pub struct MinimumOneTree;

impl MinimumOneTree {
    /// Builds the minimum 1-tree with node 0 as the special node.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_lkh::bound::MinimumOneTree;
    /// use u_lkh::matrix::WeightMatrix;
    ///
    /// let m = WeightMatrix::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    /// let tree = MinimumOneTree::build(&m).unwrap();
    /// assert!((tree.total_price() - 4.0).abs() < 1e-12);
    /// assert!(tree.is_tour());
    /// ```
    pub fn build(weights: &WeightMatrix) -> TspResult<OneTree> {
        Self::build_with_special(weights, 0)
    }

    /// Builds the minimum 1-tree around `special`.
    pub fn build_with_special(weights: &WeightMatrix, special: usize) -> TspResult<OneTree> {
        let n = weights.len();
        if n < 3 {
            return Err(TspError::matrix(format!("a 1-tree needs at least 3 nodes, got {n}")));
        }
        if special >= n {
            return Err(TspError::Config(format!(
                "special node {special} out of range 0..{n}"
            )));
        }

        let mut edges = Graph::new();
        let mut in_tree = vec![false; n];
        let mut key = vec![f64::INFINITY; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut order = Vec::with_capacity(n - 1);

        in_tree[special] = true;
        let root = if special == 0 { 1 } else { 0 };
        key[root] = 0.0;

        for _ in 0..n - 1 {
            let mut next = None;
            let mut best = f64::INFINITY;
            for v in 0..n {
                if !in_tree[v] && (next.is_none() || key[v] < best) {
                    next = Some(v);
                    best = key[v];
                }
            }
            let Some(u) = next else { break };

            in_tree[u] = true;
            order.push(u);
            if let Some(p) = parent[u] {
                edges.add(p, u, weights.get(p, u))?;
            }

            for v in 0..n {
                if !in_tree[v] {
                    let w = weights.get(u, v);
                    if w < key[v] {
                        key[v] = w;
                        parent[v] = Some(u);
                    }
                }
            }
        }

        let attachments = two_cheapest(weights, special);
        for &(v, w) in &attachments {
            edges.add(special, v, w)?;
        }

        let degrees = (0..n).map(|v| edges.degree(v)).collect();

        Ok(OneTree {
            special,
            edges,
            parent,
            order,
            attachments,
            degrees,
        })
    }
}

/// The two cheapest edges at `node`, cheapest first. Requires n >= 3.
fn two_cheapest(weights: &WeightMatrix, node: usize) -> [(usize, f64); 2] {
    let mut first = (usize::MAX, f64::INFINITY);
    let mut second = (usize::MAX, f64::INFINITY);
    for v in (0..weights.len()).filter(|&v| v != node) {
        let w = weights.get(node, v);
        if first.0 == usize::MAX || w < first.1 {
            second = first;
            first = (v, w);
        } else if second.0 == usize::MAX || w < second.1 {
            second = (v, w);
        }
    }
    [first, second]
}
