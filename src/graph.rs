//! Undirected edge sets.
//!
//! [`EdgePool`] stores canonical `(min, max)` pairs and rejects self-loops
//! and duplicates; [`Graph`] adds a price per insertion and keeps the total.
//! Both invariants are hard: a violation means the caller has a bug.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{TspError, TspResult};

/// A priced undirected edge in canonical order (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Smaller endpoint.
    pub a: usize,
    /// Larger endpoint.
    pub b: usize,
    /// Edge weight.
    pub price: f64,
}

impl Edge {
    /// Creates a canonical edge. Fails on a self-loop.
    pub fn new(a: usize, b: usize, price: f64) -> TspResult<Self> {
        let (a, b) = canonical(a, b)?;
        Ok(Self { a, b, price })
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other(&self, node: usize) -> Option<usize> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

fn canonical(a: usize, b: usize) -> TspResult<(usize, usize)> {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => Ok((a, b)),
        std::cmp::Ordering::Greater => Ok((b, a)),
        std::cmp::Ordering::Equal => Err(TspError::SelfLoop { node: a }),
    }
}

/// Set of canonical undirected edges.
///
/// # Examples
///
/// ```
/// use u_lkh::graph::EdgePool;
/// use u_lkh::error::TspError;
///
/// let mut pool = EdgePool::new();
/// pool.add(3, 1).unwrap();
/// assert!(pool.contains(1, 3));
/// assert_eq!(pool.add(1, 3), Err(TspError::DuplicateEdge { a: 1, b: 3 }));
/// assert_eq!(pool.add(2, 2), Err(TspError::SelfLoop { node: 2 }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgePool {
    edges: BTreeSet<(usize, usize)>,
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl EdgePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts edge `(a, b)`.
    pub fn add(&mut self, a: usize, b: usize) -> TspResult<()> {
        let (a, b) = canonical(a, b)?;
        if !self.edges.insert((a, b)) {
            return Err(TspError::DuplicateEdge { a, b });
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        Ok(())
    }

    /// Canonical edges incident to `node`, in ascending order.
    pub fn search(&self, node: usize) -> Vec<(usize, usize)> {
        self.adjacency
            .get(&node)
            .map(|nbrs| nbrs.iter().map(|&m| (node.min(m), node.max(m))).collect())
            .unwrap_or_default()
    }

    /// Neighbours of `node`, in ascending order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(&node).into_iter().flatten().copied()
    }

    /// Canonical membership test; self-loops are never members.
    pub fn contains(&self, a: usize, b: usize) -> bool {
        canonical(a, b).is_ok_and(|e| self.edges.contains(&e))
    }

    /// Number of incident edges.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(&node).map_or(0, BTreeSet::len)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the pool holds no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All edges in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}

/// Weighted edge pool that accumulates the total length of its edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pool: EdgePool,
    prices: BTreeMap<(usize, usize), f64>,
    total_length: f64,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts edge `(a, b)` with `price`, adding it to the total length.
    pub fn add(&mut self, a: usize, b: usize, price: f64) -> TspResult<()> {
        self.pool.add(a, b)?;
        self.prices.insert((a.min(b), a.max(b)), price);
        self.total_length += price;
        Ok(())
    }

    /// Sum of all inserted prices.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Price of edge `(a, b)`, if present.
    pub fn price(&self, a: usize, b: usize) -> Option<f64> {
        self.prices.get(&(a.min(b), a.max(b))).copied()
    }

    /// The underlying edge pool.
    pub fn pool(&self) -> &EdgePool {
        &self.pool
    }

    /// See [`EdgePool::search`].
    pub fn search(&self, node: usize) -> Vec<(usize, usize)> {
        self.pool.search(node)
    }

    /// See [`EdgePool::contains`].
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pool.contains(a, b)
    }

    /// See [`EdgePool::degree`].
    pub fn degree(&self, node: usize) -> usize {
        self.pool.degree(node)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Returns true if the graph holds no edges.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// All edges with their prices, in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.prices
            .iter()
            .map(|(&(a, b), &price)| Edge { a, b, price })
    }
}
