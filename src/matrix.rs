//! Symmetric weight matrix.
//!
//! [`WeightMatrix`] stores the complete N×N distance table row-major. It is
//! immutable once built; the subgradient step derives penalized copies via
//! [`WeightMatrix::penalized`] instead of editing in place.

use crate::error::{TspError, TspResult};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Symmetric N×N matrix of edge weights. The diagonal is unused and kept at 0.
///
/// # Examples
///
/// ```
/// use u_lkh::matrix::WeightMatrix;
///
/// let m = WeightMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0)]);
/// assert_eq!(m.len(), 2);
/// assert!((m.get(0, 1) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightMatrix {
    n: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    /// Builds a Euclidean matrix from 2-D coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// Fails if the rows are not square, contain non-finite values off the
    /// diagonal, or are not symmetric.
    pub fn from_rows(rows: &[Vec<f64>]) -> TspResult<Self> {
        let n = rows.len();
        let mut data = vec![0.0; n * n];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(TspError::matrix(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, &w) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                if !w.is_finite() {
                    return Err(TspError::matrix(format!("non-finite weight at ({i}, {j})")));
                }
                data[i * n + j] = w;
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (data[i * n + j] - data[j * n + i]).abs() > SYMMETRY_TOLERANCE {
                    return Err(TspError::matrix(format!("asymmetric at ({i}, {j})")));
                }
            }
        }
        Ok(Self { n, data })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if the matrix has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Weight of edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Returns row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Derives `w'(i, j) = w(i, j) + pi[i] + pi[j]`; the diagonal stays 0.
    ///
    /// Fails if `pi` does not have one entry per node.
    pub fn penalized(&self, pi: &[f64]) -> TspResult<Self> {
        if pi.len() != self.n {
            return Err(TspError::matrix(format!(
                "penalty vector has {} entries, expected {}",
                pi.len(),
                self.n
            )));
        }
        let n = self.n;
        let mut data = self.data.clone();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    data[i * n + j] += pi[i] + pi[j];
                }
            }
        }
        Ok(Self { n, data })
    }

    /// Length of the closed tour (last node connects back to the first).
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match tour.len() {
            0 | 1 => 0.0,
            len => {
                let closing = self.get(tour[len - 1], tour[0]);
                tour.windows(2).map(|w| self.get(w[0], w[1])).sum::<f64>() + closing
            }
        }
    }
}
