//! Error types for u-lkh.
//!
//! Invariant violations (self-loops, duplicate edges, a tracked tour length
//! drifting away from the recomputed one) are reported as errors rather than
//! panics, but they always indicate a caller or strategy bug and must not be
//! swallowed. Normal control flow such as convergence, cycle detection or a
//! rejected tabu append is reported through status values instead.

use thiserror::Error;

/// Result type alias for u-lkh operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for all u-lkh operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// The weight matrix is not square, not symmetric, not finite or too small.
    #[error("invalid weight matrix: {reason}")]
    InvalidMatrix {
        /// What is wrong with the matrix.
        reason: String,
    },

    /// A tour is not a permutation of `0..n`.
    #[error("invalid tour: {reason}")]
    InvalidTour {
        /// What is wrong with the tour.
        reason: String,
    },

    /// An edge with identical endpoints was inserted into an edge pool.
    #[error("self-loop on node {node}")]
    SelfLoop {
        /// The repeated endpoint.
        node: usize,
    },

    /// An edge already present in canonical form was inserted again.
    #[error("edge ({a}, {b}) is already in the pool")]
    DuplicateEdge {
        /// Smaller endpoint.
        a: usize,
        /// Larger endpoint.
        b: usize,
    },

    /// The length tracked by a search engine diverged from the true tour length.
    #[error("tracked length {tracked:.6} != recomputed length {actual:.6} (tolerance {tolerance})")]
    LengthMismatch {
        /// Length maintained incrementally by the move strategy.
        tracked: f64,
        /// Length recomputed from scratch.
        actual: f64,
        /// Allowed absolute difference.
        tolerance: f64,
    },

    /// A solution set was queried while empty.
    #[error("solution set is empty")]
    NoSolutions,

    /// Invalid configuration parameter.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TspError {
    pub(crate) fn matrix(reason: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            reason: reason.into(),
        }
    }

    pub(crate) fn tour(reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            reason: reason.into(),
        }
    }
}
