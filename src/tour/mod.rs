//! Tour utilities.
//!
//! A tour is a `Vec<usize>` holding every node `0..n` exactly once; the last
//! node connects back to the first.

mod fingerprint;

pub use fingerprint::{
    fingerprint_uncached, power_table, Fingerprinter, Orientation, PowerCache, DEFAULT_BASE,
    DEFAULT_MODULE,
};

use crate::error::{TspError, TspResult};

/// Checks that `tour` is a permutation of `0..n`.
pub fn validate_tour(tour: &[usize], n: usize) -> TspResult<()> {
    if tour.len() != n {
        return Err(TspError::tour(format!(
            "tour has {} nodes, expected {n}",
            tour.len()
        )));
    }
    let mut seen = vec![false; n];
    for &node in tour {
        if node >= n {
            return Err(TspError::tour(format!("node {node} out of range 0..{n}")));
        }
        if seen[node] {
            return Err(TspError::tour(format!("node {node} visited twice")));
        }
        seen[node] = true;
    }
    Ok(())
}

/// Returns `tour` rotated so that `node` comes first.
///
/// If `node` is absent the tour is returned unchanged.
pub fn rotate_to(tour: &[usize], node: usize) -> Vec<usize> {
    let mut out = tour.to_vec();
    if let Some(pos) = tour.iter().position(|&v| v == node) {
        out.rotate_left(pos);
    }
    out
}

/// Position of every node in `tour`: `pos[tour[i]] == i`.
pub fn positions(tour: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; tour.len()];
    for (i, &node) in tour.iter().enumerate() {
        pos[node] = i;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(validate_tour(&[2, 0, 1], 3).is_ok());
        assert!(validate_tour(&[], 0).is_ok());
    }

    #[test]
    fn test_validate_wrong_len() {
        assert!(matches!(
            validate_tour(&[0, 1], 3),
            Err(TspError::InvalidTour { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_and_range() {
        assert!(validate_tour(&[0, 0, 1], 3).is_err());
        assert!(validate_tour(&[0, 1, 3], 3).is_err());
    }

    #[test]
    fn test_rotate_to() {
        assert_eq!(rotate_to(&[3, 1, 0, 2], 0), vec![0, 2, 3, 1]);
        assert_eq!(rotate_to(&[3, 1, 2], 0), vec![3, 1, 2]);
    }

    #[test]
    fn test_positions() {
        let pos = positions(&[2, 0, 3, 1]);
        assert_eq!(pos, vec![1, 3, 0, 2]);
    }
}
