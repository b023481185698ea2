//! Ranked store of accepted tours.

use std::collections::HashSet;

use crate::error::{TspError, TspResult};
use crate::tour::Fingerprinter;

/// A tour with its length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Node order.
    pub tour: Vec<usize>,
    /// Closed tour length.
    pub length: f64,
}

/// Solutions kept in ascending order of length.
///
/// Tours are de-duplicated by fingerprint, so a rotation of a stored tour is
/// not stored again. With a size limit only the shortest tours are kept.
///
/// # Examples
///
/// ```
/// use u_lkh::construct::SolutionSet;
/// use u_lkh::error::TspError;
///
/// let mut set = SolutionSet::new();
/// assert_eq!(set.get_best(), Err(TspError::NoSolutions));
///
/// set.insert(vec![0, 2, 1, 3], 5.0);
/// set.insert(vec![0, 1, 2, 3], 4.0);
/// assert_eq!(set.get_best().unwrap().length, 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
    fingerprints: HashSet<u64>,
    fingerprinter: Fingerprinter,
    max_size: Option<usize>,
}

impl SolutionSet {
    /// Creates an unbounded set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `max_size` solutions, dropping the longest first.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size.max(1));
        self
    }

    /// Inserts a tour. Returns false if an equal tour is already stored or
    /// the tour is too long to make the cut.
    pub fn insert(&mut self, tour: Vec<usize>, length: f64) -> bool {
        let h = self.fingerprinter.compute(&tour);
        if self.fingerprints.contains(&h) {
            return false;
        }
        let idx = self.solutions.partition_point(|s| s.length <= length);
        if let Some(max) = self.max_size {
            if idx >= max {
                return false;
            }
        }
        self.solutions.insert(idx, Solution { tour, length });
        self.fingerprints.insert(h);

        if let Some(max) = self.max_size {
            while self.solutions.len() > max {
                if let Some(dropped) = self.solutions.pop() {
                    let h = self.fingerprinter.compute(&dropped.tour);
                    self.fingerprints.remove(&h);
                }
            }
        }
        true
    }

    /// The shortest stored solution.
    ///
    /// Fails with [`TspError::NoSolutions`] when the set is empty.
    pub fn get_best(&self) -> TspResult<&Solution> {
        self.solutions.first().ok_or(TspError::NoSolutions)
    }

    /// Returns true if a tour equal to `tour` up to rotation is stored.
    pub fn contains(&mut self, tour: &[usize]) -> bool {
        let h = self.fingerprinter.compute(tour);
        self.fingerprints.contains(&h)
    }

    /// Number of stored solutions.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Solutions from shortest to longest.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_get_best() {
        let set = SolutionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.get_best(), Err(TspError::NoSolutions));
    }

    #[test]
    fn test_ranked_order() {
        let mut set = SolutionSet::new();
        assert!(set.insert(vec![0, 1, 2, 3, 4], 10.0));
        assert!(set.insert(vec![0, 2, 1, 3, 4], 7.0));
        assert!(set.insert(vec![0, 3, 1, 2, 4], 12.0));
        let lengths: Vec<f64> = set.iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![7.0, 10.0, 12.0]);
        assert_eq!(set.get_best().unwrap().tour, vec![0, 2, 1, 3, 4]);
    }

    #[test]
    fn test_rotation_is_duplicate() {
        let mut set = SolutionSet::new();
        assert!(set.insert(vec![0, 1, 2, 3], 4.0));
        assert!(!set.insert(vec![2, 3, 0, 1], 4.0));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&[3, 0, 1, 2]));
        assert!(!set.contains(&[0, 2, 1, 3]));
    }

    #[test]
    fn test_max_size_keeps_shortest() {
        let mut set = SolutionSet::new().with_max_size(2);
        set.insert(vec![0, 1, 2, 3, 4], 10.0);
        set.insert(vec![0, 2, 1, 3, 4], 8.0);
        assert!(!set.insert(vec![0, 3, 1, 2, 4], 11.0));
        assert!(set.insert(vec![0, 4, 1, 2, 3], 5.0));
        assert_eq!(set.len(), 2);
        let lengths: Vec<f64> = set.iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![5.0, 8.0]);
        // The dropped tour may come back.
        assert!(!set.contains(&[0, 1, 2, 3, 4]));
    }
}
