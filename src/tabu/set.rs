//! Tabu list of accepted tours.

use std::collections::HashSet;

use crate::construct::Solution;
use crate::tour::{Fingerprinter, Orientation};

/// Bounded list of accepted tours with their fingerprints.
///
/// An append is rejected when the tour's fingerprint has been seen before or
/// the list is full. The fingerprint set only ever grows.
///
/// # Examples
///
/// ```
/// use u_lkh::tabu::TabuSet;
///
/// let mut tabu = TabuSet::new(2);
/// assert!(tabu.append(4.0, &[0, 1, 2, 3]));
/// assert!(!tabu.append(4.0, &[1, 2, 3, 0])); // rotation of a seen tour
/// assert!(tabu.append(5.0, &[0, 2, 1, 3]));
/// assert!(!tabu.append(3.0, &[0, 3, 1, 2])); // full
/// ```
#[derive(Debug, Clone)]
pub struct TabuSet {
    entries: Vec<Solution>,
    fingerprints: HashSet<u64>,
    fingerprinter: Fingerprinter,
    capacity: usize,
}

impl TabuSet {
    /// Creates a list holding at most `capacity` tours.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            fingerprints: HashSet::new(),
            fingerprinter: Fingerprinter::default(),
            capacity,
        }
    }

    /// Sets the fingerprint orientation. Only meaningful before the first append.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.fingerprinter = self.fingerprinter.with_orientation(orientation);
        self
    }

    /// Tries to accept `tour`. Returns false if it was seen before or the
    /// list is full.
    pub fn append(&mut self, length: f64, tour: &[usize]) -> bool {
        if self.is_full() {
            return false;
        }
        let h = self.fingerprinter.compute(tour);
        if !self.fingerprints.insert(h) {
            return false;
        }
        self.entries.push(Solution {
            tour: tour.to_vec(),
            length,
        });
        true
    }

    /// Returns true if `tour` (up to rotation) has been accepted.
    pub fn contains(&mut self, tour: &[usize]) -> bool {
        let h = self.fingerprinter.compute(tour);
        self.fingerprints.contains(&h)
    }

    /// Fingerprints of every accepted tour.
    pub fn fingerprints(&self) -> &HashSet<u64> {
        &self.fingerprints
    }

    /// Accepted tours in insertion order.
    pub fn entries(&self) -> &[Solution] {
        &self.entries
    }

    /// The shortest accepted tour.
    pub fn best(&self) -> Option<&Solution> {
        self.entries
            .iter()
            .min_by(|a, b| a.length.total_cmp(&b.length))
    }

    /// Symmetries ignored when comparing tours.
    pub fn orientation(&self) -> Orientation {
        self.fingerprinter.orientation()
    }

    /// Maximum number of tours.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of accepted tours.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been accepted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if no further tour can be accepted.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}
