//! Rotation-invariant tour fingerprint.
//!
//! The tour is read starting at node 0, so every rotation of the same cycle
//! yields the same value:
//!
//! ```text
//! h(T) = sum_i T[(s + i) mod n] * base^i  (mod module),  T[s] = 0
//! ```
//!
//! With the default parameters `module` is about 9.1e17, far larger than the
//! square of the number of tours a run ever visits, so accidental collisions
//! are ignored. This is not a cryptographic hash.
//!
//! Power tables for a `(base, module, length)` triple are computed once and
//! kept in a [`PowerCache`] owned by the [`Fingerprinter`]; the same triple
//! recurs on every call within a run.

use std::collections::HashMap;

use crate::error::{TspError, TspResult};

/// Default polynomial base.
pub const DEFAULT_BASE: u64 = 333_667;

/// Default modulus.
pub const DEFAULT_MODULE: u64 = 909_090_909_090_909_091;

/// Which symmetries of a tour the fingerprint ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Rotation only: a tour and its reversal hash differently.
    #[default]
    Directed,
    /// Rotation and reflection: the tour is read towards the smaller
    /// neighbour of node 0.
    Undirected,
}

#[inline]
fn mul_mod(a: u64, b: u64, module: u64) -> u64 {
    ((a as u128 * b as u128) % module as u128) as u64
}

/// Computes `[1, base, base^2, ..., base^(len - 1)]` modulo `module`.
pub fn power_table(base: u64, module: u64, len: usize) -> Vec<u64> {
    let mut powers = Vec::with_capacity(len);
    let mut current = 1 % module;
    for _ in 0..len {
        powers.push(current);
        current = mul_mod(current, base, module);
    }
    powers
}

/// Memoized power tables keyed by `(base, module, length)`.
#[derive(Debug, Clone, Default)]
pub struct PowerCache {
    tables: HashMap<(u64, u64, usize), Vec<u64>>,
}

impl PowerCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the power table for the triple, computing it on first use.
    pub fn powers(&mut self, base: u64, module: u64, len: usize) -> &[u64] {
        self.tables
            .entry((base, module, len))
            .or_insert_with(|| power_table(base, module, len))
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drops every cached table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

/// Start index and direction in which the tour is read.
#[inline]
fn reading_frame(tour: &[usize], orientation: Orientation) -> (usize, bool) {
    let n = tour.len();
    // A tour without node 0 is read from position 0.
    let start = tour.iter().position(|&v| v == 0).unwrap_or(0);
    let forward = match orientation {
        Orientation::Directed => true,
        Orientation::Undirected => n < 3 || tour[(start + 1) % n] <= tour[(start + n - 1) % n],
    };
    (start, forward)
}

#[inline]
fn hash_with(tour: &[usize], powers: &[u64], module: u64, orientation: Orientation) -> u64 {
    let n = tour.len();
    if n == 0 {
        return 0;
    }
    let (start, forward) = reading_frame(tour, orientation);
    let mut acc = 0u64;
    for (i, &p) in powers.iter().enumerate() {
        let idx = if forward {
            (start + i) % n
        } else {
            (start + n - i) % n
        };
        acc = (acc + mul_mod(tour[idx] as u64 % module, p, module)) % module;
    }
    acc
}

/// Computes a fingerprint without touching any cache.
///
/// Allocation-free; useful in tests and for one-off hashes.
pub fn fingerprint_uncached(tour: &[usize], base: u64, module: u64, orientation: Orientation) -> u64 {
    let n = tour.len();
    if n == 0 {
        return 0;
    }
    let (start, forward) = reading_frame(tour, orientation);
    let mut acc = 0u64;
    let mut power = 1 % module;
    for i in 0..n {
        let idx = if forward {
            (start + i) % n
        } else {
            (start + n - i) % n
        };
        acc = (acc + mul_mod(tour[idx] as u64 % module, power, module)) % module;
        power = mul_mod(power, base, module);
    }
    acc
}

/// Tour hasher with its own power-table cache.
///
/// # Examples
///
/// ```
/// use u_lkh::tour::Fingerprinter;
///
/// let mut fp = Fingerprinter::default();
/// assert_eq!(fp.compute(&[0, 1, 2, 3]), fp.compute(&[2, 3, 0, 1]));
/// assert_ne!(fp.compute(&[0, 1, 2, 3]), fp.compute(&[0, 2, 1, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    base: u64,
    module: u64,
    orientation: Orientation,
    cache: PowerCache,
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            module: DEFAULT_MODULE,
            orientation: Orientation::Directed,
            cache: PowerCache::new(),
        }
    }
}

impl Fingerprinter {
    /// Creates a fingerprinter with custom parameters.
    ///
    /// Fails if `module < 2` or `base` is a multiple of `module`.
    pub fn new(base: u64, module: u64) -> TspResult<Self> {
        if module < 2 {
            return Err(TspError::Config(format!("module must be >= 2, got {module}")));
        }
        if base % module == 0 {
            return Err(TspError::Config(format!(
                "base {base} is a multiple of module {module}"
            )));
        }
        Ok(Self {
            base,
            module,
            ..Self::default()
        })
    }

    /// Sets the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The modulus; every fingerprint lies in `[0, module)`.
    pub fn module(&self) -> u64 {
        self.module
    }

    /// The configured orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Fingerprint of `tour`.
    pub fn compute(&mut self, tour: &[usize]) -> u64 {
        let Self {
            base,
            module,
            orientation,
            cache,
        } = self;
        let powers = cache.powers(*base, *module, tour.len());
        hash_with(tour, powers, *module, *orientation)
    }

    /// The power-table cache.
    pub fn cache(&self) -> &PowerCache {
        &self.cache
    }

    /// Clears the power-table cache.
    pub fn reset_cache(&mut self) {
        self.cache.clear();
    }
}
