//! Lin-Kernighan-style TSP local search guided by Held-Karp bounds.
//!
//! Provides the pieces of an LKH-style heuristic:
//!
//! - **Bounds** ([`bound`]): subgradient optimization of node penalties,
//!   minimum 1-trees and alpha-nearness candidate lists.
//! - **Construction** ([`construct`]): Helsgaun-style initial tours built
//!   from alpha candidates, and a ranked store of accepted tours.
//! - **Local search** ([`search`]): a driver around a pluggable
//!   [`MoveStrategy`](search::MoveStrategy) with fingerprint-based cycle
//!   detection and a length-consistency check after every move.
//! - **Tabu Search** ([`tabu`]): a fingerprint tabu list shared by every
//!   local search of a run, and a restart runner built on it.
//! - **Pipeline** ([`pipeline`]): everything above wired together.
//!
//! # Architecture
//!
//! Everything is single-threaded and synchronous. A [`WeightMatrix`](matrix::WeightMatrix)
//! is immutable and may be shared across threads; engines, tabu lists and
//! solution sets belong to one search each.

pub mod bound;
pub mod construct;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod pipeline;
pub mod search;
pub mod tabu;
pub mod tour;

pub use error::{TspError, TspResult};
