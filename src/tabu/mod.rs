//! Tabu Search (TS).
//!
//! A [`TabuSet`] remembers every tour accepted during a run by fingerprint;
//! local searches running under its control stop as soon as they would
//! revisit one. [`TabuSearch`] restarts local search from perturbed copies
//! of the best tour, sharing one tabu list across all restarts.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search - Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod set;

pub use config::TabuSearchConfig;
pub use runner::{double_bridge, TabuSearch, TabuSearchResult};
pub use set::TabuSet;
