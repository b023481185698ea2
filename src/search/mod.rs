//! Local search.
//!
//! A [`MoveStrategy`] finds and applies one improving edge exchange per
//! call; [`LocalSearchEngine`] repeats it to a local optimum, detects cycling
//! through tour fingerprints and can run under control of a
//! [`TabuSet`](crate::tabu::TabuSet). [`TwoOpt`] is the bundled strategy.
//!
//! # References
//!
//! - Lin, S. & Kernighan, B.W. (1973). "An effective heuristic algorithm for the
//!   traveling-salesman problem", *Operations Research* 21(2), 498-516.

mod collector;
mod config;
mod engine;
mod two_opt;
mod types;

pub use collector::{Collector, MetricsHistory};
pub use config::SearchConfig;
pub use engine::{LocalSearchEngine, SearchOutcome, SearchStatus};
pub use two_opt::TwoOpt;
pub use types::{MoveStrategy, SearchState};
