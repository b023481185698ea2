//! Held-Karp lower bounds and alpha-nearness candidates.
//!
//! [`SubgradientBound`] tightens the 1-tree bound with node penalties,
//! [`MinimumOneTree`] builds the 1-tree itself and [`AlphaNearness`] ranks
//! every edge by how much forcing it into the 1-tree would cost.
//!
//! # References
//!
//! - Held, M. & Karp, R.M. (1970). "The traveling-salesman problem and minimum spanning trees".
//! - Helsgaun, K. (2000). "An effective implementation of the Lin-Kernighan traveling salesman heuristic".

mod alpha;
mod config;
mod one_tree;
mod subgradient;

pub use alpha::{AlphaMatrix, AlphaNearness};
pub use config::SubgradientConfig;
pub use one_tree::{MinimumOneTree, OneTree};
pub use subgradient::{SubgradientBound, SubgradientResult, SubgradientStop};
