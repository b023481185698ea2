//! Starting tours.
//!
//! [`InitialTourBuilder`] assembles a tour from alpha-nearness candidates;
//! [`SolutionSet`] keeps previously accepted tours so later constructions
//! can lean on the best one found so far.

mod initial;
mod solutions;

pub use initial::{InitialTour, InitialTourBuilder, InitialTourConfig};
pub use solutions::{Solution, SolutionSet};
