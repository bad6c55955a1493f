//! The capability interface every problem domain implements.
//!
//! A domain describes a configuration (a sequence of values), how much it
//! costs, which position-pair moves are legal, what a move changes in cost
//! and how to build a starting configuration from a seed. The local search
//! and the driver are written once against this trait.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Integer cost of a configuration. Always non-negative; deltas may be negative.
pub type Cost = i64;

/// A move between two positions of a configuration.
///
/// Its meaning is domain specific: a segment reversal for tours, a value
/// swap for grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub i: usize,
    pub j: usize,
}

impl Move {
    /// Create a new move between positions `i` and `j`.
    pub fn new(i: usize, j: usize) -> Self {
        Move { i, j }
    }
}

/// A problem domain searchable by the iterated local search.
pub trait Problem {
    /// The element type of a configuration.
    type Value: Copy + Eq + Debug;
    /// Identifies one starting point of the search.
    type Seed: Copy + Debug;

    /// Number of positions in a configuration.
    fn size(&self) -> usize;

    /// Full cost of a configuration.
    fn cost(&self, configuration: &[Self::Value]) -> Cost;

    /// Candidate moves in their canonical, deterministic order.
    ///
    /// Candidates still have to pass [`Problem::is_legal`] for the
    /// configuration at hand.
    fn candidate_moves(&self) -> impl Iterator<Item = Move> + '_;

    /// Whether `mv` may be applied to `configuration`.
    fn is_legal(&self, configuration: &[Self::Value], mv: Move) -> bool;

    /// Cost change `mv` would cause, without applying it.
    fn delta_cost(&self, configuration: &[Self::Value], mv: Move) -> Cost;

    /// Apply `mv` in place.
    fn apply_move(&self, configuration: &mut [Self::Value], mv: Move);

    /// Build a starting configuration for `seed`.
    fn construct(&self, seed: Self::Seed) -> Vec<Self::Value>;

    /// The first `budget` seeds, in the order the driver tries them.
    fn seeds(&self, budget: usize) -> Vec<Self::Seed>;

    /// A cost that cannot be beaten, if one is known.
    fn optimum(&self) -> Option<Cost> {
        None
    }

    /// Whether positions `i` and `j` may be exchanged by the refinement pass.
    fn can_exchange(&self, configuration: &[Self::Value], i: usize, j: usize) -> bool {
        let _ = configuration;
        i != j
    }

    /// Whether `cost` reaches the known optimum.
    fn is_optimal(&self, cost: Cost) -> bool {
        self.optimum() == Some(cost)
    }
}
