//! Solution representation shared by all problem domains.

use crate::problem::{Cost, Problem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A configuration together with its current cost.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution<V> {
    /// The configuration (tour order, or grid cells in row-major order)
    pub configuration: Vec<V>,
    /// The cost of the configuration
    pub cost: Cost,
}

impl<V: Copy> Solution<V> {
    /// Create a solution, evaluating its cost once.
    pub fn new<P>(problem: &P, configuration: Vec<V>) -> Self
    where
        P: Problem<Value = V>,
    {
        let cost = problem.cost(&configuration);
        Solution {
            configuration,
            cost,
        }
    }

    /// Re-evaluate the cost from scratch.
    pub fn evaluate<P>(&mut self, problem: &P)
    where
        P: Problem<Value = V>,
    {
        self.cost = problem.cost(&self.configuration);
    }

    /// Number of positions in the configuration.
    pub fn len(&self) -> usize {
        self.configuration.len()
    }

    /// Check if the configuration is empty.
    pub fn is_empty(&self) -> bool {
        self.configuration.is_empty()
    }
}

impl<V: fmt::Debug> fmt::Debug for Solution<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Cost: {}", self.cost)?;
        writeln!(f, "  Configuration: {:?}", self.configuration)
    }
}

/// The best solution of a run, handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<V> {
    /// Best configuration found
    pub configuration: Vec<V>,
    /// Its cost
    pub cost: Cost,
    /// Wall time from the start of the run until this solution was found
    pub found_after: Duration,
    /// Total wall time of the run
    pub elapsed: Duration,
    /// Number of seeds that completed a full cycle
    pub seeds_run: usize,
    /// Whether the cost equals the problem's known optimum
    pub optimal: bool,
}

impl<V> SearchResult<V> {
    /// Split into the `(configuration, cost, elapsed)` triple.
    pub fn into_parts(self) -> (Vec<V>, Cost, Duration) {
        (self.configuration, self.cost, self.elapsed)
    }
}
