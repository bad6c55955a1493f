//! Configuration parameters for the iterated local search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration settings for a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of distinct seeds (starting points) to try
    pub seed_budget: usize,
    /// Optional time limit, checked cooperatively between seeds and descent scans
    pub time_limit: Option<Duration>,
    /// Worsen the constructed configuration before descending
    pub perturb: bool,
    /// Run the global position-exchange refinement after descending
    pub refine: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed_budget: 10,
            time_limit: None,
            perturb: true,
            refine: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the number of seeds.
    pub fn with_seed_budget(mut self, budget: usize) -> Self {
        self.seed_budget = budget;
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Enable or disable the perturbation step.
    pub fn with_perturb(mut self, perturb: bool) -> Self {
        self.perturb = perturb;
        self
    }

    /// Enable or disable the global refinement pass.
    pub fn with_refine(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }
}
