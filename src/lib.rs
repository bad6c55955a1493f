//! # ILS Solver
//!
//! An iterated local search engine for combinatorial configurations.
//!
//! A problem domain supplies a cost function, a neighborhood of reversible
//! position-pair moves with exact cost deltas, and a construction heuristic
//! (see [`problem::Problem`]). For every seed the engine constructs a
//! configuration, perturbs it by climbing to a local maximum, descends to a
//! local minimum and refines the result by exchanging positions pairwise.
//! The best configuration over all seeds is returned.
//!
//! Three domains ship with the crate: Hamiltonian cycles reduced to a 0/1
//! weighted TSP ([`tour::hcp`]), Euclidean TSP ([`tour::tsp`]) and Sudoku
//! completion ([`sudoku`]).

pub mod config;
pub mod error;
pub mod local_search;
pub mod problem;
pub mod solution;
pub mod sudoku;
pub mod tour;
pub mod utils;

use crate::config::Config;
use crate::local_search::LocalSearch;
use crate::problem::Problem;
use crate::solution::{SearchResult, Solution};

use log::{info, warn};
use std::time::{Duration, Instant};

/// Best solution seen so far and when it was found.
#[derive(Debug, Clone)]
struct BestSoFar<V> {
    solution: Solution<V>,
    found_after: Duration,
}

impl<V> BestSoFar<V> {
    /// Replace the record if `candidate` is strictly better.
    fn offer(record: &mut Option<Self>, candidate: Solution<V>, found_after: Duration) -> bool {
        let better = record
            .as_ref()
            .map_or(true, |best| candidate.cost < best.solution.cost);
        if better {
            *record = Some(BestSoFar {
                solution: candidate,
                found_after,
            });
        }
        better
    }
}

/// The driver that runs the construct, perturb, descend and refine cycle over all seeds.
pub struct IlsAlgorithm<P: Problem> {
    pub problem: P,
    pub config: Config,
    pub local_search: LocalSearch,
    pub start_time: Instant,
    best: Option<BestSoFar<P::Value>>,
    seeds_run: usize,
}

impl<P: Problem> IlsAlgorithm<P> {
    /// Create a driver for the given problem and configuration.
    pub fn new(problem: P, config: Config) -> Self {
        IlsAlgorithm {
            problem,
            config,
            local_search: LocalSearch::new(),
            start_time: Instant::now(),
            best: None,
            seeds_run: 0,
        }
    }

    /// Best solution found so far, if any seed has completed.
    pub fn best_solution(&self) -> Option<&Solution<P::Value>> {
        self.best.as_ref().map(|b| &b.solution)
    }

    /// Run all seeds (or until the optimum or the time limit is hit).
    pub fn run(&mut self) -> SearchResult<P::Value> {
        self.start_time = Instant::now();
        self.best = None;
        self.seeds_run = 0;

        // A limit too large to represent as an instant means no deadline.
        let deadline = self
            .config
            .time_limit
            .and_then(|limit| self.start_time.checked_add(limit));
        self.local_search = LocalSearch::with_deadline(deadline);

        let seeds = self.problem.seeds(self.config.seed_budget);
        info!(
            "Starting search over {} seeds ({} positions)",
            seeds.len(),
            self.problem.size()
        );

        for (run, &seed) in seeds.iter().enumerate() {
            if self.local_search.is_expired() {
                warn!("Time limit reached after {} seeds", run);
                break;
            }

            let solution = run_seed(&self.problem, &self.local_search, &self.config, seed);
            self.seeds_run += 1;
            let elapsed = self.start_time.elapsed();
            info!(
                "Run {}: seed {:?}, cost {}, time {:.2}s",
                run + 1,
                seed,
                solution.cost,
                elapsed.as_secs_f64()
            );

            let cost = solution.cost;
            if BestSoFar::offer(&mut self.best, solution, elapsed) {
                info!("New best cost: {}", cost);
            }
            if self.problem.is_optimal(cost) {
                info!("Optimum {} reached, stopping", cost);
                break;
            }
        }

        self.result()
    }

    fn result(&self) -> SearchResult<P::Value> {
        let elapsed = self.start_time.elapsed();

        let (solution, found_after) = match &self.best {
            Some(best) => (best.solution.clone(), best.found_after),
            None => {
                // No seed completed; fall back to the first construction.
                let configuration = self
                    .problem
                    .seeds(1)
                    .first()
                    .map(|&seed| self.problem.construct(seed))
                    .unwrap_or_default();
                (Solution::new(&self.problem, configuration), elapsed)
            }
        };

        info!(
            "Best cost {} found after {:.2}s (total {:.2}s, {} seeds)",
            solution.cost,
            found_after.as_secs_f64(),
            elapsed.as_secs_f64(),
            self.seeds_run
        );

        SearchResult {
            optimal: self.problem.is_optimal(solution.cost),
            configuration: solution.configuration,
            cost: solution.cost,
            found_after,
            elapsed,
            seeds_run: self.seeds_run,
        }
    }
}

/// Run one full cycle for a seed: construct, perturb, descend, refine.
pub fn run_seed<P: Problem>(
    problem: &P,
    local_search: &LocalSearch,
    config: &Config,
    seed: P::Seed,
) -> Solution<P::Value> {
    let mut solution = Solution::new(problem, problem.construct(seed));

    if config.perturb {
        local_search.perturb(problem, &mut solution);
    }
    local_search.improve(problem, &mut solution);

    if config.refine && !problem.is_optimal(solution.cost) {
        local_search.refine(problem, &mut solution);
    }

    solution
}

/// Solve `problem` with the default configuration and `seed_budget` seeds.
pub fn solve<P: Problem>(problem: P, seed_budget: usize) -> SearchResult<P::Value> {
    let config = Config::new().with_seed_budget(seed_budget);
    IlsAlgorithm::new(problem, config).run()
}
