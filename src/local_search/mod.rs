//! Local search operators for the iterated local search.
//!
//! Descent is a first-improvement hill climber: the canonical move list is
//! scanned from the start, the first accepted move is applied and the scan
//! restarts, until a whole scan accepts nothing. The same loop with inverted
//! acceptance drives the perturbation step.

pub mod refine;

use crate::problem::{Cost, Problem};
use crate::solution::Solution;
use log::{debug, warn};
use std::time::Instant;

/// Which cost deltas a descent accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Accept moves with a negative delta (minimize).
    Improving,
    /// Accept moves with a positive delta (maximize).
    Worsening,
}

impl Acceptance {
    /// Check whether a move with `delta` is accepted.
    pub fn accepts(self, delta: Cost) -> bool {
        match self {
            Acceptance::Improving => delta < 0,
            Acceptance::Worsening => delta > 0,
        }
    }
}

/// Why a descent stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A full scan found no accepted move.
    Converged,
    /// The known optimum was reached.
    Optimal,
    /// The deadline expired before convergence.
    Deadline,
}

/// Summary of a single descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescentOutcome {
    /// Number of moves applied
    pub moves_applied: usize,
    /// Why the descent stopped
    pub stop: StopReason,
}

/// Runs descents, perturbations and refinements on a solution.
///
/// Holds no state about any solution; the only setting is an optional deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearch {
    deadline: Option<Instant>,
}

impl LocalSearch {
    /// Create a local search without a deadline.
    pub fn new() -> Self {
        LocalSearch { deadline: None }
    }

    /// Create a local search that gives up once `deadline` has passed.
    pub fn with_deadline(deadline: Option<Instant>) -> Self {
        LocalSearch { deadline }
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.map_or(false, |d| Instant::now() >= d)
    }

    /// Descend to a local optimum (minimizing).
    pub fn improve<P: Problem>(
        &self,
        problem: &P,
        solution: &mut Solution<P::Value>,
    ) -> DescentOutcome {
        self.descend(problem, solution, Acceptance::Improving)
    }

    /// Climb to a local maximum to move away from the current optimum.
    pub fn perturb<P: Problem>(
        &self,
        problem: &P,
        solution: &mut Solution<P::Value>,
    ) -> DescentOutcome {
        self.descend(problem, solution, Acceptance::Worsening)
    }

    /// Apply accepted moves until none is left.
    ///
    /// A minimizing descent stops as soon as the known optimum is reached.
    pub fn descend<P: Problem>(
        &self,
        problem: &P,
        solution: &mut Solution<P::Value>,
        acceptance: Acceptance,
    ) -> DescentOutcome {
        let mut moves_applied = 0;

        loop {
            if acceptance == Acceptance::Improving && problem.is_optimal(solution.cost) {
                return DescentOutcome {
                    moves_applied,
                    stop: StopReason::Optimal,
                };
            }

            if self.is_expired() {
                warn!("Deadline expired during descent at cost {}", solution.cost);
                return DescentOutcome {
                    moves_applied,
                    stop: StopReason::Deadline,
                };
            }

            let configuration = &solution.configuration;
            let accepted = problem.candidate_moves().find_map(|mv| {
                if !problem.is_legal(configuration, mv) {
                    return None;
                }
                let delta = problem.delta_cost(configuration, mv);
                acceptance.accepts(delta).then_some((mv, delta))
            });

            match accepted {
                Some((mv, delta)) => {
                    problem.apply_move(&mut solution.configuration, mv);
                    solution.cost += delta;
                    moves_applied += 1;
                }
                None => {
                    debug!(
                        "{:?} descent converged at cost {} after {} moves",
                        acceptance, solution.cost, moves_applied
                    );
                    return DescentOutcome {
                        moves_applied,
                        stop: StopReason::Converged,
                    };
                }
            }
        }
    }
}
