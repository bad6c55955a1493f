//! Global refinement by pairwise position exchange.

use crate::problem::Problem;
use crate::solution::Solution;
use itertools::iproduct;
use log::debug;

use super::LocalSearch;

impl LocalSearch {
    /// Exchange every ordered pair of positions and re-descend from there.
    ///
    /// A strictly better result replaces `solution` and the scan restarts
    /// from the first pair. Stops when a whole pass finds nothing better,
    /// the optimum is reached or the deadline expires. Returns the number
    /// of accepted exchanges.
    pub fn refine<P: Problem>(&self, problem: &P, solution: &mut Solution<P::Value>) -> usize {
        let n = solution.len();
        let mut improvements = 0;
        let mut candidate = solution.clone();

        'pass: loop {
            for (i, j) in iproduct!(0..n, 0..n) {
                if problem.is_optimal(solution.cost) || self.is_expired() {
                    break 'pass;
                }
                if !problem.can_exchange(&solution.configuration, i, j) {
                    continue;
                }

                candidate.configuration.clone_from(&solution.configuration);
                candidate.configuration.swap(i, j);
                candidate.evaluate(problem);
                self.improve(problem, &mut candidate);

                if candidate.cost < solution.cost {
                    std::mem::swap(solution, &mut candidate);
                    improvements += 1;
                    debug!("Refinement improvement: {}", solution.cost);
                    continue 'pass;
                }
            }
            break;
        }

        improvements
    }
}
