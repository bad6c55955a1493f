//! Tour domain: permutations of nodes over a distance matrix.
//!
//! Moves are 2-opt segment reversals. Move `(i, j)` with `j >= i + 2`
//! removes the edges `(tour[i], tour[i+1])` and `(tour[j], tour[j+1])` and
//! reconnects the tour by reversing `tour[i+1..=j]`.

pub mod distance;
pub mod hcp;
pub mod tsp;

use crate::problem::{Cost, Move, Problem};
use log::trace;
use serde::{Deserialize, Serialize};

pub use self::distance::{DistanceMatrix, Point};

/// How the initial tour is built from a start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Construction {
    /// Follow the first unvisited node at proxy distance 1, otherwise take
    /// the first unvisited node. Used for Hamiltonian cycle instances.
    PreferAdjacent,
    /// Follow the closest unvisited node, lowest index on ties.
    NearestNeighbor,
}

/// A tour problem over a fixed distance matrix.
#[derive(Debug, Clone)]
pub struct TourProblem {
    pub distances: DistanceMatrix,
    pub construction: Construction,
    optimum: Option<Cost>,
}

impl TourProblem {
    /// Create a tour problem.
    pub fn new(distances: DistanceMatrix, construction: Construction) -> Self {
        TourProblem {
            distances,
            construction,
            optimum: None,
        }
    }

    /// Declare a cost that cannot be beaten, enabling early termination.
    pub fn with_optimum(mut self, optimum: Cost) -> Self {
        self.optimum = Some(optimum);
        self
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.distances.size()
    }

    fn next_adjacent(&self, last: usize, visited: &[bool]) -> Option<usize> {
        (0..visited.len())
            .find(|&j| !visited[j] && self.distances.get(last, j) == 1)
            .or_else(|| (0..visited.len()).find(|&j| !visited[j]))
    }

    fn next_nearest(&self, last: usize, visited: &[bool]) -> Option<usize> {
        let mut best: Option<(usize, Cost)> = None;

        for j in 0..visited.len() {
            if visited[j] {
                continue;
            }
            let d = self.distances.get(last, j);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((j, d));
            }
        }

        best.map(|(j, _)| j)
    }
}

impl Problem for TourProblem {
    type Value = usize;
    type Seed = usize;

    fn size(&self) -> usize {
        self.node_count()
    }

    fn cost(&self, configuration: &[usize]) -> Cost {
        self.distances.tour_length(configuration)
    }

    fn candidate_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let n = self.node_count();
        (0..n.saturating_sub(1)).flat_map(move |i| ((i + 2)..n).map(move |j| Move::new(i, j)))
    }

    fn is_legal(&self, configuration: &[usize], mv: Move) -> bool {
        mv.j >= mv.i + 2 && mv.j < configuration.len()
    }

    fn delta_cost(&self, tour: &[usize], mv: Move) -> Cost {
        let n = tour.len();
        let a = tour[mv.i];
        let b = tour[mv.i + 1];
        let c = tour[mv.j];
        let d = tour[(mv.j + 1) % n];

        let removed = self.distances.get(a, b) + self.distances.get(c, d);
        let added = self.distances.get(a, c) + self.distances.get(b, d);

        added - removed
    }

    fn apply_move(&self, tour: &mut [usize], mv: Move) {
        tour[mv.i + 1..=mv.j].reverse();
    }

    fn construct(&self, start: usize) -> Vec<usize> {
        let n = self.node_count();
        let mut tour = Vec::with_capacity(n);
        if n == 0 {
            return tour;
        }

        let mut visited = vec![false; n];
        let mut last = start % n;
        tour.push(last);
        visited[last] = true;

        while tour.len() < n {
            let next = match self.construction {
                Construction::PreferAdjacent => self.next_adjacent(last, &visited),
                Construction::NearestNeighbor => self.next_nearest(last, &visited),
            };
            let Some(next) = next else { break };

            tour.push(next);
            visited[next] = true;
            last = next;
        }

        trace!("Constructed tour from {}: {:?}", start, tour);
        tour
    }

    fn seeds(&self, budget: usize) -> Vec<usize> {
        (0..self.node_count().min(budget)).collect()
    }

    fn optimum(&self) -> Option<Cost> {
        self.optimum
    }
}
