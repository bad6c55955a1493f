//! Symmetric integer distance matrix for tour problems.

use crate::problem::Cost;
use serde::{Deserialize, Serialize};

/// A 2D integer point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance rounded to the nearest integer.
    pub fn distance(&self, other: &Point) -> Cost {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt().round() as Cost
    }
}

/// An `n x n` symmetric matrix with a zero diagonal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    rows: Vec<Vec<Cost>>,
}

impl DistanceMatrix {
    /// Build a matrix by evaluating `distance` for every pair `i < j`.
    pub fn from_fn<F>(n: usize, mut distance: F) -> Self
    where
        F: FnMut(usize, usize) -> Cost,
    {
        let mut rows = vec![vec![0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(i, j);
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }

        DistanceMatrix { rows }
    }

    /// Rounded Euclidean distances between points.
    pub fn from_points(points: &[Point]) -> Self {
        Self::from_fn(points.len(), |i, j| points[i].distance(&points[j]))
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Distance between two nodes.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.rows[from][to]
    }

    /// Length of the closed tour visiting `tour` in order.
    pub fn tour_length(&self, tour: &[usize]) -> Cost {
        let n = tour.len();
        (0..n).map(|k| self.get(tour[k], tour[(k + 1) % n])).sum()
    }
}
