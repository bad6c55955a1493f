//! Euclidean TSP instances and tour files (TSPLIB subset).

use crate::error::{Error, InvalidInstance, Result};
use crate::problem::Cost;
use crate::tour::{Construction, DistanceMatrix, Point, TourProblem};
use std::fs;
use std::path::Path;

/// Default capacity of the loaders, in points.
pub const MAX_POINTS: usize = 1000;

/// Largest accepted absolute coordinate after rounding.
pub const MAX_COORDINATE: f64 = (1u64 << 31) as f64;

/// A TSP instance with integer coordinates.
#[derive(Debug, Clone)]
pub struct TspInstance {
    pub name: String,
    pub points: Vec<Point>,
}

impl TspInstance {
    /// Create an instance from points.
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        TspInstance {
            name: name.into(),
            points,
        }
    }

    /// Number of points.
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// Rounded Euclidean distance matrix.
    pub fn distances(&self) -> DistanceMatrix {
        DistanceMatrix::from_points(&self.points)
    }

    /// Build the nearest-neighbor seeded tour problem.
    pub fn to_problem(&self) -> TourProblem {
        TourProblem::new(self.distances(), Construction::NearestNeighbor)
    }

    /// Length of a closed tour, computed directly from the coordinates.
    pub fn tour_length(&self, tour: &[usize]) -> Result<Cost> {
        if let Some(&node) = tour.iter().find(|&&node| node >= self.points.len()) {
            return Err(Error::IndexOutOfBounds {
                index: node + 1,
                max: self.points.len(),
            });
        }

        let n = tour.len();
        Ok((0..n)
            .map(|k| self.points[tour[k]].distance(&self.points[tour[(k + 1) % n]]))
            .sum())
    }
}

/// Reads `NODE_COORD_SECTION` instances and `TOUR_SECTION` tour files.
#[derive(Debug, Clone, Copy)]
pub struct TspLoader {
    max_points: usize,
}

impl Default for TspLoader {
    fn default() -> Self {
        TspLoader {
            max_points: MAX_POINTS,
        }
    }
}

impl TspLoader {
    /// Create a loader with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest number of points accepted.
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Load an instance from a file.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<TspInstance> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.parse(&text, &fallback)
    }

    /// Load an instance from text. Coordinates are rounded to integers.
    pub fn parse(&self, text: &str, fallback_name: &str) -> Result<TspInstance> {
        let mut name = None;
        let mut in_coords = false;
        let mut points = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            if !in_coords {
                if line == "NODE_COORD_SECTION" {
                    in_coords = true;
                } else if let Some((key, value)) = line.split_once(':') {
                    if key.trim() == "NAME" {
                        name = Some(value.trim().to_string());
                    }
                }
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(Error::parse(line_no, format!("expected 'id x y', got '{}'", line)));
            }
            let x = parse_coordinate(parts[1], line_no)?;
            let y = parse_coordinate(parts[2], line_no)?;

            if points.len() >= self.max_points {
                return Err(Error::IndexOutOfBounds {
                    index: points.len() + 1,
                    max: self.max_points,
                });
            }
            points.push(Point::new(x, y));
        }

        if points.is_empty() {
            return Err(InvalidInstance::EmptyInstance.into());
        }

        Ok(TspInstance::new(
            name.unwrap_or_else(|| fallback_name.to_string()),
            points,
        ))
    }

    /// Load a tour file as 0-based node indices.
    pub fn tour_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<usize>> {
        let text = fs::read_to_string(path)?;
        self.parse_tour(&text)
    }

    /// Parse a tour from text as 0-based node indices.
    pub fn parse_tour(&self, text: &str) -> Result<Vec<usize>> {
        let mut in_tour = false;
        let mut tour = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if !in_tour {
                in_tour = line == "TOUR_SECTION";
                continue;
            }
            if line == "-1" || line == "EOF" {
                break;
            }

            let node = line
                .parse::<usize>()
                .map_err(|_| Error::parse(line_no, format!("expected a node id, got '{}'", line)))?;
            if node == 0 || node > self.max_points {
                return Err(Error::IndexOutOfBounds {
                    index: node,
                    max: self.max_points,
                });
            }
            tour.push(node - 1);
        }

        Ok(tour)
    }
}

fn parse_coordinate(token: &str, line_no: usize) -> Result<i64> {
    let value = token
        .parse::<f64>()
        .map_err(|_| Error::parse(line_no, format!("invalid coordinate '{}'", token)))?
        .round();
    if !value.is_finite() || value.abs() > MAX_COORDINATE {
        return Err(Error::parse(
            line_no,
            format!("coordinate '{}' outside +/-{}", token, MAX_COORDINATE),
        ));
    }
    Ok(value as i64)
}
