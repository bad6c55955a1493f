//! Hamiltonian cycle problem (HCP) instances.
//!
//! An HCP instance is reduced to a tour problem with proxy distances: 1
//! between adjacent nodes, 2 otherwise. A tour of cost `n` on `n` nodes
//! uses only graph edges and is therefore a Hamiltonian cycle.

use crate::error::{Error, InvalidInstance, Result};
use crate::problem::Cost;
use crate::tour::{Construction, DistanceMatrix, TourProblem};
use petgraph::graphmap::UnGraphMap;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default capacity of the loader, in nodes.
pub const MAX_NODES: usize = 1000;

/// A validated undirected graph. Nodes are numbered `0..node_count`.
#[derive(Debug, Clone)]
pub struct HcpInstance {
    pub name: String,
    graph: UnGraphMap<usize, ()>,
}

impl HcpInstance {
    /// Build an instance from adjacency lists, validating them.
    ///
    /// `adjacency[u]` lists the neighbors of `u`; every edge must be listed
    /// from both ends. Repeated entries are ignored.
    pub fn from_adjacency(name: impl Into<String>, adjacency: &[Vec<usize>]) -> Result<Self> {
        let n = adjacency.len();
        if n == 0 {
            return Err(InvalidInstance::EmptyInstance.into());
        }

        for (u, neighbors) in adjacency.iter().enumerate() {
            if neighbors.is_empty() {
                return Err(InvalidInstance::IsolatedNode(u).into());
            }
            for &v in neighbors {
                if v >= n {
                    return Err(Error::IndexOutOfBounds {
                        index: v,
                        max: n - 1,
                    });
                }
                if v == u {
                    return Err(InvalidInstance::SelfLoop(u).into());
                }
                if !adjacency[v].contains(&u) {
                    return Err(InvalidInstance::NotBidirectional { from: u, to: v }.into());
                }
            }
        }

        let mut graph = UnGraphMap::with_capacity(n, n);
        for u in 0..n {
            graph.add_node(u);
        }
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                if u < v {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Ok(HcpInstance {
            name: name.into(),
            graph,
        })
    }

    /// Build an instance from an undirected, 0-based edge list.
    pub fn from_edges(name: impl Into<String>, node_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); node_count];

        for &(u, v) in edges {
            let max = node_count.saturating_sub(1);
            if u >= node_count || v >= node_count {
                return Err(Error::IndexOutOfBounds {
                    index: u.max(v),
                    max,
                });
            }
            if !adjacency[u].contains(&v) {
                adjacency[u].push(v);
            }
            if !adjacency[v].contains(&u) {
                adjacency[v].push(u);
            }
        }

        Self::from_adjacency(name, &adjacency)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if `u` and `v` are connected by an edge.
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.graph.contains_edge(u, v)
    }

    /// Neighbors of `u`.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(u)
    }

    /// Edges as 0-based `(u, v)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.all_edges().map(|(u, v, _)| (u, v))
    }

    /// Proxy distance matrix: 1 for edges, 2 for non-edges, 0 on the diagonal.
    pub fn proxy_distances(&self) -> DistanceMatrix {
        DistanceMatrix::from_fn(self.node_count(), |i, j| if self.is_adjacent(i, j) { 1 } else { 2 })
    }

    /// Reduce to a tour problem whose optimum `n` marks a Hamiltonian cycle.
    pub fn to_problem(&self) -> TourProblem {
        TourProblem::new(self.proxy_distances(), Construction::PreferAdjacent)
            .with_optimum(self.node_count() as Cost)
    }

    /// Check whether `tour` is a Hamiltonian cycle of this graph.
    pub fn is_hamiltonian_cycle(&self, tour: &[usize]) -> bool {
        let n = self.node_count();
        if tour.len() != n {
            return false;
        }

        let mut seen = vec![false; n];
        for &node in tour {
            if node >= n || seen[node] {
                return false;
            }
            seen[node] = true;
        }

        (0..n).all(|k| self.is_adjacent(tour[k], tour[(k + 1) % n]))
    }

    /// Generate a random instance that is guaranteed to contain a Hamiltonian cycle.
    ///
    /// The nodes are shuffled into a hidden cycle, then every other pair is
    /// connected with `extra_edge_probability`. Returns the instance and the
    /// hidden cycle.
    pub fn generate(
        node_count: usize,
        extra_edge_probability: f64,
        seed: u64,
    ) -> Result<(Self, Vec<usize>)> {
        if node_count < 3 {
            return Err(InvalidInstance::BadDimension(format!(
                "a Hamiltonian cycle needs at least 3 nodes, got {}",
                node_count
            ))
            .into());
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cycle: Vec<usize> = (0..node_count).collect();
        cycle.shuffle(&mut rng);

        let mut edges: Vec<(usize, usize)> = (0..node_count)
            .map(|k| (cycle[k], cycle[(k + 1) % node_count]))
            .collect();
        let on_cycle: HashSet<(usize, usize)> =
            edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();

        let probability = extra_edge_probability.clamp(0.0, 1.0);
        for u in 0..node_count {
            for v in (u + 1)..node_count {
                if !on_cycle.contains(&(u, v)) && rng.gen_bool(probability) {
                    edges.push((u, v));
                }
            }
        }

        let name = format!("random_{}", node_count);
        let instance = Self::from_edges(name, node_count, &edges)?;
        Ok((instance, cycle))
    }
}

/// Reads HCP files in the TSPLIB edge-list format.
#[derive(Debug, Clone, Copy)]
pub struct HcpLoader {
    max_nodes: usize,
}

impl Default for HcpLoader {
    fn default() -> Self {
        HcpLoader {
            max_nodes: MAX_NODES,
        }
    }
}

impl HcpLoader {
    /// Create a loader with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest node id accepted.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Load and validate an instance from a file.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<HcpInstance> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.parse(&text, &fallback)
    }

    /// Load and validate an instance from text.
    ///
    /// `fallback_name` is used when the text carries no `NAME` header.
    pub fn parse(&self, text: &str, fallback_name: &str) -> Result<HcpInstance> {
        let mut name = None;
        let mut dimension = None;
        let mut in_edges = false;
        let mut edges = Vec::new();
        let mut max_id = 0;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if !in_edges {
                if line.starts_with("EDGE_DATA_SECTION") {
                    in_edges = true;
                } else if let Some((key, value)) = line.split_once(':') {
                    match key.trim() {
                        "NAME" => name = Some(value.trim().to_string()),
                        "DIMENSION" => {
                            let d = value.trim().parse::<usize>().map_err(|_| {
                                Error::parse(line_no, format!("invalid DIMENSION '{}'", value.trim()))
                            })?;
                            if d > self.max_nodes {
                                return Err(Error::IndexOutOfBounds {
                                    index: d,
                                    max: self.max_nodes,
                                });
                            }
                            dimension = Some(d);
                        }
                        _ => {}
                    }
                }
                continue;
            }

            if line == "-1" || line == "EOF" {
                break;
            }

            let (u, v) = parse_edge(line, line_no)?;
            let limit = dimension.unwrap_or(self.max_nodes);
            for id in [u, v] {
                if id == 0 || id > limit {
                    return Err(Error::IndexOutOfBounds {
                        index: id,
                        max: limit,
                    });
                }
            }
            max_id = max_id.max(u).max(v);
            edges.push((u - 1, v - 1));
        }

        if !in_edges {
            return Err(Error::parse(
                text.lines().count(),
                "missing EDGE_DATA_SECTION",
            ));
        }

        let node_count = dimension.unwrap_or(max_id);
        let name = name.unwrap_or_else(|| fallback_name.to_string());
        HcpInstance::from_edges(name, node_count, &edges)
    }
}

fn parse_edge(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let mut parts = line.split_whitespace().map(|p| p.parse::<usize>());

    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(u)), Some(Ok(v)), None) => Ok((u, v)),
        _ => Err(Error::parse(line_no, format!("expected an edge 'u v', got '{}'", line))),
    }
}
