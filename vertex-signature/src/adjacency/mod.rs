//! Graph adjacency boundary
//!
//! The refinement core only consumes three queries: the vertex set, a
//! vertex's degree, and its neighbours. Anything that answers them can be
//! ranked:
//! - `AdjacencyGraph`: an owned, validated adjacency-set graph
//! - `graph6`: decoding of the graph6 interchange format into `AdjacencyGraph`
//! - `ungraph`: `Adjacency` for `petgraph::graph::UnGraph`

pub mod graph6;
mod ungraph;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::SignatureError;

/// Read-only view of a finite, simple, undirected graph.
///
/// Labels must be stable and unique. Self-loops and parallel edges are
/// rejected when an [`Engine`](crate::Engine) is built from the provider.
pub trait Adjacency {
    /// All vertex labels.
    fn vertices(&self) -> Vec<String>;

    /// Number of edges incident to `vertex`.
    fn degree(&self, vertex: &str) -> usize;

    /// Labels adjacent to `vertex`.
    fn neighbors(&self, vertex: &str) -> Vec<String>;
}

/// Owned adjacency-set graph with deterministic (sorted) iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl AdjacencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an undirected edge list.
    ///
    /// Fails on the first self-loop or repeated edge instead of silently
    /// dropping it.
    pub fn from_edges<I, A, B>(edges: I) -> Result<Self, SignatureError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Add a vertex. Adding an existing vertex is a no-op.
    pub fn add_vertex(&mut self, label: impl Into<String>) {
        self.adjacency.entry(label.into()).or_default();
    }

    /// Add an undirected edge, creating missing endpoints.
    pub fn add_edge(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
    ) -> Result<(), SignatureError> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(SignatureError::SelfLoop(a));
        }
        if self.has_edge(&a, &b) {
            return Err(SignatureError::ParallelEdge(a, b));
        }

        self.adjacency.entry(a.clone()).or_default().insert(b.clone());
        self.adjacency.entry(b).or_default().insert(a);
        Ok(())
    }

    /// Check whether `a` and `b` are adjacent.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// All edges as `(a, b)` pairs with `a < b`.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.adjacency
            .iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |b| a < *b)
                    .map(move |b| (a.clone(), b.clone()))
            })
            .collect()
    }

    /// Return an isomorphic copy with every label passed through `mapping`.
    ///
    /// Labels missing from `mapping` are kept as they are.
    pub fn relabel(&self, mapping: &BTreeMap<String, String>) -> Result<Self, SignatureError> {
        let rename = |label: &String| mapping.get(label).unwrap_or(label).clone();

        let mut graph = Self::new();
        for label in self.adjacency.keys() {
            graph.add_vertex(rename(label));
        }
        for (a, b) in self.edges() {
            graph.add_edge(rename(&a), rename(&b))?;
        }
        Ok(graph)
    }
}

impl Adjacency for AdjacencyGraph {
    fn vertices(&self) -> Vec<String> {
        self.adjacency.keys().cloned().collect()
    }

    fn degree(&self, vertex: &str) -> usize {
        self.adjacency.get(vertex).map_or(0, BTreeSet::len)
    }

    fn neighbors(&self, vertex: &str) -> Vec<String> {
        self.adjacency
            .get(vertex)
            .map(|neighbors| neighbors.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Spreadsheet-style label for vertex `index`: `A`..`Z`, then `AA`, `AB`, ...
pub fn letter_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
