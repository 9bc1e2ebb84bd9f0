//! Error types for signature construction and refinement.
//!
//! `SignatureError` covers everything that can go wrong before refinement
//! starts (a malformed adjacency provider, an undecodable graph6 string) as
//! well as internal lookups that should be unreachable for a consistent graph.
//! `ConvergenceError` is what `Engine::compute` reports when some vertices
//! could not be finalized.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::Ranking;

/// Errors raised while building or querying an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A label was referenced that the vertex registry does not hold.
    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    /// The provider enumerated the same label more than once.
    #[error("Duplicate vertex: {0}")]
    DuplicateVertex(String),

    /// The graph contains an edge from a vertex to itself.
    #[error("Self-loop on vertex {0}")]
    SelfLoop(String),

    /// The same undirected edge appears more than once.
    #[error("Parallel edge between {0} and {1}")]
    ParallelEdge(String, String),

    /// `a` lists `b` as a neighbour but `b` does not list `a`.
    #[error("Asymmetric adjacency: {0} lists {1} but not the reverse")]
    AsymmetricEdge(String, String),

    /// The reported degree disagrees with the neighbour enumeration.
    #[error("Degree mismatch on {label}: reported {reported}, enumerated {enumerated}")]
    DegreeMismatch {
        label: String,
        reported: usize,
        enumerated: usize,
    },

    /// A graph6 string could not be decoded.
    #[error("Graph6 error: {0}")]
    Graph6(String),
}

impl SignatureError {
    /// Create an unknown-vertex error.
    pub fn unknown_vertex(label: impl Into<String>) -> Self {
        Self::UnknownVertex(label.into())
    }

    /// Create a graph6 decode error.
    pub fn graph6(msg: impl Into<String>) -> Self {
        Self::Graph6(msg.into())
    }
}

/// Why refinement stopped short of finalizing every vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergenceKind {
    /// The pass budget ran out while expansion was still making progress.
    NonConvergence,
    /// Expansion reached a fixed point. The remaining vertices sit in a
    /// nontrivial automorphism orbit and cannot be told apart.
    SymmetricStable,
}

impl fmt::Display for ConvergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceKind::NonConvergence => write!(f, "pass budget exhausted"),
            ConvergenceKind::SymmetricStable => write!(f, "symmetric fixed point"),
        }
    }
}

/// Refinement ended with unresolved vertices.
///
/// Carries everything that was decided before stopping, so callers that are
/// fine with a partial answer can recover it with [`ConvergenceError::into_partial`].
#[derive(Debug, Clone, Error)]
#[error("{kind} after {passes} passes: {} of {} vertices unresolved", .unresolved.len(), vertex_total(.partial, .unresolved))]
pub struct ConvergenceError {
    pub kind: ConvergenceKind,
    pub passes: usize,
    pub partial: Ranking,
    pub unresolved: BTreeSet<String>,
}

fn vertex_total(partial: &Ranking, unresolved: &BTreeSet<String>) -> usize {
    partial.len() + unresolved.len()
}

impl ConvergenceError {
    /// True when refinement stopped because of graph symmetry.
    pub fn is_symmetric(&self) -> bool {
        self.kind == ConvergenceKind::SymmetricStable
    }

    /// Consume the error, keeping only the vertices that were finalized.
    pub fn into_partial(self) -> Ranking {
        self.partial
    }
}
