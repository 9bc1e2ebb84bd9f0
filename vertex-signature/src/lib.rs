//! Vertex Signature - Isomorphism-Invariant Vertex Ranking
//!
//! Ranks the vertices of a simple undirected graph by iteratively refining
//! a tree-shaped signature of each vertex's neighbourhood:
//! - Every vertex starts with a collapsed signature that only knows its degree
//! - Vertices whose signature differs from all others are finalized
//! - Ambiguous signatures grow one level per pass until they separate or
//!   every path below them has closed a cycle
//!
//! The resulting ranking depends only on graph structure, never on labels.

pub mod adjacency;
pub mod config;
pub mod error;
pub mod graph;

pub use adjacency::{letter_label, Adjacency, AdjacencyGraph};
pub use config::EngineConfig;
pub use error::{ConvergenceError, ConvergenceKind, SignatureError};
pub use graph::{Engine, RankEntry, Ranking};
