//! Graph data structures and algorithms
//!
//! This module contains the core refinement types:
//! - `VertexRegistry`: Immutable graph facts plus per-vertex finalization state
//! - `SignatureArena`: Owner of every signature tree node, addressed by index
//! - `compare`: The total preorder over signatures
//! - `expand`: One-level tree growth with cycle detection
//! - `Engine`: The pass loop that drives refinement to a `Ranking`
//! - `memory`: Functions for estimating heap memory usage

mod compare;
mod engine;
mod expand;
pub mod memory;
mod ranking;
mod registry;
mod render;
mod signature;

pub use compare::{compare_signatures, sort_signatures};
pub use engine::Engine;
pub use expand::{expand, recursive_expand};
pub use ranking::{RankEntry, Ranking};
pub use registry::{Vertex, VertexId, VertexRegistry};
pub use signature::{SignatureArena, SignatureId, SignatureNode};
