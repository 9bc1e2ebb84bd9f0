//! Memory size calculation for engine data structures
//!
//! Provides functions for estimating heap memory usage of the vertex registry
//! and the signature arena. Useful for benchmarking symmetric graphs, whose
//! trees keep growing until every path closes a cycle.
//!
//! # Example
//!
//! ```
//! use vertex_signature::graph::memory;
//! use vertex_signature::{AdjacencyGraph, Engine};
//!
//! let graph = AdjacencyGraph::from_edges([("A", "B"), ("B", "C")]).unwrap();
//! let engine = Engine::new(&graph).unwrap();
//! let breakdown = memory::engine_size(&engine);
//! println!("Engine uses {}", memory::format_bytes(breakdown.total_bytes));
//! ```

use super::Engine;

// ============================================================================
// Engine memory calculation
// ============================================================================

/// Memory breakdown for an Engine
#[derive(Debug, Clone, Default)]
pub struct EngineMemory {
    pub total_bytes: usize,
    pub vertices_bytes: usize,
    pub label_index_bytes: usize,
    pub signatures_bytes: usize,
    pub children_bytes: usize,
    pub order_bytes: usize,
}

/// Calculate memory usage of an Engine
pub fn engine_size(engine: &Engine) -> EngineMemory {
    let (vertices_bytes, label_index_bytes) = engine.registry().capacity_bytes();
    let (signatures_bytes, children_bytes) = engine.arena().capacity_bytes();
    let order_bytes = std::mem::size_of_val(engine.sorted_roots());

    EngineMemory {
        total_bytes: vertices_bytes
            + label_index_bytes
            + signatures_bytes
            + children_bytes
            + order_bytes,
        vertices_bytes,
        label_index_bytes,
        signatures_bytes,
        children_bytes,
        order_bytes,
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Format bytes as human-readable string
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    const GB: usize = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Calculate signature nodes per vertex for an engine
pub fn signatures_per_vertex(engine: &Engine) -> f64 {
    let vertices = engine.vertex_count();
    if vertices == 0 {
        0.0
    } else {
        engine.arena().len() as f64 / vertices as f64
    }
}
