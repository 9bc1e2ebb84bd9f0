//! Text rendering of signature trees
//!
//! Two forms are produced:
//! - compact: `{nc:2,fi:0,rs:1,n:[{nc:1},{nc:1}]}`
//! - verbose: `{label:B,neighbour_count:2,final_index:0,resolution_step:1,neighbours:[...]}`
//!
//! Unset fields are omitted; children are shown only for expanded nodes with
//! at least one child.

use std::fmt;

use super::engine::Engine;
use super::registry::VertexRegistry;
use super::signature::{SignatureArena, SignatureId};
use crate::error::SignatureError;

#[derive(Clone, Copy)]
enum Style {
    Compact,
    Verbose,
}

enum Emit {
    Node(SignatureId),
    Text(&'static str),
}

fn fields(
    registry: &VertexRegistry,
    arena: &SignatureArena,
    id: SignatureId,
    style: Style,
) -> String {
    let node = arena.node(id);
    let vertex = registry.vertex(node.vertex);

    let mut parts = Vec::with_capacity(6);
    match style {
        Style::Compact => {
            parts.push(format!("nc:{}", vertex.degree));
            if let Some(final_index) = vertex.final_index {
                parts.push(format!("fi:{final_index}"));
            }
            if let Some(step) = vertex.resolution_step {
                parts.push(format!("rs:{step}"));
            }
            if let Some(length) = node.loop_length {
                parts.push(format!("ll:{length}"));
            }
        }
        Style::Verbose => {
            parts.push(format!("label:{}", vertex.label));
            parts.push(format!("neighbour_count:{}", vertex.degree));
            if let Some(final_index) = vertex.final_index {
                parts.push(format!("final_index:{final_index}"));
            }
            if let Some(step) = vertex.resolution_step {
                parts.push(format!("resolution_step:{step}"));
            }
            if let Some(length) = node.loop_length {
                parts.push(format!("loop_length:{length}"));
            }
        }
    }
    parts.join(",")
}

/// Append the tree rooted at `root`, depth first, with an explicit stack.
fn render(
    registry: &VertexRegistry,
    arena: &SignatureArena,
    root: SignatureId,
    style: Style,
    out: &mut String,
) {
    let (key, separator) = match style {
        Style::Compact => (",n:[", ","),
        Style::Verbose => (",neighbours:[", ", "),
    };

    let mut stack = vec![Emit::Node(root)];
    while let Some(emit) = stack.pop() {
        let id = match emit {
            Emit::Text(text) => {
                out.push_str(text);
                continue;
            }
            Emit::Node(id) => id,
        };

        out.push('{');
        out.push_str(&fields(registry, arena, id, style));

        let children = arena.children(id);
        if children.is_empty() {
            out.push('}');
            continue;
        }

        out.push_str(key);
        stack.push(Emit::Text("]}"));
        for (i, child) in children.iter().enumerate().rev() {
            stack.push(Emit::Node(*child));
            if i > 0 {
                stack.push(Emit::Text(separator));
            }
        }
    }
}

impl Engine {
    /// Compact signature of `label`'s root.
    pub fn signature(&self, label: &str) -> Result<String, SignatureError> {
        let root = self.root(label)?;
        let mut out = String::new();
        render(self.registry(), self.arena(), root, Style::Compact, &mut out);
        Ok(out)
    }

    /// Verbose signature of `label`'s root, including labels.
    pub fn describe(&self, label: &str) -> Result<String, SignatureError> {
        let root = self.root(label)?;
        let mut out = String::new();
        render(self.registry(), self.arena(), root, Style::Verbose, &mut out);
        Ok(out)
    }
}

/// Compact signatures of all roots in their most recent sorted order.
impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("[");
        for (i, root) in self.sorted_roots().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            render(self.registry(), self.arena(), *root, Style::Compact, &mut out);
        }
        out.push(']');
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use crate::adjacency::AdjacencyGraph;
    use crate::graph::Engine;

    fn path_engine() -> Engine {
        let graph = AdjacencyGraph::from_edges([("A", "B"), ("B", "C")]).unwrap();
        Engine::new(&graph).unwrap()
    }

    #[test]
    fn test_collapsed_signature() {
        let engine = path_engine();
        assert_eq!(engine.signature("B").unwrap(), "{nc:2}");
        assert_eq!(engine.describe("A").unwrap(), "{label:A,neighbour_count:1}");
    }

    #[test]
    fn test_signatures_after_refinement() {
        let mut engine = path_engine();
        let _ = engine.compute();

        assert_eq!(engine.signature("B").unwrap(), "{nc:2,fi:0,rs:1}");
        assert_eq!(engine.signature("A").unwrap(), "{nc:1,n:[{nc:2,fi:0,rs:1}]}");
        assert_eq!(
            engine.describe("C").unwrap(),
            "{label:C,neighbour_count:1,neighbours:[{label:B,neighbour_count:2,final_index:0,resolution_step:1}]}"
        );
    }

    #[test]
    fn test_engine_display_lists_sorted_roots() {
        let mut engine = path_engine();
        let _ = engine.compute();

        assert_eq!(
            engine.to_string(),
            "[{nc:2,fi:0,rs:1},{nc:1,n:[{nc:2,fi:0,rs:1}]},{nc:1,n:[{nc:2,fi:0,rs:1}]}]"
        );
    }

    #[test]
    fn test_loop_rendering() {
        let graph = AdjacencyGraph::from_edges([("A", "B")]).unwrap();
        let mut engine = Engine::new(&graph).unwrap();
        let _ = engine.compute();

        // K2 is symmetric: A's tree grows to A -> B -> (A, loop 2).
        assert_eq!(engine.signature("A").unwrap(), "{nc:1,n:[{nc:1,n:[{nc:1,ll:2}]}]}");
    }

    #[test]
    fn test_sibling_order_and_separators() {
        let mut engine = path_engine();
        assert!(engine.expand_ambiguous(1));

        assert_eq!(engine.signature("B").unwrap(), "{nc:2,n:[{nc:1},{nc:1}]}");
        assert_eq!(
            engine.describe("B").unwrap(),
            "{label:B,neighbour_count:2,neighbours:[{label:A,neighbour_count:1}, {label:C,neighbour_count:1}]}"
        );
        assert_eq!(engine.signature("A").unwrap(), "{nc:1,n:[{nc:2}]}");
    }

    #[test]
    fn test_unknown_label() {
        let engine = path_engine();
        assert!(engine.signature("Q").is_err());
        assert!(engine.describe("Q").is_err());
    }
}
