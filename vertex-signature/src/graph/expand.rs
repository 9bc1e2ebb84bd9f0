//! Signature expansion and cycle detection
//!
//! `expand` turns one collapsed node into an expanded one with a child per
//! graph neighbour. `recursive_expand` pushes every open frontier of a tree
//! one level deeper and is the only way tree depth grows.

use std::collections::HashSet;

use tracing::trace;

use super::compare::sort_signatures;
use super::registry::VertexRegistry;
use super::signature::{SignatureArena, SignatureId};

/// Materialize the children of a collapsed signature.
///
/// Each neighbour becomes:
/// - a loop leaf, if it already occurs on the parent chain (the node itself
///   counts as distance 1, its parent as 2, ...)
/// - a leaf, if the neighbour is finalized; comparison reads its
///   `final_index` and `resolution_step` from the registry
/// - a plain collapsed child otherwise
///
/// Returns `false` without touching the arena when the node is already
/// expanded, is a loop, or belongs to a finalized vertex.
pub fn expand(
    registry: &VertexRegistry,
    arena: &mut SignatureArena,
    id: SignatureId,
    pass_number: usize,
) -> bool {
    let node = arena.node(id);
    if node.is_expanded() || node.is_loop() || registry.vertex(node.vertex).is_finalized() {
        return false;
    }

    let vertex = registry.vertex(node.vertex);
    let mut children = Vec::with_capacity(vertex.neighbors.len());
    for neighbor in &vertex.neighbors {
        let loop_length = arena.ancestor_distance(id, *neighbor);
        children.push(arena.push_child(*neighbor, id, loop_length));
    }

    sort_signatures(registry, arena, &mut children);
    trace!(
        pass = pass_number,
        vertex = %vertex.label,
        children = children.len(),
        "Expanded signature"
    );
    arena.node_mut(id).children = Some(children);
    true
}

enum Visit {
    Enter(SignatureId),
    Exit(SignatureId),
}

/// Grow every open branch below `id` by exactly one level.
///
/// Loop nodes and nodes of finalized vertices are left alone. Collapsed
/// nodes are expanded once; expanded nodes are descended into and have their
/// children re-sorted when anything below them changed.
///
/// Returns whether any expansion happened in the subtree.
pub fn recursive_expand(
    registry: &VertexRegistry,
    arena: &mut SignatureArena,
    id: SignatureId,
    pass_number: usize,
) -> bool {
    let mut grown: HashSet<SignatureId> = HashSet::new();
    let mut stack = vec![Visit::Enter(id)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(current) => {
                let node = arena.node(current);
                if node.is_loop() || registry.vertex(node.vertex).is_finalized() {
                    continue;
                }
                let parent = node.parent;

                match node.children.clone() {
                    Some(children) => {
                        stack.push(Visit::Exit(current));
                        stack.extend(children.into_iter().rev().map(Visit::Enter));
                    }
                    None => {
                        if expand(registry, arena, current, pass_number) {
                            grown.insert(current);
                            if current != id {
                                if let Some(parent) = parent {
                                    grown.insert(parent);
                                }
                            }
                        }
                    }
                }
            }
            Visit::Exit(current) => {
                if !grown.contains(&current) {
                    continue;
                }
                resort_children(registry, arena, current);
                if current != id {
                    if let Some(parent) = arena.node(current).parent {
                        grown.insert(parent);
                    }
                }
            }
        }
    }

    grown.contains(&id)
}

/// Re-sort the children of every expanded node, deepest first.
///
/// Finalizing a vertex changes how its nodes compare, so sibling order fixed
/// at expansion time can go stale. Children always have higher ids than
/// their parent, which makes a reverse id scan a bottom-up walk.
pub fn resort_all(registry: &VertexRegistry, arena: &mut SignatureArena) {
    for index in (0..arena.len()).rev() {
        let id = SignatureId(index);
        let node = arena.node(id);
        if node.is_expanded() && !node.is_loop() && !registry.vertex(node.vertex).is_finalized() {
            resort_children(registry, arena, id);
        }
    }
}

fn resort_children(registry: &VertexRegistry, arena: &mut SignatureArena, id: SignatureId) {
    if let Some(mut children) = arena.node_mut(id).children.take() {
        sort_signatures(registry, arena, &mut children);
        arena.node_mut(id).children = Some(children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::AdjacencyGraph;

    fn setup(edges: &[(&str, &str)]) -> (VertexRegistry, SignatureArena) {
        let graph = AdjacencyGraph::from_edges(edges.iter().copied()).unwrap();
        let registry = VertexRegistry::initialize(&graph).unwrap();
        let arena = SignatureArena::with_roots(&registry);
        (registry, arena)
    }

    #[test]
    fn test_expand_creates_sorted_children() {
        // A is adjacent to B (degree 1) and C (degree 2).
        let (registry, mut arena) = setup(&[("A", "B"), ("A", "C"), ("C", "D")]);
        let a = arena.root_of(registry.id("A").unwrap());

        assert!(expand(&registry, &mut arena, a, 1));

        let children = arena.children(a);
        assert_eq!(children.len(), 2);
        assert_eq!(arena.node(children[0]).vertex, registry.id("C").unwrap());
        assert_eq!(arena.node(children[1]).vertex, registry.id("B").unwrap());
        assert!(children.iter().all(|c| arena.node(*c).parent == Some(a)));
        assert!(children.iter().all(|c| !arena.node(*c).is_loop()));
    }

    #[test]
    fn test_expand_is_noop_when_expanded() {
        let (registry, mut arena) = setup(&[("A", "B")]);
        let a = arena.root_of(registry.id("A").unwrap());

        assert!(expand(&registry, &mut arena, a, 1));
        let size = arena.len();
        assert!(!expand(&registry, &mut arena, a, 2));
        assert_eq!(arena.len(), size);
    }

    #[test]
    fn test_expand_skips_finalized_vertex() {
        let (mut registry, mut arena) = setup(&[("A", "B")]);
        let a_id = registry.id("A").unwrap();
        registry.finalize(a_id, 0, 1);
        let root = arena.root_of(a_id);

        assert!(!expand(&registry, &mut arena, root, 2));
        assert!(arena.node(root).is_collapsed());
    }

    #[test]
    fn test_back_edge_becomes_loop_of_length_two() {
        let (registry, mut arena) = setup(&[("A", "B")]);
        let a = arena.root_of(registry.id("A").unwrap());

        expand(&registry, &mut arena, a, 1);
        let b = arena.children(a)[0];
        expand(&registry, &mut arena, b, 2);

        let back = arena.children(b)[0];
        assert_eq!(arena.node(back).vertex, registry.id("A").unwrap());
        assert_eq!(arena.node(back).loop_length, Some(2));
        assert!(!expand(&registry, &mut arena, back, 3));
    }

    #[test]
    fn test_triangle_closes_with_loop_of_length_three() {
        let (registry, mut arena) = setup(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let a = arena.root_of(registry.id("A").unwrap());

        assert!(recursive_expand(&registry, &mut arena, a, 1));
        assert!(recursive_expand(&registry, &mut arena, a, 2));
        assert!(recursive_expand(&registry, &mut arena, a, 3));
        // Every path has closed a cycle by now.
        assert!(!recursive_expand(&registry, &mut arena, a, 4));

        let mut loops = Vec::new();
        let mut stack = vec![a];
        while let Some(id) = stack.pop() {
            let node = arena.node(id);
            if let Some(length) = node.loop_length {
                loops.push(length);
            }
            stack.extend_from_slice(arena.children(id));
        }
        loops.sort();
        // Back-edges to the parent (A-B-A, A-C-A, A-B-C-B, A-C-B-C) have
        // length 2; closing the triangle (A-B-C-A, A-C-B-A) has length 3.
        assert_eq!(loops, vec![2, 2, 2, 2, 3, 3]);
        assert_eq!(arena.depth(a), 4);
    }

    #[test]
    fn test_recursive_expand_grows_one_level_per_call() {
        let (registry, mut arena) = setup(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let a = arena.root_of(registry.id("A").unwrap());

        recursive_expand(&registry, &mut arena, a, 1);
        assert_eq!(arena.depth(a), 2);
        recursive_expand(&registry, &mut arena, a, 2);
        assert_eq!(arena.depth(a), 3);
    }

    #[test]
    fn test_resort_all_moves_finalized_child_first() {
        // A's children B and C tie at expansion time.
        let (mut registry, mut arena) = setup(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "E")]);
        let a = arena.root_of(registry.id("A").unwrap());
        expand(&registry, &mut arena, a, 1);
        let c_id = registry.id("C").unwrap();
        assert_eq!(arena.node(arena.children(a)[1]).vertex, c_id);

        registry.finalize(c_id, 0, 2);
        resort_all(&registry, &mut arena);

        assert_eq!(arena.node(arena.children(a)[0]).vertex, c_id);
    }

    #[test]
    fn test_recursive_expand_stops_at_finalized_vertices() {
        let (mut registry, mut arena) = setup(&[("A", "B"), ("B", "C")]);
        let a = arena.root_of(registry.id("A").unwrap());
        registry.finalize(registry.id("B").unwrap(), 0, 1);

        assert!(recursive_expand(&registry, &mut arena, a, 2));
        assert!(!recursive_expand(&registry, &mut arena, a, 3));
        assert_eq!(arena.depth(a), 2);
    }
}
