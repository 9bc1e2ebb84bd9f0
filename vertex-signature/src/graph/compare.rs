//! Signature ordering
//!
//! A total, deterministic order over signature nodes. Two signatures compare
//! `Equal` exactly when refinement cannot (yet) tell them apart, so the same
//! function drives both sorting and uniqueness tests.
//!
//! Rules, each breaking ties left by the previous one:
//! 1. degree, descending
//! 2. resolution step, ascending, unset last
//! 3. loop length, ascending, unset last
//! 4. final index, ascending, unset last
//! 5. expanded before collapsed
//! 6. children pairwise, in stored order
//!
//! A node whose vertex is finalized counts as a leaf for rules 5 and 6 even if
//! it was expanded before finalization.

use std::cmp::Ordering;

use super::registry::VertexRegistry;
use super::signature::{SignatureArena, SignatureId};

/// Compare optional values ascending with `None` after every `Some`.
pub fn ascending_none_last(a: Option<usize>, b: Option<usize>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare the signature trees rooted at `a` and `b`.
///
/// Walks both trees in lock-step, depth first, with an explicit stack so
/// deep trees cannot exhaust the call stack.
pub fn compare_signatures(
    registry: &VertexRegistry,
    arena: &SignatureArena,
    a: SignatureId,
    b: SignatureId,
) -> Ordering {
    let mut stack = vec![(a, b)];

    while let Some((a, b)) = stack.pop() {
        if a == b {
            continue;
        }

        let ordering = compare_local(registry, arena, a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }

        match (
            comparable_children(registry, arena, a),
            comparable_children(registry, arena, b),
        ) {
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (Some(left), Some(right)) => {
                stack.extend(left.iter().copied().zip(right.iter().copied()).rev());
            }
            (None, None) => {}
        }
    }

    Ordering::Equal
}

/// Rules 1-4: everything that does not look below the node itself.
fn compare_local(
    registry: &VertexRegistry,
    arena: &SignatureArena,
    a: SignatureId,
    b: SignatureId,
) -> Ordering {
    let (node_a, node_b) = (arena.node(a), arena.node(b));
    let (vertex_a, vertex_b) = (registry.vertex(node_a.vertex), registry.vertex(node_b.vertex));

    vertex_b
        .degree
        .cmp(&vertex_a.degree)
        .then_with(|| ascending_none_last(vertex_a.resolution_step, vertex_b.resolution_step))
        .then_with(|| ascending_none_last(node_a.loop_length, node_b.loop_length))
        .then_with(|| ascending_none_last(vertex_a.final_index, vertex_b.final_index))
}

/// Children that take part in comparison: `None` for collapsed nodes, loops
/// and nodes whose vertex is finalized.
fn comparable_children<'a>(
    registry: &VertexRegistry,
    arena: &'a SignatureArena,
    id: SignatureId,
) -> Option<&'a [SignatureId]> {
    let node = arena.node(id);
    if node.is_loop() || registry.vertex(node.vertex).is_finalized() {
        return None;
    }
    node.children.as_deref()
}

/// Stable sort of signature ids by [`compare_signatures`].
pub fn sort_signatures(registry: &VertexRegistry, arena: &SignatureArena, ids: &mut [SignatureId]) {
    ids.sort_by(|a, b| compare_signatures(registry, arena, *a, *b));
}
