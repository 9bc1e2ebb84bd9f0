//! Signature trees
//!
//! Every vertex starts with one collapsed root signature. Expanding a
//! signature materializes one child per graph neighbour, so the parent chain
//! of any node mirrors a walk in the graph starting at its root.
//!
//! All nodes of all trees live in one arena and refer to each other by
//! `SignatureId`. Nodes are only ever appended; the only in-place mutation is
//! re-sorting a node's child list.

use serde::{Deserialize, Serialize};

use super::registry::{VertexId, VertexRegistry};

/// Index of a signature node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureId(pub usize);

/// One node of an expansion tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureNode {
    pub vertex: VertexId,
    pub parent: Option<SignatureId>,
    /// Distance back along the parent chain to the occurrence of the same
    /// vertex. A loop node is a permanent leaf.
    pub loop_length: Option<usize>,
    /// `None` while collapsed.
    pub children: Option<Vec<SignatureId>>,
}

impl SignatureNode {
    fn root(vertex: VertexId) -> Self {
        Self {
            vertex,
            parent: None,
            loop_length: None,
            children: None,
        }
    }

    pub fn is_loop(&self) -> bool {
        self.loop_length.is_some()
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_collapsed(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena holding every signature node of one engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureArena {
    nodes: Vec<SignatureNode>,
    /// Root signature of each vertex, indexed by `VertexId`.
    roots: Vec<SignatureId>,
}

impl SignatureArena {
    /// Create one collapsed root per registered vertex.
    pub fn with_roots(registry: &VertexRegistry) -> Self {
        let mut arena = Self::default();
        for (vertex, _) in registry.iter() {
            let id = arena.push(SignatureNode::root(vertex));
            arena.roots.push(id);
        }
        arena
    }

    fn push(&mut self, node: SignatureNode) -> SignatureId {
        let id = SignatureId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append a child node. The caller attaches it to the parent's list.
    pub(crate) fn push_child(
        &mut self,
        vertex: VertexId,
        parent: SignatureId,
        loop_length: Option<usize>,
    ) -> SignatureId {
        self.push(SignatureNode {
            vertex,
            parent: Some(parent),
            loop_length,
            children: None,
        })
    }

    pub fn node(&self, id: SignatureId) -> &SignatureNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: SignatureId) -> &mut SignatureNode {
        &mut self.nodes[id.0]
    }

    /// Root signature of `vertex`.
    pub fn root_of(&self, vertex: VertexId) -> SignatureId {
        self.roots[vertex.0]
    }

    pub fn roots(&self) -> &[SignatureId] {
        &self.roots
    }

    /// Children of `id`, empty when collapsed.
    pub fn children(&self, id: SignatureId) -> &[SignatureId] {
        self.node(id).children.as_deref().unwrap_or(&[])
    }

    /// Walk the parent chain starting at `id` itself (distance 1).
    ///
    /// Returns the distance of the first node whose vertex is `target`.
    pub fn ancestor_distance(&self, id: SignatureId, target: VertexId) -> Option<usize> {
        let mut cursor = Some(id);
        let mut distance = 1;
        while let Some(current) = cursor {
            let node = self.node(current);
            if node.vertex == target {
                return Some(distance);
            }
            cursor = node.parent;
            distance += 1;
        }
        None
    }

    /// Number of nodes in the subtree rooted at `id`.
    pub fn subtree_size(&self, id: SignatureId) -> usize {
        let mut stack = vec![id];
        let mut count = 0;
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.children(current));
        }
        count
    }

    /// Depth of the subtree rooted at `id`; a lone node has depth 1.
    pub fn depth(&self, id: SignatureId) -> usize {
        let mut stack = vec![(id, 1)];
        let mut deepest = 0;
        while let Some((current, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(self.children(current).iter().map(|c| (*c, depth + 1)));
        }
        deepest
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity_bytes(&self) -> (usize, usize) {
        let nodes = self.nodes.capacity() * std::mem::size_of::<SignatureNode>()
            + self.roots.capacity() * std::mem::size_of::<SignatureId>();
        let children = self
            .nodes
            .iter()
            .filter_map(|n| n.children.as_ref())
            .map(|c| c.capacity() * std::mem::size_of::<SignatureId>())
            .sum();
        (nodes, children)
    }
}
