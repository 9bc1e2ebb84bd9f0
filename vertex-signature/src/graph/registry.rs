//! Vertex registry
//!
//! One record per vertex, addressed by a stable `VertexId`. Signatures hold
//! ids rather than references, so finalizing a vertex here is immediately
//! visible to every signature tree that mentions it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adjacency::Adjacency;
use crate::error::SignatureError;

/// Index of a vertex in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

/// A graph vertex and its finalization state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub label: String,
    pub degree: usize,
    /// Sorted position at the pass that finalized this vertex. Set once.
    pub final_index: Option<usize>,
    /// Pass number that finalized this vertex. Set together with `final_index`.
    pub resolution_step: Option<usize>,
    /// Neighbours in the order the adjacency provider reported them.
    pub neighbors: Vec<VertexId>,
}

impl Vertex {
    fn new(label: String, degree: usize) -> Self {
        Self {
            label,
            degree,
            final_index: None,
            resolution_step: None,
            neighbors: Vec::new(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.final_index.is_some()
    }
}

/// All vertices of one graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexRegistry {
    vertices: Vec<Vertex>,
    by_label: HashMap<String, VertexId>,
}

impl VertexRegistry {
    /// Build one vertex per label, validating the provider on the way.
    ///
    /// Labels are registered in sorted order so that construction does not
    /// depend on the provider's enumeration order.
    pub fn initialize<G: Adjacency + ?Sized>(graph: &G) -> Result<Self, SignatureError> {
        let mut labels = graph.vertices();
        labels.sort();

        let mut registry = Self::default();
        for label in labels {
            let id = VertexId(registry.vertices.len());
            if registry.by_label.insert(label.clone(), id).is_some() {
                return Err(SignatureError::DuplicateVertex(label));
            }
            let degree = graph.degree(&label);
            registry.vertices.push(Vertex::new(label, degree));
        }

        for index in 0..registry.vertices.len() {
            let label = registry.vertices[index].label.clone();
            let mut neighbors = Vec::new();
            for neighbor in graph.neighbors(&label) {
                if neighbor == label {
                    return Err(SignatureError::SelfLoop(label));
                }
                let id = registry.id(&neighbor)?;
                if neighbors.contains(&id) {
                    return Err(SignatureError::ParallelEdge(label, neighbor));
                }
                neighbors.push(id);
            }

            let vertex = &mut registry.vertices[index];
            if vertex.degree != neighbors.len() {
                return Err(SignatureError::DegreeMismatch {
                    label,
                    reported: vertex.degree,
                    enumerated: neighbors.len(),
                });
            }
            vertex.neighbors = neighbors;
        }

        for vertex in &registry.vertices {
            for neighbor in &vertex.neighbors {
                let back = &registry.vertices[neighbor.0];
                let own_id = registry.by_label[&vertex.label];
                if !back.neighbors.contains(&own_id) {
                    return Err(SignatureError::AsymmetricEdge(
                        vertex.label.clone(),
                        back.label.clone(),
                    ));
                }
            }
        }

        Ok(registry)
    }

    /// Resolve a label to its id.
    pub fn id(&self, label: &str) -> Result<VertexId, SignatureError> {
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| SignatureError::unknown_vertex(label))
    }

    /// Look up a vertex by label.
    pub fn get(&self, label: &str) -> Result<&Vertex, SignatureError> {
        self.id(label).map(|id| &self.vertices[id.0])
    }

    /// Look up a vertex by id. Ids are only minted by this registry.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// Record finalization. Has no effect on an already finalized vertex.
    pub(crate) fn finalize(&mut self, id: VertexId, final_index: usize, resolution_step: usize) {
        let vertex = &mut self.vertices[id.0];
        if vertex.is_finalized() {
            return;
        }
        vertex.final_index = Some(final_index);
        vertex.resolution_step = Some(resolution_step);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (VertexId(index), vertex))
    }

    pub fn all_finalized(&self) -> bool {
        self.vertices.iter().all(Vertex::is_finalized)
    }

    pub(crate) fn capacity_bytes(&self) -> (usize, usize) {
        let records = self.vertices.capacity() * std::mem::size_of::<Vertex>()
            + self
                .vertices
                .iter()
                .map(|v| v.label.capacity() + v.neighbors.capacity() * std::mem::size_of::<VertexId>())
                .sum::<usize>();
        let index = self.by_label.capacity()
            * (std::mem::size_of::<String>() + std::mem::size_of::<VertexId>() + 16)
            + self.by_label.keys().map(String::capacity).sum::<usize>();
        (records, index)
    }
}
