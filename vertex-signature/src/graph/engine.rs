//! Refinement driver
//!
//! Runs passes until every vertex is finalized, the graph is shown to be
//! symmetric, or the pass budget runs out. Each pass:
//! 1. sorts all root signatures
//! 2. finalizes every root that differs from both sorted neighbours
//! 3. if nothing was finalized, expands every unresolved root by one level
//!
//! If step 3 cannot grow any tree, the remaining vertices lie in a
//! nontrivial automorphism orbit and refinement stops.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, info, instrument, warn};

use super::compare::{compare_signatures, sort_signatures};
use super::expand::{recursive_expand, resort_all};
use super::ranking::{RankEntry, Ranking};
use super::registry::{VertexId, VertexRegistry};
use super::signature::{SignatureArena, SignatureId};
use crate::adjacency::Adjacency;
use crate::config::EngineConfig;
use crate::error::{ConvergenceError, ConvergenceKind, SignatureError};

/// Signature refinement over one fixed graph.
///
/// Owns its registry and arena; engines never share state.
///
/// # Example
///
/// ```
/// use vertex_signature::{AdjacencyGraph, Engine};
///
/// // A triangle C-D-F with tails of different length: no symmetry.
/// let graph = AdjacencyGraph::from_edges([
///     ("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("C", "F"), ("D", "F"),
/// ])
/// .unwrap();
/// let mut engine = Engine::new(&graph).unwrap();
/// let ranking = engine.compute().unwrap();
///
/// assert_eq!(ranking.len(), 6);
/// assert_eq!(ranking.order(), vec!["C", "D", "F", "B", "E", "A"]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: VertexRegistry,
    arena: SignatureArena,
    /// Root signatures in their most recent sorted order.
    order: Vec<SignatureId>,
    config: EngineConfig,
    /// Passes run so far.
    passes: usize,
}

impl Engine {
    /// Build the registry and one collapsed root signature per vertex.
    pub fn new<G: Adjacency + ?Sized>(graph: &G) -> Result<Self, SignatureError> {
        Self::with_config(graph, EngineConfig::default())
    }

    /// Same as [`Engine::new`] with an explicit configuration.
    pub fn with_config<G: Adjacency + ?Sized>(
        graph: &G,
        config: EngineConfig,
    ) -> Result<Self, SignatureError> {
        let registry = VertexRegistry::initialize(graph)?;
        let arena = SignatureArena::with_roots(&registry);
        let order = arena.roots().to_vec();

        Ok(Self {
            registry,
            arena,
            order,
            config,
            passes: 0,
        })
    }

    /// Run passes until convergence.
    ///
    /// On success every vertex is ranked. Otherwise the error says whether
    /// refinement hit a symmetric fixed point or the pass budget, and carries
    /// the vertices that were finalized along the way.
    ///
    /// Calling `compute` again is cheap and returns the same outcome.
    #[instrument(skip_all, fields(vertices = self.registry.len()))]
    pub fn compute(&mut self) -> Result<Ranking, ConvergenceError> {
        let budget = self.config.pass_budget(self.registry.len());

        while !self.registry.all_finalized() {
            if self.passes >= budget {
                let error = self.convergence_error(ConvergenceKind::NonConvergence);
                warn!(
                    passes = self.passes,
                    unresolved = error.unresolved.len(),
                    "Pass budget exhausted"
                );
                return Err(error);
            }

            self.passes += 1;
            let pass = self.passes;

            if self.process_pass(pass) || self.registry.all_finalized() {
                continue;
            }

            if !self.expand_ambiguous(pass) {
                let error = self.convergence_error(ConvergenceKind::SymmetricStable);
                warn!(
                    passes = self.passes,
                    unresolved = error.unresolved.len(),
                    "Refinement reached a symmetric fixed point"
                );
                return Err(error);
            }
        }

        self.sort_roots();
        info!(passes = self.passes, "All vertices finalized");
        Ok(self.ranking())
    }

    /// Sort the roots and finalize every unresolved root that differs from
    /// both of its sorted neighbours.
    ///
    /// Uniqueness is decided for the whole pass before any vertex is
    /// finalized, so the outcome does not depend on scan order. Vertices
    /// finalized here only take effect once the scan ends: comparisons
    /// within the same pass never see them.
    ///
    /// Returns whether anything was finalized.
    pub fn process_pass(&mut self, pass_number: usize) -> bool {
        self.sort_roots();

        let unique: Vec<(usize, VertexId)> = (0..self.order.len())
            .filter(|&position| !self.is_root_finalized(position))
            .filter(|&position| self.is_unique_at(position))
            .map(|position| (position, self.arena.node(self.order[position]).vertex))
            .collect();

        for (position, vertex) in &unique {
            self.registry.finalize(*vertex, *position, pass_number);
        }

        debug!(
            pass = pass_number,
            finalized = unique.len(),
            remaining = self.unresolved_count(),
            "Pass complete"
        );
        !unique.is_empty()
    }

    /// Grow every unresolved root signature by one level.
    ///
    /// Returns whether any tree grew.
    pub fn expand_ambiguous(&mut self, pass_number: usize) -> bool {
        let mut grew = false;
        for root in self.order.clone() {
            let vertex = self.arena.node(root).vertex;
            if self.registry.vertex(vertex).is_finalized() {
                continue;
            }
            if recursive_expand(&self.registry, &mut self.arena, root, pass_number) {
                grew = true;
            }
        }

        if grew {
            self.sort_roots();
        }
        debug!(pass = pass_number, grew, "Expanded ambiguous signatures");
        grew
    }

    fn sort_roots(&mut self) {
        resort_all(&self.registry, &mut self.arena);
        sort_signatures(&self.registry, &self.arena, &mut self.order);
    }

    fn is_root_finalized(&self, position: usize) -> bool {
        let vertex = self.arena.node(self.order[position]).vertex;
        self.registry.vertex(vertex).is_finalized()
    }

    fn is_unique_at(&self, position: usize) -> bool {
        let differs = |other: usize| {
            compare_signatures(
                &self.registry,
                &self.arena,
                self.order[position],
                self.order[other],
            ) != Ordering::Equal
        };

        let from_prev = position == 0 || differs(position - 1);
        let from_next = position + 1 == self.order.len() || differs(position + 1);
        from_prev && from_next
    }

    /// Current ranking of every finalized vertex.
    ///
    /// `rank` is the dense position among finalized vertices in the current
    /// sorted order, so it is gap free even when earlier passes assigned
    /// `final_index` values from a differently shaped order.
    pub fn ranking(&self) -> Ranking {
        let mut order = self.order.clone();
        sort_signatures(&self.registry, &self.arena, &mut order);

        let mut ranking = Ranking::new();
        let finalized = order
            .iter()
            .map(|root| self.registry.vertex(self.arena.node(*root).vertex))
            .filter_map(|vertex| match (vertex.final_index, vertex.resolution_step) {
                (Some(final_index), Some(resolution_step)) => {
                    Some((vertex.label.clone(), final_index, resolution_step))
                }
                _ => None,
            });

        for (rank, (label, final_index, resolution_step)) in finalized.enumerate() {
            ranking.insert(
                label,
                RankEntry {
                    rank,
                    final_index,
                    resolution_step,
                },
            );
        }
        ranking
    }

    fn convergence_error(&self, kind: ConvergenceKind) -> ConvergenceError {
        ConvergenceError {
            kind,
            passes: self.passes,
            partial: self.ranking(),
            unresolved: self.unresolved(),
        }
    }

    /// Labels of vertices that are not finalized.
    pub fn unresolved(&self) -> BTreeSet<String> {
        self.registry
            .iter()
            .filter(|(_, vertex)| !vertex.is_finalized())
            .map(|(_, vertex)| vertex.label.clone())
            .collect()
    }

    fn unresolved_count(&self) -> usize {
        self.registry
            .iter()
            .filter(|(_, vertex)| !vertex.is_finalized())
            .count()
    }

    /// Whether `label` has been finalized. Unknown labels are not.
    pub fn is_finalized(&self, label: &str) -> bool {
        self.registry
            .get(label)
            .is_ok_and(|vertex| vertex.is_finalized())
    }

    /// Dense rank of `label`, if finalized.
    pub fn rank(&self, label: &str) -> Option<usize> {
        if !self.is_finalized(label) {
            return None;
        }
        self.ranking().rank(label)
    }

    /// Sorted position assigned to `label` when it was finalized.
    pub fn final_index(&self, label: &str) -> Option<usize> {
        self.registry.get(label).ok()?.final_index
    }

    /// Pass that finalized `label`.
    pub fn resolution_step(&self, label: &str) -> Option<usize> {
        self.registry.get(label).ok()?.resolution_step
    }

    /// Passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &VertexRegistry {
        &self.registry
    }

    pub fn arena(&self) -> &SignatureArena {
        &self.arena
    }

    /// Root signatures in their most recent sorted order.
    pub fn sorted_roots(&self) -> &[SignatureId] {
        &self.order
    }

    /// Root signature of `label`.
    pub fn root(&self, label: &str) -> Result<SignatureId, SignatureError> {
        self.registry.id(label).map(|id| self.arena.root_of(id))
    }
}
