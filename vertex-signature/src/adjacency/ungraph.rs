//! `Adjacency` for petgraph undirected graphs
//!
//! Vertices are keyed by their node index, so node weights do not need to be
//! unique. Parallel edges and self-loops are reported as-is and rejected when
//! the engine validates the provider.

use petgraph::graph::{IndexType, NodeIndex, UnGraph};

use super::Adjacency;

fn parse_index<Ix: IndexType>(vertex: &str) -> Option<NodeIndex<Ix>> {
    vertex.parse::<usize>().ok().map(NodeIndex::new)
}

impl<N, E, Ix: IndexType> Adjacency for UnGraph<N, E, Ix> {
    fn vertices(&self) -> Vec<String> {
        self.node_indices().map(|n| n.index().to_string()).collect()
    }

    fn degree(&self, vertex: &str) -> usize {
        parse_index::<Ix>(vertex)
            .filter(|n| n.index() < self.node_count())
            .map_or(0, |n| self.edges(n).count())
    }

    fn neighbors(&self, vertex: &str) -> Vec<String> {
        parse_index::<Ix>(vertex)
            .filter(|n| n.index() < self.node_count())
            .map(|n| {
                self.neighbors(n)
                    .map(|m| m.index().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}
