//! graph6 decoding
//!
//! graph6 packs an undirected simple graph into printable ASCII: an order
//! prefix `N(n)` followed by the upper triangle of the adjacency matrix,
//! column by column, six bits per byte, each byte offset by 63.
//!
//! Decoded vertices are labelled `A`, `B`, ... in index order.

use super::{letter_label, AdjacencyGraph};
use crate::error::SignatureError;

const HEADER: &str = ">>graph6<<";
const OFFSET: u8 = 63;
const LONG_ORDER: u8 = 126;

impl AdjacencyGraph {
    /// Decode a graph6 string.
    ///
    /// A leading `>>graph6<<` header and surrounding whitespace are accepted.
    ///
    /// # Example
    ///
    /// ```
    /// use vertex_signature::AdjacencyGraph;
    ///
    /// let triangle = AdjacencyGraph::from_graph6("Bw").unwrap();
    /// assert_eq!(triangle.vertex_count(), 3);
    /// assert_eq!(triangle.edge_count(), 3);
    /// ```
    pub fn from_graph6(input: &str) -> Result<Self, SignatureError> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix(HEADER).unwrap_or(trimmed).as_bytes();

        if let Some(bad) = body.iter().find(|b| !(OFFSET..=OFFSET + 63).contains(*b)) {
            return Err(SignatureError::graph6(format!(
                "byte {bad:#04x} outside the graph6 range"
            )));
        }

        let (order, rest) = decode_order(body)?;

        // Size the body before allocating anything for the declared order.
        let pairs = order
            .checked_mul(order.saturating_sub(1))
            .map(|product| product / 2)
            .ok_or_else(|| {
                SignatureError::graph6(format!("order {order} is too large to decode"))
            })?;
        let needed = pairs.div_ceil(6);
        if rest.len() < needed {
            return Err(SignatureError::graph6(format!(
                "expected {needed} adjacency bytes for {order} vertices, found {}",
                rest.len()
            )));
        }

        let mut graph = AdjacencyGraph::new();
        for i in 0..order {
            graph.add_vertex(letter_label(i));
        }

        let mut bit = 0usize;
        for j in 1..order {
            for i in 0..j {
                let byte = rest[bit / 6] - OFFSET;
                if byte & (1 << (5 - bit % 6)) != 0 {
                    graph.add_edge(letter_label(i), letter_label(j))?;
                }
                bit += 1;
            }
        }

        Ok(graph)
    }
}

/// Split the order prefix off a graph6 body.
fn decode_order(body: &[u8]) -> Result<(usize, &[u8]), SignatureError> {
    let sextets = |bytes: &[u8]| {
        bytes
            .iter()
            .fold(0usize, |acc, b| (acc << 6) | usize::from(b - OFFSET))
    };

    match body {
        [] => Err(SignatureError::graph6("empty input")),
        [LONG_ORDER, LONG_ORDER, rest @ ..] => {
            if rest.len() < 6 {
                return Err(SignatureError::graph6("truncated 8-byte order prefix"));
            }
            Ok((sextets(&rest[..6]), &rest[6..]))
        }
        [LONG_ORDER, rest @ ..] => {
            if rest.len() < 3 {
                return Err(SignatureError::graph6("truncated 4-byte order prefix"));
            }
            Ok((sextets(&rest[..3]), &rest[3..]))
        }
        [first, rest @ ..] => Ok((usize::from(first - OFFSET), rest)),
    }
}
