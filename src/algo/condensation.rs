//! Collapse every [strongly connected component] of a graph into a single
//! vertex, producing the [condensation] of the graph.
//!
//! The condensation has one vertex per component (numbered like the
//! components) and at most one edge for every ordered pair of distinct
//! components connected by an edge in the original graph. It is always
//! acyclic.
//!
//! When several original edges connect the same pair of components, their
//! weights are merged according to [`MultiEdgePolicy`]. By default the weight
//! of the first such edge encountered is kept; edges are scanned by source
//! vertex in ascending order and then in adjacency order.
//!
//! [strongly connected component]:
//!     https://en.wikipedia.org/wiki/Strongly_connected_component
//! [condensation]:
//!     https://en.wikipedia.org/wiki/Strongly_connected_component#Definitions
//!
//! # Examples
//!
//! ```
//! use condense::{
//!     algo::{Condensation, StronglyConnectedComponents, TopoSort},
//!     core::Graph,
//! };
//!
//! let mut graph = Graph::new_directed(4);
//! graph.extend_with_edges([(0, 1, 2), (1, 0, 2), (1, 2, 7), (0, 2, 3), (2, 3, 1)])?;
//!
//! let components = StronglyConnectedComponents::on(&graph).run();
//! let condensation = Condensation::on(&graph, &components).run()?;
//!
//! assert_eq!(condensation.len(), 3);
//! // Edges 1 -> 2 and 0 -> 2 collapse into one.
//! assert_eq!(condensation.graph().edge_count(), 2);
//! assert!(condensation.is_dag());
//! assert!(TopoSort::on(condensation.graph()).run().is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{cell::OnceCell, fmt};

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::core::{Graph, GraphError};

mod builder;

pub use builder::CondensationBuilder;

/// Condensation of a graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone)]
pub struct Condensation<W = i64> {
    graph: Graph<W>,
    members: Vec<Vec<usize>>,
    weights: OnceCell<Vec<usize>>,
}

impl<W> Condensation<W> {
    /// The condensation graph, with component ids as vertices.
    pub fn graph(&self) -> &Graph<W> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<W> {
        self.graph
    }

    /// Returns the number of components, which is the number of vertices of
    /// the condensation graph.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Original vertices collapsed into the given condensation vertex.
    pub fn members(&self, id: usize) -> Option<&[usize]> {
        self.members.get(id).map(Vec::as_slice)
    }

    /// Number of original vertices collapsed into the given condensation
    /// vertex.
    pub fn component_weight(&self, id: usize) -> Option<usize> {
        self.weights
            .get_or_init(|| self.members.iter().map(Vec::len).collect())
            .get(id)
            .copied()
    }

    /// Checks that the condensation graph is acyclic.
    ///
    /// This always holds for a condensation built from a correct component
    /// partition. A `false` result indicates an internal inconsistency.
    pub fn is_dag(&self) -> bool {
        let n = self.graph.vertex_count();
        let mut visited = FixedBitSet::with_capacity(n);
        let mut on_path = FixedBitSet::with_capacity(n);
        let mut frames: Vec<(usize, usize)> = Vec::new();

        for root in self.graph.vertices() {
            if visited.put(root) {
                continue;
            }

            on_path.insert(root);
            frames.push((root, 0));

            while let Some((vertex, next_edge)) = frames.last_mut() {
                let vertex = *vertex;

                if let Some(edge) = self.graph.adjacent(vertex).get(*next_edge) {
                    *next_edge += 1;

                    if on_path.contains(edge.to) {
                        return false;
                    }

                    if !visited.put(edge.to) {
                        on_path.insert(edge.to);
                        frames.push((edge.to, 0));
                    }
                } else {
                    on_path.set(vertex, false);
                    frames.pop();
                }
            }
        }

        true
    }
}

impl<W: fmt::Display> fmt::Display for Condensation<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Condensation: components={}, edges={}, dag={}",
            self.len(),
            self.graph.edge_count(),
            self.is_dag()
        )?;

        for (id, members) in self.members.iter().enumerate() {
            let members: Vec<String> = members.iter().map(usize::to_string).collect();
            writeln!(f, "C{id} = {{{}}}", members.join(", "))?;
        }

        for edge in self.graph.edges() {
            writeln!(f, "C{} -> C{}(w={})", edge.from, edge.to, edge.weight)?;
        }

        Ok(())
    }
}

/// How to merge weights of original edges that connect the same pair of
/// components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum MultiEdgePolicy {
    /// Keep the weight of the first edge encountered.
    #[default]
    First,
    /// Keep the smallest weight.
    Min,
    /// Keep the largest weight.
    Max,
}

impl MultiEdgePolicy {
    fn merge<W: Ord>(self, current: W, next: W) -> W {
        match self {
            MultiEdgePolicy::First => current,
            MultiEdgePolicy::Min => current.min(next),
            MultiEdgePolicy::Max => current.max(next),
        }
    }
}

/// The error encountered when building a [`Condensation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The components were computed on a graph with a different number of
    /// vertices.
    #[error("components cover {components} vertices, but graph has {graph}")]
    VertexCountMismatch { graph: usize, components: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
