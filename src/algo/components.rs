//! Find [strongly connected components] of a graph.
//!
//! See available parameters [here](StronglyConnectedComponentsBuilder).
//!
//! Components are numbered in the order they are discovered. With the default
//! [Tarjan's algorithm](Algo::Tarjan) this is a reverse topological order of
//! the [condensation](crate::algo::condensation). Neither numbering is
//! canonical: it depends on vertex numbering and on the order of edges in the
//! adjacency lists.
//!
//! [strongly connected components]:
//!     https://en.wikipedia.org/wiki/Strongly_connected_component
//!
//! # Examples
//!
//! ```
//! use condense::{algo::StronglyConnectedComponents, core::Graph};
//!
//! let mut graph = Graph::new_directed(5);
//! graph.extend_with_edges([(0, 1, 1), (1, 2, 1), (2, 0, 1), (2, 3, 1), (3, 4, 1), (4, 3, 1)])?;
//!
//! let components = StronglyConnectedComponents::on(&graph).run();
//!
//! assert_eq!(components.len(), 2);
//! assert_eq!(components.component_of(0), components.component_of(2));
//! assert_ne!(components.component_of(2), components.component_of(3));
//! # Ok::<(), condense::core::GraphError>(())
//! ```

use std::cell::OnceCell;

use crate::core::Metrics;

mod builder;
mod kosaraju;
mod tarjan;

pub use builder::StronglyConnectedComponentsBuilder;

/// Strongly connected components of a graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone)]
pub struct StronglyConnectedComponents {
    components: Vec<Vec<usize>>,
    vertex_count: usize,
    ids: OnceCell<Vec<usize>>,
    metrics: Metrics,
}

impl StronglyConnectedComponents {
    pub(crate) fn new(components: Vec<Vec<usize>>, vertex_count: usize, metrics: Metrics) -> Self {
        Self {
            components,
            vertex_count,
            ids: OnceCell::new(),
            metrics,
        }
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of vertices of the graph the components were computed on.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the vertices of a component in the order they were popped from
    /// the traversal stack.
    pub fn get(&self, id: usize) -> Option<&[usize]> {
        self.components.get(id).map(Vec::as_slice)
    }

    /// Returns an iterator of the components.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.components.iter(),
        }
    }

    /// Maps every vertex to the index of its component.
    ///
    /// Derived from the partition on first use and cached.
    pub fn component_ids(&self) -> &[usize] {
        self.ids.get_or_init(|| {
            let mut ids = vec![0; self.vertex_count];

            for (id, component) in self.components.iter().enumerate() {
                for &vertex in component {
                    ids[vertex] = id;
                }
            }

            ids
        })
    }

    pub fn component_of(&self, vertex: usize) -> Option<usize> {
        self.component_ids().get(vertex).copied()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn into_vec(self) -> Vec<Vec<usize>> {
        self.components
    }
}

pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Vec<usize>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [usize];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|component| component.as_slice())
    }
}

impl<'a> IntoIterator for &'a StronglyConnectedComponents {
    type Item = &'a [usize];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Algorithm for [`StronglyConnectedComponents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Algo {
    /// [Tarjan's
    /// algorithm](https://en.wikipedia.org/wiki/Tarjan%27s_strongly_connected_components_algorithm).
    ///
    /// A single depth-first pass maintaining a discovery index and a low-link
    /// value for every vertex. A vertex whose low-link equals its own
    /// discovery index is the root of a component, which is then popped from
    /// the stack of active vertices.
    ///
    /// The traversal keeps its own stack of frames, so the depth of the graph
    /// is not limited by the call stack.
    ///
    /// # Use cases
    ///
    /// * Finding groups of tasks with mutual dependencies.
    /// * Preparing a graph for [condensation](crate::algo::condensation).
    #[default]
    Tarjan,

    /// [Kosaraju's
    /// algorithm](https://en.wikipedia.org/wiki/Kosaraju%27s_algorithm).
    ///
    /// Two passes, one DFS pass on the graph collecting the sequence of closed
    /// vertices and one DFS pass on the [reversed](crate::core::Graph::reverse)
    /// graph traversing it in the reversed order of vertices collected in the
    /// first pass. Components are discovered in topological order of the
    /// condensation.
    ///
    /// # Use cases
    ///
    /// * Same as Tarjan's algorithm.
    Kosaraju,
}
