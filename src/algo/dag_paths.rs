//! Find single source [shortest or longest paths] in a directed acyclic graph,
//! and the [critical path] of a schedule.
//!
//! See available parameters [here](DagPathsBuilder).
//!
//! The vertices are relaxed once each, in [topological order](TopoSort). This
//! is correct because all predecessors of a vertex precede it in the order,
//! so its distance is final before it is used. Negative weights are allowed,
//! a graph with a cycle is rejected.
//!
//! [shortest or longest paths]:
//!     https://en.wikipedia.org/wiki/Longest_path_problem#Acyclic_graphs
//! [critical path]: https://en.wikipedia.org/wiki/Critical_path_method
//!
//! # Examples
//!
//! ```
//! use condense::{algo::{CriticalPath, DagPaths}, core::Graph};
//!
//! let mut graph = Graph::new_directed(3);
//! graph.extend_with_edges([(0, 1, 5), (1, 2, 3), (0, 2, 10)])?;
//!
//! let shortest = DagPaths::on(&graph).shortest().run(0)?;
//! assert_eq!(shortest.dist(2), Some(8));
//! assert_eq!(shortest.path(2), Some(vec![0, 1, 2]));
//!
//! let longest = DagPaths::on(&graph).longest().run(0)?;
//! assert_eq!(longest.dist(2), Some(10));
//! assert_eq!(longest.path(2), Some(vec![0, 2]));
//!
//! let critical = CriticalPath::on(&graph).run(0)?;
//! assert_eq!(critical.length(), 10);
//! assert_eq!(critical.path(), &[0, 2]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [TopoSort]: crate::algo::TopoSort

use thiserror::Error;

use crate::{
    algo::toposort,
    core::{Distance, Metrics},
};

mod builder;
mod relax;

pub use builder::{CriticalPathBuilder, DagPathsBuilder};

/// Distances and paths from a single source vertex.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone)]
pub struct DagPaths<W = i64> {
    source: usize,
    objective: Objective,
    dist: Vec<Distance<W>>,
    pred: Vec<Option<usize>>,
    metrics: Metrics,
}

impl<W: Copy> DagPaths<W> {
    /// Source vertex where the search was started.
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Returns the distance from the source to the given vertex, or `None` if
    /// the vertex is not reachable.
    pub fn dist(&self, to: usize) -> Option<W> {
        self.dist.get(to).and_then(Distance::value)
    }

    pub fn distances(&self) -> &[Distance<W>] {
        &self.dist
    }

    /// Returns the vertex preceding the given one on its path from the source.
    pub fn predecessor(&self, of: usize) -> Option<usize> {
        self.pred.get(of).copied().flatten()
    }

    /// Returns an iterator over the vertices preceding the given vertex on its
    /// path from the source, nearest first. Ends with the source vertex unless
    /// the vertex is the source itself or unreachable.
    pub fn reconstruct(&self, to: usize) -> PathReconstruction<'_> {
        PathReconstruction {
            curr: to,
            pred: &self.pred,
        }
    }

    /// Returns the path from the source to the given vertex, both included,
    /// or `None` if the vertex is not reachable.
    pub fn path(&self, to: usize) -> Option<Vec<usize>> {
        self.dist(to)?;

        let mut path = vec![to];
        path.extend(self.reconstruct(to));
        path.reverse();

        Some(path)
    }

    /// Iterator over reachable vertices and their distances, in ascending
    /// order of vertices.
    pub fn reached(&self) -> impl Iterator<Item = (usize, W)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter_map(|(v, dist)| dist.value().map(|dist| (v, dist)))
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// The longest path from a source vertex, together with the longest paths to
/// all other vertices.
#[derive(Debug, Clone)]
pub struct CriticalPath<W = i64> {
    path: Vec<usize>,
    length: W,
    longest: DagPaths<W>,
}

impl<W: Copy> CriticalPath<W> {
    /// Vertices of the critical path, starting with the source. Empty when no
    /// vertex other than the source is reachable.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Sum of the edge weights along the critical path.
    pub fn length(&self) -> W {
        self.length
    }

    /// The last vertex of the critical path.
    pub fn end(&self) -> Option<usize> {
        self.path.last().copied()
    }

    pub fn longest_paths(&self) -> &DagPaths<W> {
        &self.longest
    }

    pub fn metrics(&self) -> &Metrics {
        self.longest.metrics()
    }

    pub fn into_path(self) -> Vec<usize> {
        self.path
    }
}

/// Iterator over the vertices on the path from a vertex to the source vertex.
///
/// Returned by [`DagPaths::reconstruct`].
pub struct PathReconstruction<'a> {
    curr: usize,
    pred: &'a [Option<usize>],
}

impl<'a> Iterator for PathReconstruction<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.curr = self.pred.get(self.curr).copied().flatten()?;
        Some(self.curr)
    }
}

/// Optimization direction for [`DagPaths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Objective {
    /// Minimize the sum of weights.
    #[default]
    Shortest,
    /// Maximize the sum of weights.
    ///
    /// # Use cases
    ///
    /// * Finding the critical path of a schedule, the lower bound on the time
    ///   to complete all dependent work.
    Longest,
}

impl Objective {
    /// Returns `true` if `candidate` should replace the `current` distance.
    /// Only strict improvements replace a reached distance.
    pub fn improves<W: Ord>(self, candidate: W, current: Distance<W>) -> bool {
        match current {
            Distance::Unreached => true,
            Distance::Reached(current) => match self {
                Objective::Shortest => candidate < current,
                Objective::Longest => candidate > current,
            },
        }
    }
}

/// The error encountered during a [`DagPaths`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The graph is not acyclic.
    #[error("graph is not a DAG")]
    NotDag(#[source] toposort::Error),

    /// The source vertex does not exist.
    #[error("source vertex {vertex} out of range for graph with {vertex_count} vertices")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },

    /// A distance does not fit into the weight type.
    #[error("distance overflow when relaxing edge {from} -> {to}")]
    Overflow { from: usize, to: usize },
}
