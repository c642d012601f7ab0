use std::{fmt, ops::Range};

use super::{error::GraphError, weight::Weight};

/// A weighted edge as stored in an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<W> {
    pub from: usize,
    pub to: usize,
    pub weight: W,
}

/// Adjacency-list graph over vertices `0..n`.
///
/// The order in which edges are added is preserved and every algorithm in
/// this crate iterates neighbors in that order. Undirected graphs store each
/// edge twice, once in the adjacency of each endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<W = i64> {
    directed: bool,
    adj: Vec<Vec<Edge<W>>>,
}

impl<W> Graph<W> {
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        let mut adj = Vec::with_capacity(vertex_count);
        adj.resize_with(vertex_count, Vec::new);
        Self { directed, adj }
    }

    pub fn new_directed(vertex_count: usize) -> Self {
        Self::new(vertex_count, true)
    }

    pub fn new_undirected(vertex_count: usize) -> Self {
        Self::new(vertex_count, false)
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertices(&self) -> Range<usize> {
        0..self.adj.len()
    }

    /// Number of stored edges. An undirected edge counts twice.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// Outgoing edges of `u` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `u` is not a vertex of the graph.
    pub fn adjacent(&self, u: usize) -> &[Edge<W>] {
        &self.adj[u]
    }

    /// All stored edges, grouped by source vertex in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.adj.iter().flatten()
    }
}

impl<W: Copy> Graph<W> {
    pub fn add_edge(&mut self, u: usize, v: usize, weight: W) -> Result<(), GraphError> {
        let n = self.vertex_count();
        GraphError::check(u, n)?;
        GraphError::check(v, n)?;

        self.adj[u].push(Edge {
            from: u,
            to: v,
            weight,
        });

        if !self.directed {
            self.adj[v].push(Edge {
                from: v,
                to: u,
                weight,
            });
        }

        Ok(())
    }

    pub fn extend_with_edges<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        for (u, v, weight) in edges {
            self.add_edge(u, v, weight)?;
        }

        Ok(())
    }

    /// Returns a directed graph with every stored edge flipped.
    ///
    /// For undirected graphs both stored copies of an edge are flipped, so the
    /// result has the same edge set viewed as directed edges.
    pub fn reverse(&self) -> Self {
        let mut rev = Self::new_directed(self.vertex_count());

        for edge in self.edges() {
            rev.adj[edge.to].push(Edge {
                from: edge.to,
                to: edge.from,
                weight: edge.weight,
            });
        }

        rev
    }
}

impl<W: Weight> Graph<W> {
    pub fn add_unit_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.add_edge(u, v, W::one())
    }
}

impl<W: fmt::Display> fmt::Display for Graph<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph: n={}, edges={}, directed={}",
            self.vertex_count(),
            self.edge_count(),
            self.directed
        )?;

        for (u, edges) in self.adj.iter().enumerate() {
            if edges.is_empty() {
                continue;
            }

            write!(f, "{u} ->")?;
            for edge in edges {
                write!(f, " {}(w={})", edge.to, edge.weight)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
