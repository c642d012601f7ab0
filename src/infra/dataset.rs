//! Serializable records describing an input graph and the measured results of
//! analysing it.
//!
//! # Examples
//!
//! ```
//! use condense::infra::dataset::GraphDescription;
//!
//! let description = GraphDescription::from_json(
//!     r#"{ "directed": true, "n": 3, "edges": [{ "u": 0, "v": 1, "w": 4 }, { "u": 1, "v": 2 }] }"#,
//! )?;
//!
//! assert_eq!(description.source, 0);
//! assert_eq!(description.weight_model, "edge");
//!
//! let graph = description.to_graph()?;
//! assert_eq!(graph.adjacent(1)[0].weight, 1);
//! # Ok::<(), condense::infra::dataset::DatasetError>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Graph, GraphError};

/// A graph as stored in a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct GraphDescription {
    #[serde(default)]
    pub directed: bool,
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub source: usize,
    #[serde(default = "default_weight_model")]
    pub weight_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct EdgeRecord {
    pub u: usize,
    pub v: usize,
    #[serde(default = "default_weight")]
    pub w: i64,
}

fn default_weight_model() -> String {
    String::from("edge")
}

fn default_weight() -> i64 {
    1
}

impl GraphDescription {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the graph, adding the edges in the order of the records.
    pub fn to_graph(&self) -> Result<Graph<i64>, DatasetError> {
        let mut graph = Graph::new(self.n, self.directed);
        graph.extend_with_edges(self.edges.iter().map(|edge| (edge.u, edge.v, edge.w)))?;
        Ok(graph)
    }

    /// Describes an existing graph. Each undirected edge is written once.
    pub fn from_graph(graph: &Graph<i64>, source: usize) -> Self {
        let mut edges = Vec::with_capacity(graph.edge_count());

        for u in graph.vertices() {
            // An undirected self-loop is stored twice in a row.
            let mut loop_pending = false;

            for edge in graph.adjacent(u) {
                let keep = if graph.is_directed() || edge.from < edge.to {
                    true
                } else if edge.from == edge.to {
                    loop_pending = !loop_pending;
                    loop_pending
                } else {
                    false
                };

                if keep {
                    edges.push(EdgeRecord {
                        u: edge.from,
                        v: edge.to,
                        w: edge.weight,
                    });
                }
            }
        }

        Self {
            directed: graph.is_directed(),
            n: graph.vertex_count(),
            edges,
            source,
            weight_model: default_weight_model(),
        }
    }
}

/// Measured results of analysing one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub dataset: String,
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
    pub scc_time_ns: u64,
    pub topo_time_ns: u64,
    pub shortest_time_ns: u64,
    pub longest_time_ns: u64,
    pub dfs_visits: u64,
    pub edges_traversed: u64,
    pub push_ops: u64,
    pub pop_ops: u64,
    pub relaxations: u64,
    pub critical_path_length: i64,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
