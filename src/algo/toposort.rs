//! Find a [topologically sorted] sequence of vertices of a [directed acyclic
//! graph] (DAG) using [Kahn's
//! algorithm](https://en.wikipedia.org/wiki/Topological_sorting#Kahn's_algorithm).
//!
//! Vertices with in-degree zero are seeded into a FIFO queue in ascending
//! order and every vertex is enqueued the moment its in-degree drops to zero.
//! The resulting order is therefore deterministic for a fixed graph.
//!
//! [topologically sorted]: https://en.wikipedia.org/wiki/Topological_sorting
//! [directed acyclic graph]:
//!     https://en.wikipedia.org/wiki/Directed_acyclic_graph
//!
//! # Examples
//!
//! ```
//! use condense::{algo::TopoSort, core::Graph};
//!
//! // Edge direction in "must be done before" relation.
//! let mut plan = Graph::new_directed(4);
//! plan.extend_with_edges([(0, 1, 2), (0, 2, 1), (1, 3, 4), (2, 3, 1)])?;
//!
//! let order = TopoSort::on(&plan).run()?;
//! assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

use crate::core::{Graph, Metrics};

use super::components::StronglyConnectedComponents;

mod builder;
mod kahn;

pub use builder::TopoSortBuilder;

/// Topologically sorted sequence of vertices of a directed acyclic graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoSort {
    order: Vec<usize>,
    metrics: Metrics,
}

impl TopoSort {
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.order.iter()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }

    /// Expands an order of condensation vertices into an order of the
    /// original vertices.
    ///
    /// Each component id is replaced by the members of that component in the
    /// order they are stored in `components`. The order of vertices inside a
    /// component carries no meaning, since they depend on each other
    /// cyclically. Ids that do not name a component are skipped.
    pub fn vertex_order(&self, components: &StronglyConnectedComponents) -> Vec<usize> {
        self.order
            .iter()
            .filter_map(|&id| components.get(id))
            .flatten()
            .copied()
            .collect()
    }
}

impl<'a> IntoIterator for &'a TopoSort {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The error encountered during a [`TopoSort`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The graph contains a cycle.
    ///
    /// Graphs with cycles don't have a topological order. No partial order is
    /// returned; `sorted` vertices could be ordered before the cycle blocked
    /// the remaining ones.
    #[error("graph contains cycle ({remaining} vertices could not be sorted)")]
    Cycle { sorted: usize, remaining: usize },
}

/// Returns `true` if the graph has a topological order.
pub fn is_dag<W>(graph: &Graph<W>) -> bool {
    TopoSort::on(graph).run().is_ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::infra::proptest::graph_directed;

    use super::*;

    fn assert_valid(toposort: Result<TopoSort, Error>, graph: &Graph<i64>) {
        let mut oracle = petgraph::Graph::<(), ()>::new();
        let nodes = graph
            .vertices()
            .map(|_| oracle.add_node(()))
            .collect::<Vec<_>>();
        for edge in graph.edges() {
            oracle.add_edge(nodes[edge.from], nodes[edge.to], ());
        }
        let cycle = petgraph::algo::is_cyclic_directed(&oracle);

        match (toposort, cycle) {
            (Ok(sorted), false) => {
                assert_eq!(
                    sorted.len(),
                    graph.vertex_count(),
                    "sorted sequence length is not equal to vertex count"
                );

                let map = sorted
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(k, v)| (v, k))
                    .collect::<HashMap<_, _>>();

                for edge in graph.edges() {
                    let i = map.get(&edge.from).unwrap();
                    let j = map.get(&edge.to).unwrap();

                    assert!(
                        i < j,
                        "invalid topological order for {} -> {}",
                        edge.from,
                        edge.to
                    );
                }
            }
            (Ok(_), true) => panic!("algorithm did not detect cycle"),
            (Err(error), false) => panic!("algorithm incorrectly returned error: {error:?}"),
            (Err(_), true) => {}
        }
    }

    fn create_graph(n: usize, edges: &[(usize, usize)]) -> Graph<i64> {
        let mut graph = Graph::new_directed(n);
        for &(u, v) in edges {
            graph.add_unit_edge(u, v).unwrap();
        }
        graph
    }

    fn create_basic_graph() -> Graph<i64> {
        create_graph(6, &[(5, 2), (5, 0), (4, 0), (4, 1), (2, 3), (3, 1)])
    }

    fn create_cyclic_graph() -> Graph<i64> {
        create_graph(
            6,
            &[(5, 2), (5, 0), (4, 0), (4, 1), (2, 3), (3, 1), (1, 5)],
        )
    }

    fn create_disconnected_graph() -> Graph<i64> {
        create_graph(
            10,
            &[
                (5, 2),
                (5, 0),
                (4, 0),
                (4, 1),
                (2, 3),
                (3, 1),
                (7, 6),
                (7, 8),
                (6, 9),
                (8, 9),
            ],
        )
    }

    #[test]
    fn kahn_basic() {
        let graph = create_basic_graph();
        let toposort = TopoSort::on(&graph).run();

        assert_valid(toposort, &graph);
    }

    #[test]
    fn kahn_deterministic_order() {
        let graph = create_basic_graph();
        let toposort = TopoSort::on(&graph).run().unwrap();

        assert_eq!(toposort.into_vec(), vec![4, 5, 2, 0, 3, 1]);
    }

    #[test]
    fn kahn_cycle() {
        let graph = create_cyclic_graph();
        let toposort = TopoSort::on(&graph).run();

        assert_matches!(toposort, Err(Error::Cycle { remaining, .. }) if remaining > 0);
        assert_valid(TopoSort::on(&graph).run(), &graph);
    }

    #[test]
    fn kahn_disconnected() {
        let graph = create_disconnected_graph();
        let toposort = TopoSort::on(&graph).run();

        assert_valid(toposort, &graph);
    }

    #[test]
    fn kahn_two_chains() {
        let graph = create_graph(4, &[(0, 1), (2, 3)]);
        let order = TopoSort::on(&graph).run().unwrap().into_vec();
        let pos = |v| order.iter().position(|&u| u == v).unwrap();

        assert!(pos(0) < pos(1));
        assert!(pos(2) < pos(3));
    }

    #[test]
    fn kahn_self_loop_is_cycle() {
        let graph = create_graph(2, &[(0, 0)]);

        assert_matches!(
            TopoSort::on(&graph).run(),
            Err(Error::Cycle {
                sorted: 1,
                remaining: 1
            })
        );
        assert!(!is_dag(&graph));
    }

    #[test]
    fn kahn_empty_graph() {
        let graph = create_graph(0, &[]);
        let toposort = TopoSort::on(&graph).run().unwrap();

        assert!(toposort.is_empty());
    }

    #[test]
    fn kahn_metrics() {
        let graph = create_basic_graph();
        let toposort = TopoSort::on(&graph).run().unwrap();
        let metrics = toposort.metrics();

        assert_eq!(metrics.push_ops, 6);
        assert_eq!(metrics.pop_ops, 6);
        assert_eq!(metrics.edges_traversed, 6);
    }

    #[test]
    fn is_dag_basic() {
        assert!(is_dag(&create_basic_graph()));
        assert!(!is_dag(&create_cyclic_graph()));
    }

    #[test]
    fn vertex_order_expands_components() {
        let graph = create_graph(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3)]);
        let components = StronglyConnectedComponents::on(&graph).run();

        let mut condensed = Graph::<i64>::new_directed(components.len());
        condensed
            .add_unit_edge(
                components.component_of(0).unwrap(),
                components.component_of(3).unwrap(),
            )
            .unwrap();

        let order = TopoSort::on(&condensed).run().unwrap();
        let expanded = order.vertex_order(&components);

        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded, vec![2, 1, 0, 4, 3]);
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_kahn_acyclic(graph in graph_directed(0i64..10).acyclic()) {
            let toposort = TopoSort::on(&graph).run();
            prop_assert!(toposort.is_ok());
            assert_valid(toposort, &graph);
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_kahn_any(graph in graph_directed(0i64..10)) {
            let toposort = TopoSort::on(&graph).run();
            assert_valid(toposort, &graph);
        }
    }
}
