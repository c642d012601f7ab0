//! The complete analysis of a graph: strongly connected components, their
//! condensation, its topological order and the shortest and critical paths
//! from a source vertex.
//!
//! # Examples
//!
//! ```
//! use condense::{core::Graph, pipeline::Pipeline};
//!
//! // Tasks 0 and 1 depend on each other and are scheduled together.
//! let mut graph = Graph::new_directed(4);
//! graph.extend_with_edges([(0, 1, 2), (1, 0, 2), (1, 2, 3), (2, 3, 4), (0, 3, 1)])?;
//!
//! let analysis = Pipeline::on(&graph).run(0)?;
//!
//! assert_eq!(analysis.components().len(), 3);
//! assert_eq!(analysis.vertex_order().len(), 4);
//! assert_eq!(analysis.critical().length(), 7);
//!
//! let report = analysis.report("tasks", &graph);
//! assert_eq!(report.components, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::{
    algo::{
        components::Algo, condensation, dag_paths, toposort, Condensation, CriticalPath,
        DagPaths, MultiEdgePolicy, StronglyConnectedComponents, TopoSort,
    },
    core::{Graph, Weight},
    infra::dataset::DatasetReport,
};

/// Configures and runs the analysis.
pub struct Pipeline<'a, W> {
    graph: &'a Graph<W>,
    algo: Algo,
    policy: MultiEdgePolicy,
}

impl<'a, W> Pipeline<'a, W> {
    pub fn on(graph: &'a Graph<W>) -> Self {
        Self {
            graph,
            algo: Algo::default(),
            policy: MultiEdgePolicy::default(),
        }
    }

    /// Algorithm for finding the strongly connected components.
    pub fn scc(self, algo: Algo) -> Self {
        Self { algo, ..self }
    }

    /// How parallel condensation edges are merged.
    pub fn multi_edge(self, policy: MultiEdgePolicy) -> Self {
        Self { policy, ..self }
    }

    #[instrument(skip(self), fields(vertices = self.graph.vertex_count(), edges = self.graph.edge_count()))]
    pub fn run(self, source: usize) -> Result<Analysis<W>, Error>
    where
        W: Weight,
    {
        let vertex_count = self.graph.vertex_count();
        if source >= vertex_count {
            return Err(Error::SourceOutOfRange {
                vertex: source,
                vertex_count,
            });
        }

        let components = StronglyConnectedComponents::on(self.graph)
            .using(self.algo)
            .run();

        let condensation = Condensation::on(self.graph, &components)
            .multi_edge(self.policy)
            .run()?;

        if !condensation.is_dag() {
            error!(
                components = components.len(),
                "condensation contains a cycle"
            );
            return Err(Error::CyclicCondensation);
        }

        let order = TopoSort::on(condensation.graph()).run()?;
        let vertex_order = order.vertex_order(&components);

        let condensed_source = components
            .component_of(source)
            .ok_or(Error::SourceOutOfRange {
                vertex: source,
                vertex_count,
            })?;

        let shortest = DagPaths::on(condensation.graph())
            .shortest()
            .run(condensed_source)?;
        let critical = CriticalPath::on(condensation.graph()).run(condensed_source)?;

        info!(
            components = components.len(),
            condensation_edges = condensation.graph().edge_count(),
            critical_path_length = %critical.length(),
            "analysis finished"
        );

        Ok(Analysis {
            components,
            condensation,
            order,
            vertex_order,
            condensed_source,
            shortest,
            critical,
        })
    }
}

/// Results of all stages of the analysis.
///
/// Path results are expressed in terms of condensation vertices, that is
/// component ids.
#[derive(Debug, Clone)]
pub struct Analysis<W = i64> {
    components: StronglyConnectedComponents,
    condensation: Condensation<W>,
    order: TopoSort,
    vertex_order: Vec<usize>,
    condensed_source: usize,
    shortest: DagPaths<W>,
    critical: CriticalPath<W>,
}

impl<W: Weight> Analysis<W> {
    pub fn components(&self) -> &StronglyConnectedComponents {
        &self.components
    }

    pub fn condensation(&self) -> &Condensation<W> {
        &self.condensation
    }

    /// Topological order of the components.
    pub fn order(&self) -> &TopoSort {
        &self.order
    }

    /// Topological order of the components expanded to the original vertices.
    pub fn vertex_order(&self) -> &[usize] {
        &self.vertex_order
    }

    /// Component containing the source vertex.
    pub fn condensed_source(&self) -> usize {
        self.condensed_source
    }

    pub fn shortest(&self) -> &DagPaths<W> {
        &self.shortest
    }

    pub fn critical(&self) -> &CriticalPath<W> {
        &self.critical
    }

    /// Summarizes the run on the given original graph.
    pub fn report(&self, dataset: &str, graph: &Graph<W>) -> DatasetReport
    where
        W: Into<i64>,
    {
        let scc = self.components.metrics();
        let topo = self.order.metrics();
        let shortest = self.shortest.metrics();
        let longest = self.critical.metrics();

        DatasetReport {
            dataset: dataset.to_owned(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            components: self.components.len(),
            scc_time_ns: scc.elapsed_nanos(),
            topo_time_ns: topo.elapsed_nanos(),
            shortest_time_ns: shortest.elapsed_nanos(),
            longest_time_ns: longest.elapsed_nanos(),
            dfs_visits: scc.dfs_visits,
            edges_traversed: scc.edges_traversed,
            push_ops: topo.push_ops,
            pop_ops: topo.pop_ops,
            relaxations: shortest.relaxations + longest.relaxations,
            critical_path_length: self.critical.length().into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("source vertex {vertex} out of range for graph with {vertex_count} vertices")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },

    /// The condensation is not acyclic, which indicates an incorrect
    /// component partition.
    #[error("condensation graph contains a cycle")]
    CyclicCondensation,

    #[error(transparent)]
    Condensation(#[from] condensation::Error),

    #[error(transparent)]
    Sort(#[from] toposort::Error),

    #[error(transparent)]
    Paths(#[from] dag_paths::Error),
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::infra::proptest::graph_directed;

    use super::*;

    fn create_graph(n: usize, edges: &[(usize, usize, i64)]) -> Graph<i64> {
        let mut graph = Graph::new_directed(n);
        graph.extend_with_edges(edges.iter().copied()).unwrap();
        graph
    }

    #[test]
    fn single_cycle() {
        let graph = create_graph(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let analysis = Pipeline::on(&graph).run(0).unwrap();

        assert_eq!(analysis.components().len(), 1);
        assert_eq!(analysis.condensation().len(), 1);
        assert_eq!(analysis.order().as_slice(), &[0]);
        assert_eq!(analysis.shortest().dist(0), Some(0));
        assert!(analysis.critical().path().is_empty());
        assert_eq!(analysis.critical().length(), 0);
    }

    #[test]
    fn weighted_dag() {
        let graph = create_graph(3, &[(0, 1, 5), (1, 2, 3), (0, 2, 10)]);
        let analysis = Pipeline::on(&graph).run(0).unwrap();
        let components = analysis.components();
        let id = |v| components.component_of(v).unwrap();

        assert_eq!(components.len(), 3);
        assert_eq!(analysis.shortest().dist(id(2)), Some(8));
        assert_eq!(analysis.shortest().path(id(2)), Some(vec![id(0), id(1), id(2)]));
        assert_eq!(analysis.critical().length(), 10);
        assert_eq!(analysis.critical().path(), &[id(0), id(2)]);
    }

    #[test]
    fn disconnected_pairs() {
        let graph = create_graph(4, &[(0, 1, 1), (2, 3, 1)]);
        let analysis = Pipeline::on(&graph).run(0).unwrap();
        let order = analysis.vertex_order();
        let position = |v| order.iter().position(|&u| u == v).unwrap();

        assert_eq!(analysis.components().len(), 4);
        assert_eq!(order.len(), 4);
        assert!(position(0) < position(1));
        assert!(position(2) < position(3));
    }

    #[test]
    fn self_loop_is_singleton() {
        let graph = create_graph(3, &[(0, 0, 1), (1, 2, 1)]);
        let analysis = Pipeline::on(&graph).run(1).unwrap();

        assert_eq!(analysis.components().len(), 3);
        assert_eq!(analysis.condensation().graph().edge_count(), 1);
        assert_eq!(analysis.critical().length(), 1);
    }

    #[test]
    fn source_out_of_range() {
        let graph = create_graph(2, &[(0, 1, 1)]);

        assert_matches!(
            Pipeline::on(&graph).run(2),
            Err(Error::SourceOutOfRange {
                vertex: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn empty_graph_has_no_source() {
        let graph = Graph::<i64>::new_directed(0);

        assert_matches!(
            Pipeline::on(&graph).run(0),
            Err(Error::SourceOutOfRange { .. })
        );
    }

    #[test]
    fn source_inside_cycle() {
        // Components: {0, 1}, {2}, {3}.
        let graph = create_graph(4, &[(0, 1, 1), (1, 0, 1), (1, 2, 4), (0, 3, 2), (2, 3, 1)]);
        let analysis = Pipeline::on(&graph).run(1).unwrap();
        let components = analysis.components();

        assert_eq!(analysis.condensed_source(), components.component_of(0).unwrap());
        assert_eq!(analysis.critical().length(), 5);
    }

    #[test]
    fn kosaraju_and_min_policy() {
        let graph = create_graph(3, &[(0, 1, 1), (1, 0, 1), (0, 2, 9), (1, 2, 2)]);
        let analysis = Pipeline::on(&graph)
            .scc(Algo::Kosaraju)
            .multi_edge(MultiEdgePolicy::Min)
            .run(0)
            .unwrap();

        assert_eq!(analysis.components().len(), 2);
        assert_eq!(analysis.critical().length(), 2);
    }

    #[test]
    fn report_aggregates_metrics() {
        let graph = create_graph(3, &[(0, 1, 5), (1, 2, 3), (0, 2, 10)]);
        let analysis = Pipeline::on(&graph).run(0).unwrap();
        let report = analysis.report("scenario", &graph);

        assert_eq!(report.dataset, "scenario");
        assert_eq!(report.vertices, 3);
        assert_eq!(report.edges, 3);
        assert_eq!(report.components, 3);
        assert_eq!(report.dfs_visits, 3);
        assert_eq!(report.edges_traversed, 3);
        assert_eq!(report.push_ops, 3);
        assert_eq!(report.pop_ops, 3);
        assert_eq!(report.relaxations, 6);
        assert_eq!(report.critical_path_length, 10);
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_pipeline_succeeds(graph in graph_directed(-10i64..10), source: usize) {
            let source = source % graph.vertex_count();
            let analysis = Pipeline::on(&graph).run(source).unwrap();

            let mut vertices = analysis.vertex_order().to_vec();
            vertices.sort_unstable();
            prop_assert_eq!(vertices, graph.vertices().collect::<Vec<_>>());
        }
    }
}
