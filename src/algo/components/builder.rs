use crate::core::Graph;

use super::{kosaraju::kosaraju, tarjan::tarjan, Algo, StronglyConnectedComponents};

pub struct StronglyConnectedComponentsBuilder<'a, W> {
    graph: &'a Graph<W>,
    algo: Algo,
}

impl StronglyConnectedComponents {
    pub fn on<W>(graph: &Graph<W>) -> StronglyConnectedComponentsBuilder<'_, W> {
        StronglyConnectedComponentsBuilder {
            graph,
            algo: Algo::default(),
        }
    }
}

impl<'a, W> StronglyConnectedComponentsBuilder<'a, W> {
    /// Chooses Tarjan's algorithm.
    pub fn tarjan(self) -> Self {
        self.using(Algo::Tarjan)
    }

    /// Chooses Kosaraju's algorithm.
    pub fn kosaraju(self) -> Self {
        self.using(Algo::Kosaraju)
    }

    /// Chooses the algorithm explicitly.
    pub fn using(self, algo: Algo) -> Self {
        Self { algo, ..self }
    }

    /// Chooses the algorithm explicitly, or the default one if `None`.
    pub fn using_opt(self, algo: Option<Algo>) -> Self {
        self.using(algo.unwrap_or_default())
    }

    pub fn run(self) -> StronglyConnectedComponents
    where
        W: Copy,
    {
        let (components, metrics) = match self.algo {
            Algo::Tarjan => tarjan(self.graph),
            Algo::Kosaraju => kosaraju(self.graph),
        };

        StronglyConnectedComponents::new(components, self.graph.vertex_count(), metrics)
    }
}
