use std::{cell::OnceCell, collections::hash_map::Entry};

use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use crate::{
    algo::components::StronglyConnectedComponents,
    core::{Graph, Weight},
};

use super::{Condensation, Error, MultiEdgePolicy};

pub struct CondensationBuilder<'a, W> {
    graph: &'a Graph<W>,
    components: &'a StronglyConnectedComponents,
    policy: MultiEdgePolicy,
}

impl<W> Condensation<W> {
    pub fn on<'a>(
        graph: &'a Graph<W>,
        components: &'a StronglyConnectedComponents,
    ) -> CondensationBuilder<'a, W> {
        CondensationBuilder {
            graph,
            components,
            policy: MultiEdgePolicy::default(),
        }
    }
}

impl<'a, W> CondensationBuilder<'a, W> {
    /// Chooses how weights of parallel condensation edges are merged.
    pub fn multi_edge(self, policy: MultiEdgePolicy) -> Self {
        Self { policy, ..self }
    }

    #[instrument(skip_all, fields(components = self.components.len(), policy = ?self.policy))]
    pub fn run(self) -> Result<Condensation<W>, Error>
    where
        W: Weight,
    {
        if self.components.vertex_count() != self.graph.vertex_count() {
            return Err(Error::VertexCountMismatch {
                graph: self.graph.vertex_count(),
                components: self.components.vertex_count(),
            });
        }

        let ids = self.components.component_ids();

        // Edges in the order their component pair was first seen, with the
        // index of each pair for merging the weights of later edges.
        let mut edges: Vec<(usize, usize, W)> = Vec::new();
        let mut index = FxHashMap::default();

        for edge in self.graph.edges() {
            let from = ids[edge.from];
            let to = ids[edge.to];

            if from == to {
                continue;
            }

            match index.entry((from, to)) {
                Entry::Vacant(entry) => {
                    entry.insert(edges.len());
                    edges.push((from, to, edge.weight));
                }
                Entry::Occupied(entry) => {
                    let weight = &mut edges[*entry.get()].2;
                    *weight = self.policy.merge(*weight, edge.weight);
                }
            }
        }

        let mut graph = Graph::new_directed(self.components.len());
        graph.extend_with_edges(edges)?;

        debug!(edges = graph.edge_count(), "condensation built");

        Ok(Condensation {
            graph,
            members: self.components.iter().map(<[usize]>::to_vec).collect(),
            weights: OnceCell::new(),
        })
    }
}
