//! [Proptest](https://docs.rs/proptest) strategies for generating random
//! weighted graphs.
//!
//! ```ignore
//! proptest! {
//!     #[test]
//!     fn my_property(graph in graph_directed(-10i64..10).acyclic().max_size(32)) {
//!         // ...
//!     }
//! }
//! ```

use proptest::{
    prelude::Rng,
    strategy::{NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};
use rustc_hash::FxHashSet;

use crate::core::{Graph, Weight};

pub fn graph_directed<S>(weight: S) -> GraphStrategy<S>
where
    S: Strategy,
    S::Value: Weight,
{
    GraphStrategy::with_params(weight, StrategyParams::default().directed(true))
}

pub fn graph_undirected<S>(weight: S) -> GraphStrategy<S>
where
    S: Strategy,
    S::Value: Weight,
{
    GraphStrategy::with_params(weight, StrategyParams::default().directed(false))
}

#[derive(Debug)]
pub struct GraphStrategy<S> {
    weight: S,
    params: StrategyParams,
}

impl<S> GraphStrategy<S> {
    pub fn with_params(weight: S, params: StrategyParams) -> Self {
        Self { weight, params }
    }

    pub fn max_size(self, max_size: usize) -> Self {
        Self {
            params: self.params.max_size(max_size),
            ..self
        }
    }

    pub fn acyclic(self) -> Self {
        Self {
            params: self.params.acyclic(),
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            params: self.params.allow_loops(),
            ..self
        }
    }

    pub fn multi_edge_prob(self, multi_edge_prob: f64) -> Self {
        Self {
            params: self.params.multi_edge_prob(multi_edge_prob),
            ..self
        }
    }

    pub fn density(self, density: f64) -> Self {
        Self {
            params: self.params.density(density),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    max_size: usize,
    directed: bool,
    acyclic: bool,
    allow_loops: bool,
    multi_edge_prob: f64,
    // (0, 1], scales down the randomly chosen edge probability.
    density: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 48,
            directed: true,
            acyclic: false,
            allow_loops: false,
            multi_edge_prob: 0.0,
            density: 0.5,
        }
    }
}

impl StrategyParams {
    pub fn max_size(self, max_size: usize) -> Self {
        assert!(max_size > 0, "graphs must have at least one vertex");
        Self { max_size, ..self }
    }

    pub fn directed(self, directed: bool) -> Self {
        Self { directed, ..self }
    }

    /// Only edges from lower to higher vertex are generated in directed
    /// graphs. Ignored for undirected graphs, where every edge is a cycle.
    pub fn acyclic(self) -> Self {
        Self {
            acyclic: true,
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }

    pub fn multi_edge_prob(self, multi_edge_prob: f64) -> Self {
        assert!(
            (0.0..=0.5).contains(&multi_edge_prob),
            "multi edge probability must be in [0, 0.5] range"
        );
        Self {
            multi_edge_prob,
            ..self
        }
    }

    pub fn density(self, density: f64) -> Self {
        assert!(
            density > 0.0 && density <= 1.0,
            "density must be in (0, 1] range"
        );
        Self { density, ..self }
    }
}

impl<S> Strategy for GraphStrategy<S>
where
    S: Strategy,
    S::Value: Weight,
{
    type Tree = GraphValueTree<S::Tree>;
    type Value = Graph<S::Value>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let params = self.params;

        let n = runner.rng().gen_range(1..=params.max_size);
        // Skew towards sparse graphs, dense ones are mostly a single component.
        let p = runner.rng().gen::<f64>().powi(2) * params.density;

        let mut edges = Vec::new();

        for u in 0..n {
            for v in 0..n {
                if u == v && !params.allow_loops {
                    continue;
                }

                let forward_only = params.acyclic && params.directed;
                if (forward_only || !params.directed) && u > v {
                    continue;
                }

                if forward_only && u == v {
                    continue;
                }

                if !runner.rng().gen_bool(p) {
                    continue;
                }

                edges.push((u, v, self.weight.new_tree(runner)?));

                while runner.rng().gen_bool(params.multi_edge_prob) {
                    edges.push((u, v, self.weight.new_tree(runner)?));
                }
            }
        }

        Ok(GraphValueTree {
            vertex_count: n,
            directed: params.directed,
            edges,
            removed: FxHashSet::default(),
            state: Shrink::Vertex,
            last: None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shrink {
    // Drop the highest vertex along with its edges.
    Vertex,
    // Drop a single edge.
    Edge(usize),
    // Simplify the weight of a single edge.
    Weight(usize),
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Undo {
    Vertex,
    Edge(usize),
    Weight(usize),
}

#[derive(Debug)]
pub struct GraphValueTree<T> {
    vertex_count: usize,
    directed: bool,
    edges: Vec<(usize, usize, T)>,
    removed: FxHashSet<usize>,
    state: Shrink,
    last: Option<Undo>,
}

impl<T> GraphValueTree<T> {
    fn next_edge(&self, from: usize) -> Shrink {
        (from..self.edges.len())
            .find(|&e| self.edge_exists(e))
            .map_or(Shrink::Weight(0), Shrink::Edge)
    }

    fn edge_exists(&self, e: usize) -> bool {
        let (u, v, _) = &self.edges[e];
        !self.removed.contains(&e) && *u < self.vertex_count && *v < self.vertex_count
    }
}

impl<T> ValueTree for GraphValueTree<T>
where
    T: ValueTree,
    T::Value: Weight,
{
    type Value = Graph<T::Value>;

    fn current(&self) -> Self::Value {
        let mut graph = Graph::new(self.vertex_count, self.directed);

        for (e, (u, v, weight)) in self.edges.iter().enumerate() {
            if self.edge_exists(e) {
                graph
                    .add_edge(*u, *v, weight.current())
                    .expect("endpoints of existing edges are in range");
            }
        }

        graph
    }

    fn simplify(&mut self) -> bool {
        loop {
            match self.state {
                Shrink::Vertex => {
                    if self.vertex_count > 1 {
                        self.vertex_count -= 1;
                        self.last = Some(Undo::Vertex);
                        return true;
                    }
                    self.state = self.next_edge(0);
                }
                Shrink::Edge(e) => {
                    self.removed.insert(e);
                    self.last = Some(Undo::Edge(e));
                    self.state = self.next_edge(e + 1);
                    return true;
                }
                Shrink::Weight(e) => {
                    if e >= self.edges.len() {
                        self.state = Shrink::Done;
                        continue;
                    }

                    if self.edge_exists(e) && self.edges[e].2.simplify() {
                        self.last = Some(Undo::Weight(e));
                        return true;
                    }

                    self.state = Shrink::Weight(e + 1);
                }
                Shrink::Done => return false,
            }
        }
    }

    fn complicate(&mut self) -> bool {
        match self.last.take() {
            Some(Undo::Vertex) => {
                // The failure needs this vertex, move on to the edges.
                self.vertex_count += 1;
                self.state = self.next_edge(0);
                true
            }
            Some(Undo::Edge(e)) => {
                self.removed.remove(&e);
                true
            }
            Some(Undo::Weight(e)) => {
                let complicated = self.edges[e].2.complicate();
                if complicated {
                    self.last = Some(Undo::Weight(e));
                }
                complicated
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algo::is_dag;

    use super::*;

    proptest! {
        #[test]
        fn acyclic_graphs_are_dags(graph in graph_directed(0i64..10).acyclic().max_size(16)) {
            prop_assert!(is_dag(&graph));
        }

        #[test]
        fn no_loops_by_default(graph in graph_directed(0i64..10).max_size(16)) {
            prop_assert!(graph.edges().all(|edge| edge.from != edge.to));
        }

        #[test]
        fn size_is_bounded(graph in graph_undirected(0i64..10).max_size(8)) {
            prop_assert!((1..=8).contains(&graph.vertex_count()));
            prop_assert!(!graph.is_directed());
        }
    }

    #[test]
    fn shrinking_removes_structure() {
        let mut runner = TestRunner::deterministic();
        let strategy = graph_directed(0i64..10).max_size(12).density(1.0);
        let mut tree = strategy.new_tree(&mut runner).unwrap();

        let initial = tree.current();
        while tree.simplify() {}
        let simplest = tree.current();

        assert_eq!(simplest.vertex_count(), 1);
        assert_eq!(simplest.edge_count(), 0);
        assert!(initial.vertex_count() >= simplest.vertex_count());
    }
}
