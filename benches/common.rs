#![allow(dead_code)]

use fastrand::Rng;
use petgraph::graph::NodeIndex;

pub const RANDOM_SEED: u64 = 0x5cc0_4d3a_91e2_7b10;

/// Samples each edge of a complete graph with probability `p`, skipping over
/// the rejected ones in geometrically distributed jumps.
pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_count: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_count,
            p,
        }
    }

    /// Returns pairs `(v, w)` with `w < v`.
    pub fn next_pair(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        if self.v >= self.n {
            return None;
        }

        let skip = ((1.0 - rng.f32()).log10() / (1.0 - self.p).log10()).floor() as usize;
        self.w = self.w.wrapping_add(1) + skip;

        while self.w >= self.v && self.v < self.n {
            self.w -= self.v;
            self.v += 1;
        }

        (self.v < self.n).then_some((self.v, self.w))
    }
}

/// Edges of a random directed graph, oriented randomly when `acyclic` is
/// false and from lower to higher vertex otherwise.
pub fn random_edges(
    vertex_count: usize,
    density: f32,
    acyclic: bool,
    rng: &mut Rng,
) -> Vec<(usize, usize, i64)> {
    let mut pairs = RandomEdges::new(vertex_count, density);
    let mut edges = Vec::new();

    while let Some((v, w)) = pairs.next_pair(rng) {
        let (u, v) = if acyclic || rng.bool() { (w, v) } else { (v, w) };
        edges.push((u, v, rng.i64(1..100)));
    }

    edges
}

pub fn condense_random(
    vertex_count: usize,
    density: f32,
    acyclic: bool,
    rng: &mut Rng,
) -> condense::core::Graph<i64> {
    let mut graph = condense::core::Graph::new_directed(vertex_count);
    graph
        .extend_with_edges(random_edges(vertex_count, density, acyclic, rng))
        .unwrap();
    graph
}

pub fn petgraph_random(
    vertex_count: usize,
    density: f32,
    acyclic: bool,
    rng: &mut Rng,
) -> petgraph::Graph<(), i64, petgraph::Directed> {
    let mut graph = petgraph::Graph::with_capacity(vertex_count, 0);

    for _ in 0..vertex_count {
        graph.add_node(());
    }

    for (u, v, w) in random_edges(vertex_count, density, acyclic, rng) {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), w);
    }

    graph
}
