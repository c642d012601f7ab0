use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::core::{Graph, Metrics};

use super::Error;

#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn kahn<W>(graph: &Graph<W>) -> Result<(Vec<usize>, Metrics), Error> {
    let n = graph.vertex_count();
    let mut metrics = Metrics::new();

    let mut in_deg = vec![0usize; n];
    for edge in graph.edges() {
        in_deg[edge.to] += 1;
    }

    // Must be FIFO and seeded in ascending order, the resulting order is
    // expected to be deterministic.
    let mut queue = VecDeque::new();
    for v in graph.vertices() {
        if in_deg[v] == 0 {
            queue.push_back(v);
            metrics.push();
        }
    }

    let mut order = Vec::with_capacity(n);

    metrics.start_timer();

    while let Some(u) = queue.pop_front() {
        metrics.pop();
        order.push(u);

        for edge in graph.adjacent(u) {
            metrics.traverse();

            let deg = &mut in_deg[edge.to];
            *deg -= 1;

            if *deg == 0 {
                queue.push_back(edge.to);
                metrics.push();
            }
        }
    }

    metrics.stop_timer();

    if order.len() != n {
        debug!(sorted = order.len(), "cycle detected");

        return Err(Error::Cycle {
            sorted: order.len(),
            remaining: n - order.len(),
        });
    }

    debug!(
        push_ops = metrics.push_ops,
        pop_ops = metrics.pop_ops,
        edges_traversed = metrics.edges_traversed,
        "kahn finished"
    );

    Ok((order, metrics))
}
