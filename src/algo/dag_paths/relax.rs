use tracing::{debug, instrument, warn};

use crate::core::{Distance, Graph, Metrics, Weight};

use super::{Error, Objective};

type Relaxed<W> = (Vec<Distance<W>>, Vec<Option<usize>>, Metrics);

/// Relaxes the outgoing edges of every reached vertex once, in the given
/// topological order.
#[instrument(skip(graph, order), fields(vertices = graph.vertex_count()))]
pub fn relax<W: Weight>(
    graph: &Graph<W>,
    order: &[usize],
    source: usize,
    objective: Objective,
) -> Result<Relaxed<W>, Error> {
    let n = graph.vertex_count();
    let mut metrics = Metrics::new();

    let mut dist = vec![Distance::Unreached; n];
    let mut pred = vec![None; n];
    dist[source] = Distance::Reached(W::zero());

    metrics.start_timer();

    for &u in order {
        let Distance::Reached(du) = dist[u] else {
            continue;
        };

        for edge in graph.adjacent(u) {
            metrics.relax();

            let Some(candidate) = du.checked_add(edge.weight) else {
                warn!(from = u, to = edge.to, "distance overflow");
                return Err(Error::Overflow {
                    from: u,
                    to: edge.to,
                });
            };

            if objective.improves(candidate, dist[edge.to]) {
                dist[edge.to] = Distance::Reached(candidate);
                pred[edge.to] = Some(u);
            }
        }
    }

    metrics.stop_timer();

    debug!(relaxations = metrics.relaxations, "relaxation finished");

    Ok((dist, pred, metrics))
}
