use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::core::{Graph, Metrics};

struct Frame {
    vertex: usize,
    next_edge: usize,
}

struct State {
    discovery: Vec<Option<usize>>,
    low_link: Vec<usize>,
    on_stack: FixedBitSet,
    active: Vec<usize>,
    counter: usize,
    components: Vec<Vec<usize>>,
    metrics: Metrics,
}

impl State {
    fn new(vertex_count: usize) -> Self {
        Self {
            discovery: vec![None; vertex_count],
            low_link: vec![0; vertex_count],
            on_stack: FixedBitSet::with_capacity(vertex_count),
            active: Vec::new(),
            counter: 0,
            components: Vec::new(),
            metrics: Metrics::new(),
        }
    }

    fn enter(&mut self, vertex: usize, frames: &mut Vec<Frame>) {
        self.metrics.visit();

        self.discovery[vertex] = Some(self.counter);
        self.low_link[vertex] = self.counter;
        self.counter += 1;

        self.active.push(vertex);
        self.on_stack.insert(vertex);

        frames.push(Frame {
            vertex,
            next_edge: 0,
        });
    }

    fn close(&mut self, vertex: usize) {
        if self.discovery[vertex] != Some(self.low_link[vertex]) {
            return;
        }

        // The vertex is a root, everything above it on the stack belongs to
        // its component.
        let mut component = Vec::new();

        while let Some(member) = self.active.pop() {
            self.on_stack.set(member, false);
            component.push(member);

            if member == vertex {
                break;
            }
        }

        self.components.push(component);
    }
}

#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn tarjan<W>(graph: &Graph<W>) -> (Vec<Vec<usize>>, Metrics) {
    let mut state = State::new(graph.vertex_count());
    let mut frames = Vec::new();

    state.metrics.start_timer();

    for root in graph.vertices() {
        if state.discovery[root].is_some() {
            continue;
        }

        state.enter(root, &mut frames);

        while let Some(frame) = frames.last_mut() {
            let vertex = frame.vertex;

            if let Some(edge) = graph.adjacent(vertex).get(frame.next_edge) {
                frame.next_edge += 1;
                state.metrics.traverse();

                match state.discovery[edge.to] {
                    None => state.enter(edge.to, &mut frames),
                    Some(discovery) if state.on_stack.contains(edge.to) => {
                        state.low_link[vertex] = state.low_link[vertex].min(discovery);
                    }
                    // Already assigned to a finished component.
                    Some(_) => {}
                }
            } else {
                frames.pop();
                state.close(vertex);

                if let Some(parent) = frames.last() {
                    let low_link = state.low_link[vertex];
                    let parent_low_link = &mut state.low_link[parent.vertex];
                    *parent_low_link = (*parent_low_link).min(low_link);
                }
            }
        }
    }

    state.metrics.stop_timer();

    debug!(
        components = state.components.len(),
        dfs_visits = state.metrics.dfs_visits,
        edges_traversed = state.metrics.edges_traversed,
        "tarjan finished"
    );

    (state.components, state.metrics)
}
