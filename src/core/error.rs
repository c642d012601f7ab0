use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GraphError {
    /// An edge endpoint does not name a vertex of the graph.
    #[error("vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },
}

impl GraphError {
    pub(crate) fn check(vertex: usize, vertex_count: usize) -> Result<(), Self> {
        if vertex < vertex_count {
            Ok(())
        } else {
            Err(Self::VertexOutOfRange {
                vertex,
                vertex_count,
            })
        }
    }
}
