pub mod error;
pub mod graph;
pub mod metrics;
pub mod weight;

pub use error::GraphError;
pub use graph::{Edge, Graph};
pub use metrics::Metrics;
pub use weight::{Distance, Weight};
