//! Strongly connected components, condensation, topological ordering and
//! critical path analysis of weighted dependency graphs.
//!
//! Every algorithm is configured by a builder started with `X::on(&graph)` and
//! finished with `run`. The [`pipeline`] chains all of them.

pub mod algo;
pub mod core;
pub mod infra;
pub mod pipeline;

pub mod prelude {
    pub use crate::{
        algo::{
            Condensation, CriticalPath, DagPaths, MultiEdgePolicy, Objective,
            StronglyConnectedComponents, TopoSort,
        },
        core::{Distance, Graph, Weight},
        pipeline::Pipeline,
    };
}
