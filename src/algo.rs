pub mod components;
pub mod condensation;
pub mod dag_paths;
pub mod toposort;

pub use components::StronglyConnectedComponents;
pub use condensation::{Condensation, MultiEdgePolicy};
pub use dag_paths::{CriticalPath, DagPaths, Objective};
pub use toposort::{is_dag, TopoSort};
