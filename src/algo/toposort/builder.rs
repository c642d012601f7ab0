use crate::core::Graph;

use super::{kahn::kahn, Error, TopoSort};

pub struct TopoSortBuilder<'a, W> {
    graph: &'a Graph<W>,
}

impl TopoSort {
    pub fn on<W>(graph: &Graph<W>) -> TopoSortBuilder<'_, W> {
        TopoSortBuilder { graph }
    }
}

impl<'a, W> TopoSortBuilder<'a, W> {
    pub fn run(self) -> Result<TopoSort, Error> {
        let (order, metrics) = kahn(self.graph)?;
        Ok(TopoSort { order, metrics })
    }
}
