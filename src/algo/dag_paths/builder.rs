use tracing::{instrument, warn};

use crate::{
    algo::toposort::TopoSort,
    core::{Graph, Weight},
};

use super::{relax::relax, CriticalPath, DagPaths, Error, Objective};

pub struct DagPathsBuilder<'a, W> {
    graph: &'a Graph<W>,
    objective: Objective,
}

impl<W> DagPaths<W> {
    pub fn on(graph: &Graph<W>) -> DagPathsBuilder<'_, W> {
        DagPathsBuilder {
            graph,
            objective: Objective::default(),
        }
    }
}

impl<'a, W> DagPathsBuilder<'a, W> {
    pub fn shortest(self) -> Self {
        self.using(Objective::Shortest)
    }

    pub fn longest(self) -> Self {
        self.using(Objective::Longest)
    }

    pub fn using(self, objective: Objective) -> Self {
        Self { objective, ..self }
    }

    #[instrument(skip(self), fields(objective = ?self.objective))]
    pub fn run(self, source: usize) -> Result<DagPaths<W>, Error>
    where
        W: Weight,
    {
        let vertex_count = self.graph.vertex_count();

        if source >= vertex_count {
            warn!(vertex_count, "source vertex out of range");
            return Err(Error::SourceOutOfRange {
                vertex: source,
                vertex_count,
            });
        }

        let order = TopoSort::on(self.graph).run().map_err(|error| {
            warn!(%error, "rejecting cyclic graph");
            Error::NotDag(error)
        })?;

        let (dist, pred, metrics) = relax(self.graph, order.as_slice(), source, self.objective)?;

        Ok(DagPaths {
            source,
            objective: self.objective,
            dist,
            pred,
            metrics,
        })
    }

    /// Runs longest paths from the source and extracts the critical path,
    /// regardless of the chosen objective.
    pub fn critical_path(self, source: usize) -> Result<CriticalPath<W>, Error>
    where
        W: Weight,
    {
        CriticalPath::on(self.graph).run(source)
    }
}

pub struct CriticalPathBuilder<'a, W> {
    graph: &'a Graph<W>,
}

impl<W> CriticalPath<W> {
    pub fn on(graph: &Graph<W>) -> CriticalPathBuilder<'_, W> {
        CriticalPathBuilder { graph }
    }
}

impl<'a, W> CriticalPathBuilder<'a, W> {
    pub fn run(self, source: usize) -> Result<CriticalPath<W>, Error>
    where
        W: Weight,
    {
        let longest = DagPaths::on(self.graph).longest().run(source)?;
        Ok(CriticalPath::from_longest(longest))
    }
}

impl<W: Weight> CriticalPath<W> {
    fn from_longest(longest: DagPaths<W>) -> Self {
        let source = longest.source();

        if longest.reached().all(|(v, _)| v == source) {
            return CriticalPath {
                path: Vec::new(),
                length: W::zero(),
                longest,
            };
        }

        // Ascending scan with strict improvement, ties go to the lowest vertex.
        let mut best: Option<(usize, W)> = None;
        for (v, dist) in longest.reached() {
            if best.map_or(true, |(_, max)| dist > max) {
                best = Some((v, dist));
            }
        }

        let (path, length) = match best {
            Some((end, length)) => (longest.path(end).unwrap_or_default(), length),
            None => (Vec::new(), W::zero()),
        };

        CriticalPath {
            path,
            length,
            longest,
        }
    }
}
