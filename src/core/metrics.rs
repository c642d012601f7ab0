use std::{
    fmt,
    time::{Duration, Instant},
};

/// Operation counters and elapsed time of a single algorithm run.
///
/// The timer brackets only the main loop of the algorithm. Preparation such as
/// in-degree counting or a topological pre-pass happens before it is started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub dfs_visits: u64,
    pub edges_traversed: u64,
    pub relaxations: u64,
    pub push_ops: u64,
    pub pop_ops: u64,
    elapsed: Duration,
    started: Option<Instant>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stops the timer. Has no effect when the timer was not started.
    pub fn stop_timer(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub(crate) fn visit(&mut self) {
        self.dfs_visits += 1;
    }

    pub(crate) fn traverse(&mut self) {
        self.edges_traversed += 1;
    }

    pub(crate) fn relax(&mut self) {
        self.relaxations += 1;
    }

    pub(crate) fn push(&mut self) {
        self.push_ops += 1;
    }

    pub(crate) fn pop(&mut self) {
        self.pop_ops += 1;
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metrics: DFS visits={}, Edges={}, Relaxations={}, Push={}, Pop={}, Time={:.3}ms",
            self.dfs_visits,
            self.edges_traversed,
            self.relaxations,
            self.push_ops,
            self.pop_ops,
            self.elapsed_millis()
        )
    }
}
