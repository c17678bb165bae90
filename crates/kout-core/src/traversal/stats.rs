//! Request-scoped traversal diagnostics.

use serde::Serialize;
use std::time::Duration;

/// Counters collected while serving one request.
///
/// Returned with every [`TraversalResult`](super::TraversalResult); nothing
/// is aggregated across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Levels (hops) actually expanded.
    pub levels: u32,
    /// Vertices whose neighbors were requested.
    pub vertices_expanded: u64,
    /// Edges pulled from the port, as charged to the capacity budget.
    pub edges_examined: u64,
    /// Distinct vertices reached, source excluded, before truncation.
    pub vertices_reached: u64,
    /// Wall time spent in the traversal.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl TraversalStats {
    /// Creates empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one level's counters in.
    pub fn record_level(&mut self, vertices_expanded: u64, edges_examined: u64) {
        self.levels += 1;
        self.vertices_expanded += vertices_expanded;
        self.edges_examined += edges_examined;
    }
}

fn serialize_millis<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}
