//! Breadth-first expansion as an iterator of per-depth batches.

use super::expand::{vertex_set, FrontierExpander, VertexSet};
use super::request::TraversalRequest;
use crate::error::Result;
use crate::graph::{GraphAccessPort, VertexId};
use tracing::trace;

/// What one level of expansion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    /// Hop number, starting at 1.
    pub depth: u32,
    /// Size of the new frontier.
    pub frontier_size: usize,
    /// Distinct vertices reached so far, source excluded.
    pub reached: usize,
    /// Vertices expanded to produce this level.
    pub vertices_expanded: u64,
    /// Edges consumed to produce this level.
    pub edges_examined: u64,
}

/// Level-synchronous expansion of one request.
///
/// Each call to `next` expands the current frontier by one hop and merges it
/// into the visited set. The iterator is finite and not restartable: it ends
/// after `depth` levels, on an empty frontier, or after the first error.
pub struct Levels<'a, P: ?Sized> {
    expander: &'a FrontierExpander<'a, P>,
    request: &'a TraversalRequest,
    visited: VertexSet,
    frontier: VertexSet,
    depth: u32,
    failed: bool,
}

impl<'a, P> Levels<'a, P>
where
    P: GraphAccessPort + ?Sized,
{
    /// Starts at the request's source. The source is the first visited entry
    /// and the initial frontier.
    #[must_use]
    pub fn new(expander: &'a FrontierExpander<'a, P>, request: &'a TraversalRequest) -> Self {
        let mut visited = vertex_set();
        visited.insert(request.source().clone());
        let frontier = visited.clone();
        Self {
            expander,
            request,
            visited,
            frontier,
            depth: 0,
            failed: false,
        }
    }

    /// Depth of the last expanded level.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Distinct vertices reached, source excluded.
    #[must_use]
    pub fn reached(&self) -> usize {
        self.visited.len() - 1
    }

    /// Returns true once the requested depth has been expanded.
    #[must_use]
    pub fn reached_max_depth(&self) -> bool {
        self.depth >= self.request.depth()
    }

    /// Consumes the iterator, returning reached vertices in discovery order.
    #[must_use]
    pub fn into_reached(self) -> Vec<VertexId> {
        self.visited.into_iter().skip(1).collect()
    }

    /// Consumes the iterator, returning the last frontier.
    #[must_use]
    pub fn into_frontier(self) -> Vec<VertexId> {
        self.frontier.into_iter().collect()
    }
}

impl<P> Iterator for Levels<'_, P>
where
    P: GraphAccessPort + ?Sized,
{
    type Item = Result<LevelSummary>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reached_max_depth() || self.frontier.is_empty() {
            return None;
        }
        let depth = self.depth + 1;
        let expansion = self.request.steps().require_step(depth).and_then(|step| {
            self.expander.check_cancelled(depth)?;
            self.expander.expand(
                &self.frontier,
                step,
                &self.visited,
                self.request.nearest(),
                self.request.source(),
                depth,
            )
        });
        let expansion = match expansion {
            Ok(expansion) => expansion,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };

        self.visited.extend(expansion.frontier.iter().cloned());
        self.frontier = expansion.frontier;
        self.depth = depth;

        let summary = LevelSummary {
            depth,
            frontier_size: self.frontier.len(),
            reached: self.reached(),
            vertices_expanded: expansion.vertices_expanded,
            edges_examined: expansion.edges_examined,
        };
        trace!(
            depth,
            frontier = summary.frontier_size,
            reached = summary.reached,
            edges = summary.edges_examined,
            "Level expanded"
        );
        Some(Ok(summary))
    }
}
