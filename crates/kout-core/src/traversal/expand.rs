//! Frontier expansion: one hop from every vertex of the current frontier.
//!
//! Per-vertex scans are independent, so large frontiers are scanned on a rayon
//! pool. The visited set is only read during a level; merging the scans back
//! is done by a single writer in frontier order, which keeps the produced
//! frontier identical to the sequential path.

use super::cancel::CancellationToken;
use super::capacity::CapacityGuard;
use super::step::Step;
use crate::config::ParallelConfig;
use crate::error::{Error, Result};
use crate::graph::{GraphAccessPort, VertexId};
use indexmap::IndexSet;
use rayon::prelude::*;
use rayon::ThreadPool;
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// Insertion-ordered vertex set; iteration follows discovery order.
pub type VertexSet = IndexSet<VertexId, FxBuildHasher>;

/// Creates an empty [`VertexSet`].
#[must_use]
pub fn vertex_set() -> VertexSet {
    IndexSet::with_hasher(FxBuildHasher)
}

/// Accepted candidates of one vertex scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexScan {
    /// Accepted neighbors in port order (may repeat on multi-edges).
    pub accepted: Vec<VertexId>,
    /// Edges pulled from the port and charged to the budget.
    pub consumed: u64,
}

/// The next frontier plus the work spent producing it.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Newly reached vertices in discovery order.
    pub frontier: VertexSet,
    /// Vertices whose neighbors were requested.
    pub vertices_expanded: u64,
    /// Edges consumed across all scans of the level.
    pub edges_examined: u64,
}

/// Expands frontiers against a [`GraphAccessPort`].
///
/// Holds only shared references: the guard and the cancellation token are
/// owned by the driver for the duration of one request.
pub struct FrontierExpander<'a, P: ?Sized> {
    port: &'a P,
    guard: &'a CapacityGuard,
    cancel: Option<&'a CancellationToken>,
    parallel: ParallelConfig,
    pool: Option<&'a ThreadPool>,
}

impl<'a, P> FrontierExpander<'a, P>
where
    P: GraphAccessPort + ?Sized,
{
    /// Creates a sequential expander.
    #[must_use]
    pub fn new(port: &'a P, guard: &'a CapacityGuard) -> Self {
        Self {
            port,
            guard,
            cancel: None,
            parallel: ParallelConfig::disabled(),
            pool: None,
        }
    }

    /// Enables parallel scans, optionally on a dedicated pool.
    #[must_use]
    pub fn with_parallel(
        mut self,
        parallel: ParallelConfig,
        pool: Option<&'a ThreadPool>,
    ) -> Self {
        self.parallel = parallel;
        self.pool = pool;
        self
    }

    /// Observes `token` once per examined edge.
    #[must_use]
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fails with `Error::Cancelled` if cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cancelled { depth }`.
    pub fn check_cancelled(&self, depth: u32) -> Result<()> {
        if self.cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(Error::Cancelled { depth });
        }
        Ok(())
    }

    /// Produces the frontier of hop `depth` from `frontier`.
    ///
    /// With `nearest`, candidates already in `visited` are dropped; otherwise
    /// only duplicates within the new frontier are. `source` is never emitted.
    ///
    /// # Errors
    ///
    /// Propagates `CapacityExceeded`, `Cancelled` and backend failures. A
    /// frontier vertex the port no longer knows contributes no edges.
    pub fn expand(
        &self,
        frontier: &VertexSet,
        step: &Step,
        visited: &VertexSet,
        nearest: bool,
        source: &VertexId,
        depth: u32,
    ) -> Result<Expansion> {
        let exclude = nearest.then_some(visited);
        let scans = if self.parallel.should_parallelize_frontier(frontier.len()) {
            self.scan_parallel(frontier, step, exclude, source, depth)?
        } else {
            frontier
                .iter()
                .map(|v| self.scan_vertex(v, step, exclude, source, depth))
                .collect::<Result<Vec<_>>>()?
        };

        let mut expansion = Expansion {
            frontier: vertex_set(),
            vertices_expanded: frontier.len() as u64,
            edges_examined: 0,
        };
        for scan in scans {
            expansion.edges_examined += scan.consumed;
            expansion.frontier.extend(scan.accepted);
        }
        Ok(expansion)
    }

    fn scan_parallel(
        &self,
        frontier: &VertexSet,
        step: &Step,
        exclude: Option<&VertexSet>,
        source: &VertexId,
        depth: u32,
    ) -> Result<Vec<VertexScan>> {
        let vertices: Vec<&VertexId> = frontier.iter().collect();
        let run = || {
            vertices
                .par_iter()
                .map(|v| self.scan_vertex(v, step, exclude, source, depth))
                .collect::<Result<Vec<_>>>()
        };
        match self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Scans the edges of a single vertex.
    ///
    /// At most `step.degree_limit()` edges are pulled from the port, each one
    /// charged to the capacity guard before it is evaluated.
    ///
    /// # Errors
    ///
    /// Propagates `CapacityExceeded`, `Cancelled` and backend failures.
    pub fn scan_vertex(
        &self,
        vertex: &VertexId,
        step: &Step,
        exclude: Option<&VertexSet>,
        source: &VertexId,
        depth: u32,
    ) -> Result<VertexScan> {
        let mut edges = match self.port.neighbors(vertex, step.direction(), step.labels()) {
            Ok(edges) => edges,
            Err(Error::NotFound(_)) => {
                debug!(vertex = %vertex, depth, "Frontier vertex vanished, skipping");
                return Ok(VertexScan::default());
            }
            Err(err) => return Err(err),
        };

        let degree = step.degree_limit();
        let mut scan = VertexScan::default();
        while degree.allows(scan.consumed) {
            self.check_cancelled(depth)?;
            let Some(edge) = edges.next() else {
                break;
            };
            let edge = edge?;
            self.guard.tick()?;
            scan.consumed += 1;

            if !step.matches(&edge) {
                continue;
            }
            let candidate = edge.other_endpoint();
            if candidate == source || exclude.is_some_and(|seen| seen.contains(candidate)) {
                continue;
            }
            if step.needs_vertex_properties() {
                let properties = self.port.vertex_properties(candidate)?;
                if !step.matches_vertex(properties.as_deref()) {
                    continue;
                }
            }
            scan.accepted.push(candidate.clone());
        }
        Ok(scan)
    }
}
