//! Traversal driver: validates the source, runs the chosen algorithm and
//! shapes the result.

use super::cancel::CancellationToken;
use super::depth_first;
use super::expand::FrontierExpander;
use super::levels::Levels;
use super::request::{
    Algorithm, CompletionStatus, OutputMode, Scope, TraversalOutput, TraversalRequest,
    TraversalResult,
};
use super::stats::TraversalStats;
use crate::config::ParallelConfig;
use crate::error::{Error, Result};
use crate::graph::{GraphAccessPort, VertexId};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs traversal requests against one graph access port.
///
/// A `Traverser` is reusable across requests; per-request state (visited set,
/// capacity guard, stats) is created inside [`traverse`](Self::traverse) and
/// dropped on every exit path.
///
/// # Example
///
/// ```rust,ignore
/// let traverser = Traverser::new(&graph).with_parallel(config.parallel.clone())?;
/// let result = traverser.traverse(&request)?;
/// println!("{} vertices", result.count());
/// ```
pub struct Traverser<'g, P: ?Sized> {
    port: &'g P,
    parallel: ParallelConfig,
    pool: Option<Arc<ThreadPool>>,
    cancel: CancellationToken,
}

impl<'g, P> Traverser<'g, P>
where
    P: GraphAccessPort + ?Sized,
{
    /// Creates a sequential traverser.
    #[must_use]
    pub fn new(port: &'g P) -> Self {
        Self {
            port,
            parallel: ParallelConfig::disabled(),
            pool: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Enables parallel frontier expansion.
    ///
    /// `threads == 0` uses rayon's global pool; any other value builds a
    /// dedicated pool of that size.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the dedicated pool cannot be built.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Result<Self> {
        self.pool = if parallel.enabled && parallel.threads > 0 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(parallel.threads)
                .thread_name(|i| format!("kout-worker-{i}"))
                .build()
                .map_err(|e| Error::invalid(format!("cannot build thread pool: {e}")))?;
            Some(Arc::new(pool))
        } else {
            None
        };
        self.parallel = parallel;
        Ok(self)
    }

    /// Uses `token` to observe caller cancellation.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels traversals run by this traverser.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Runs one request.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the source vertex does not exist (nothing is expanded)
    /// - `CapacityExceeded` if the edge budget runs out
    /// - `Cancelled` if the token is cancelled mid-traversal
    /// - `Backend` for port failures
    pub fn traverse(&self, request: &TraversalRequest) -> Result<TraversalResult> {
        let started = Instant::now();
        debug!(
            source = %request.source(),
            depth = request.depth(),
            nearest = request.nearest(),
            max_degree = ?request.steps().step_for(1).and_then(|s| s.degree_limit().get()),
            limit = ?request.limit(),
            capacity = ?request.capacity(),
            mode = ?request.mode(),
            algorithm = %request.algorithm(),
            scope = %request.scope(),
            "Starting k-out traversal"
        );

        if !self.port.contains_vertex(request.source())? {
            return Err(Error::NotFound(request.source().to_string()));
        }

        let guard = request.capacity_guard();
        let expander = FrontierExpander::new(self.port, &guard)
            .with_parallel(self.parallel.clone(), self.pool.as_deref())
            .with_cancellation(&self.cancel);
        let mut stats = TraversalStats::new();

        let outcome = match request.algorithm() {
            Algorithm::BreadthFirst => breadth_first(&expander, request, &mut stats),
            Algorithm::DepthFirst => depth_first::run(&expander, request, &mut stats),
        };
        let (mut reached, status) = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                if guard.is_exceeded() {
                    warn!(
                        source = %request.source(),
                        limit = guard.limit(),
                        consumed = guard.consumed(),
                        "Traversal aborted: capacity exceeded"
                    );
                }
                return Err(err);
            }
        };

        stats.vertices_reached = reached.len() as u64;
        if let Some(limit) = request.limit() {
            reached.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        let output = match request.mode() {
            OutputMode::Count => TraversalOutput::Count(reached.len() as u64),
            OutputMode::Collect => TraversalOutput::Ids(reached),
        };
        stats.elapsed = started.elapsed();

        let result = TraversalResult {
            output,
            status,
            stats,
        };
        info!(
            source = %request.source(),
            count = result.count(),
            status = ?result.status,
            edges = result.stats.edges_examined,
            budget_left = ?request.capacity().map(|_| guard.remaining()),
            elapsed_ms = result.stats.elapsed.as_millis() as u64,
            "k-out traversal finished"
        );
        Ok(result)
    }
}

/// Runs `request` sequentially against `port`.
///
/// # Errors
///
/// See [`Traverser::traverse`].
pub fn traverse<P>(port: &P, request: &TraversalRequest) -> Result<TraversalResult>
where
    P: GraphAccessPort + ?Sized,
{
    Traverser::new(port).traverse(request)
}

fn breadth_first<P>(
    expander: &FrontierExpander<'_, P>,
    request: &TraversalRequest,
    stats: &mut TraversalStats,
) -> Result<(Vec<VertexId>, CompletionStatus)>
where
    P: GraphAccessPort + ?Sized,
{
    let mut levels = Levels::new(expander, request);
    let mut status = CompletionStatus::Complete;

    for level in levels.by_ref() {
        let level = level?;
        stats.record_level(level.vertices_expanded, level.edges_examined);
        // Limit is only checked between levels.
        if request.scope() == Scope::Within && request.limit_reached(level.reached) {
            status = CompletionStatus::LimitReached;
            break;
        }
    }

    let reached = match request.scope() {
        Scope::Within => levels.into_reached(),
        Scope::Exactly if levels.reached_max_depth() => levels.into_frontier(),
        Scope::Exactly => Vec::new(),
    };
    if request.scope() == Scope::Exactly && request.limit_reached(reached.len()) {
        status = CompletionStatus::LimitReached;
    }
    Ok((reached, status))
}
