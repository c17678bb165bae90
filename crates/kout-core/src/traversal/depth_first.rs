//! Explicit-stack depth-first expansion.
//!
//! Applies the same steps, degree sampling, budget and cancellation as the
//! breadth-first path. With `nearest`, a vertex is expanded again only when
//! it is reached at a strictly smaller depth, so for a uniform step plan the
//! reached set matches breadth-first's. Without `nearest`, each
//! `(vertex, depth)` pair is expanded at most once.

use super::expand::FrontierExpander;
use super::request::{CompletionStatus, Scope, TraversalRequest};
use super::stats::TraversalStats;
use crate::error::Result;
use crate::graph::{GraphAccessPort, VertexId};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::trace;

/// Runs a depth-first traversal.
///
/// Returns reached vertices ordered by (depth, discovery) together with the
/// completion status. For [`Scope::Exactly`] only vertices reached at the
/// requested depth are returned (their shortest depth, with `nearest`).
pub(crate) fn run<P>(
    expander: &FrontierExpander<'_, P>,
    request: &TraversalRequest,
    stats: &mut TraversalStats,
) -> Result<(Vec<VertexId>, CompletionStatus)>
where
    P: GraphAccessPort + ?Sized,
{
    let source = request.source();
    let max_depth = request.depth();
    let early_stop = request.scope() == Scope::Within;

    // Smallest depth each vertex was reached at, in discovery order.
    let mut best: IndexMap<VertexId, u32, FxBuildHasher> = IndexMap::with_hasher(FxBuildHasher);
    let mut expanded: FxHashSet<(VertexId, u32)> = FxHashSet::default();
    let mut stack: Vec<(VertexId, u32)> = vec![(source.clone(), 0)];
    let mut status = CompletionStatus::Complete;
    let mut deepest: u32 = 0;

    while let Some((vertex, depth)) = stack.pop() {
        if depth >= max_depth {
            continue;
        }
        let superseded = best.get(&vertex).is_some_and(|&d| d < depth);
        if request.nearest() && depth > 0 && superseded {
            continue;
        }
        let next = depth + 1;
        expander.check_cancelled(next)?;
        let step = request.steps().require_step(next)?;
        let scan = expander.scan_vertex(&vertex, step, None, source, next)?;
        stats.vertices_expanded += 1;
        stats.edges_examined += scan.consumed;
        deepest = deepest.max(next);

        let mut children = Vec::with_capacity(scan.accepted.len());
        for child in scan.accepted {
            let push = if request.nearest() {
                match best.get_mut(&child) {
                    Some(d) if *d <= next => false,
                    Some(d) => {
                        *d = next;
                        true
                    }
                    None => {
                        best.insert(child.clone(), next);
                        true
                    }
                }
            } else {
                best.entry(child.clone())
                    .and_modify(|d| *d = (*d).min(next))
                    .or_insert(next);
                expanded.insert((child.clone(), next))
            };
            if push && !children.contains(&child) {
                children.push(child);
            }
        }
        trace!(vertex = %vertex, depth = next, children = children.len(), "Vertex expanded");
        stack.extend(children.into_iter().rev().map(|child| (child, next)));

        if early_stop && request.limit_reached(best.len()) {
            status = CompletionStatus::LimitReached;
            break;
        }
    }
    stats.levels = deepest;

    let mut reached: Vec<(VertexId, u32)> = best
        .into_iter()
        .filter(|(v, d)| match request.scope() {
            Scope::Within => true,
            Scope::Exactly if request.nearest() => *d == max_depth,
            Scope::Exactly => expanded.contains(&(v.clone(), max_depth)),
        })
        .collect();
    // Stable: discovery order is kept within a depth.
    reached.sort_by_key(|&(_, d)| d);
    if !early_stop && request.limit_reached(reached.len()) {
        status = CompletionStatus::LimitReached;
    }
    Ok((reached.into_iter().map(|(v, _)| v).collect(), status))
}
