//! Tests for `driver` module - End-to-end traversal behavior.

use super::cancel::CancellationToken;
use super::driver::*;
use super::request::*;
use super::step::Step;
use crate::config::ParallelConfig;
use crate::error::Error;
use crate::graph::{Direction, GraphAccessPort, MemoryGraph, VertexId};

fn numbers(ids: &[i64]) -> Vec<VertexId> {
    ids.iter().map(|&id| VertexId::Number(id)).collect()
}

fn graph(edges: &[(i64, i64)]) -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    for &(from, to) in edges {
        graph.add_edge(from, to, "e").unwrap();
    }
    graph
}

fn collect(source: i64, depth: i64) -> TraversalRequestBuilder {
    TraversalRequest::builder(source, Step::any(Direction::Out))
        .depth(depth)
        .mode(OutputMode::Collect)
}

// ========================================================================
// Breadth-first
// ========================================================================

#[test]
fn test_collect_in_discovery_order() {
    // Arrange
    let graph = graph(&[(1, 2), (1, 3), (2, 4), (3, 5), (2, 6)]);
    let request = collect(1, 2).build().unwrap();

    // Act
    let result = traverse(&graph, &request).unwrap();

    // Assert
    assert_eq!(result.ids().unwrap(), numbers(&[2, 3, 4, 6, 5]).as_slice());
    assert!(result.is_complete());
    assert_eq!(result.stats.levels, 2);
    assert_eq!(result.stats.vertices_reached, 5);
}

#[test]
fn test_limit_truncates_and_stops_early() {
    let graph = graph(&[(1, 2), (1, 3), (2, 4), (3, 5), (2, 6), (4, 7)]);
    let request = collect(1, 3).limit(3).build().unwrap();

    let result = traverse(&graph, &request).unwrap();

    assert_eq!(result.ids().unwrap(), numbers(&[2, 3, 4]).as_slice());
    assert_eq!(result.status, CompletionStatus::LimitReached);
    // Level 3 never ran
    assert_eq!(result.stats.levels, 2);
}

#[test]
fn test_count_is_capped_by_limit() {
    let graph = graph(&[(1, 2), (1, 3), (1, 4)]);
    let request = TraversalRequest::builder(1, Step::any(Direction::Out))
        .depth(1)
        .limit(2)
        .build()
        .unwrap();

    let result = traverse(&graph, &request).unwrap();

    assert_eq!(result.output, TraversalOutput::Count(2));
    assert_eq!(result.status, CompletionStatus::LimitReached);
    assert_eq!(result.stats.vertices_reached, 3);
}

#[test]
fn test_source_never_reported() {
    let graph = graph(&[(1, 2), (2, 1), (2, 3), (3, 1)]);

    for nearest in [true, false] {
        let request = collect(1, 4).nearest(nearest).build().unwrap();
        let result = traverse(&graph, &request).unwrap();
        assert_eq!(result.ids().unwrap(), numbers(&[2, 3]).as_slice());
    }
}

#[test]
fn test_exactly_scope_with_and_without_nearest() {
    // 1 -> 2 -> 3 and 1 -> 3
    let graph = graph(&[(1, 2), (1, 3), (2, 3)]);

    let nearest = collect(1, 2).scope(Scope::Exactly).build().unwrap();
    let relaxed = collect(1, 2)
        .scope(Scope::Exactly)
        .nearest(false)
        .build()
        .unwrap();

    // 3 is at distance 1, so nothing is at distance exactly 2
    assert!(traverse(&graph, &nearest).unwrap().ids().unwrap().is_empty());
    assert_eq!(
        traverse(&graph, &relaxed).unwrap().ids().unwrap(),
        numbers(&[3]).as_slice()
    );
}

#[test]
fn test_exactly_scope_beyond_graph_depth_is_empty() {
    let graph = graph(&[(1, 2)]);
    let request = collect(1, 3).scope(Scope::Exactly).build().unwrap();

    let result = traverse(&graph, &request).unwrap();

    assert!(result.ids().unwrap().is_empty());
    assert!(result.is_complete());
}

#[test]
fn test_per_hop_steps() {
    let mut graph = MemoryGraph::new();
    let knows = graph.add_edge(1, 2, "knows").unwrap();
    let created = graph.add_edge(2, 3, "created").unwrap();
    graph.add_edge(1, 4, "created").unwrap();
    graph.add_edge(2, 5, "knows").unwrap();
    let steps = vec![
        Step::new(Direction::Out, [knows], 0).unwrap(),
        Step::new(Direction::Out, [created], 0).unwrap(),
    ];

    let request = TraversalRequest::builder(1, steps)
        .depth(2)
        .mode(OutputMode::Collect)
        .build()
        .unwrap();
    let result = traverse(&graph, &request).unwrap();

    assert_eq!(result.ids().unwrap(), numbers(&[2, 3]).as_slice());
}

// ========================================================================
// Depth-first
// ========================================================================

#[test]
fn test_depth_first_matches_breadth_first() {
    // 5 is first found through 2 -> 4 -> 5 at depth 3, then through 3 at depth 2
    let graph = graph(&[(1, 2), (1, 3), (2, 4), (4, 5), (3, 5), (5, 6)]);

    for scope in [Scope::Within, Scope::Exactly] {
        let bfs = collect(1, 3).scope(scope).build().unwrap();
        let dfs = collect(1, 3)
            .scope(scope)
            .algorithm(Algorithm::DepthFirst)
            .build()
            .unwrap();

        let bfs = traverse(&graph, &bfs).unwrap();
        let dfs = traverse(&graph, &dfs).unwrap();

        assert_eq!(bfs.ids(), dfs.ids(), "scope {scope}");
    }
}

#[test]
fn test_depth_first_orders_by_depth() {
    let graph = graph(&[(1, 2), (2, 3), (1, 4)]);
    let request = collect(1, 2)
        .algorithm(Algorithm::DepthFirst)
        .build()
        .unwrap();

    let result = traverse(&graph, &request).unwrap();

    assert_eq!(result.ids().unwrap(), numbers(&[2, 4, 3]).as_slice());
    assert_eq!(result.stats.levels, 2);
}

#[test]
fn test_depth_first_capacity_exceeded() {
    let graph = graph(&[(1, 2), (1, 3), (2, 4)]);
    let request = collect(1, 2)
        .algorithm(Algorithm::DepthFirst)
        .capacity(2)
        .build()
        .unwrap();

    assert!(matches!(
        traverse(&graph, &request),
        Err(Error::CapacityExceeded { limit: 2, .. })
    ));
}

// ========================================================================
// Errors and execution options
// ========================================================================

#[test]
fn test_missing_source_is_not_found() {
    let graph = graph(&[(1, 2)]);
    let request = collect(99, 1).build().unwrap();

    assert_eq!(
        traverse(&graph, &request).unwrap_err(),
        Error::NotFound("99".to_string())
    );
}

#[test]
fn test_cancelled_traversal() {
    let graph = graph(&[(1, 2), (2, 3)]);
    let token = CancellationToken::new();
    let traverser = Traverser::new(&graph).with_cancellation(token.clone());
    token.cancel();

    let result = traverser.traverse(&collect(1, 2).build().unwrap());

    assert_eq!(result.unwrap_err(), Error::Cancelled { depth: 1 });
    assert!(traverser.cancellation_token().is_cancelled());
}

#[test]
fn test_parallel_traverser_matches_sequential() {
    // Two-level fan-out wide enough to cross the parallel threshold
    let mut edges = Vec::new();
    for a in 1..=40 {
        edges.push((0, a));
        for b in 0..5 {
            edges.push((a, 100 + (a * 7 + b * 13) % 150));
        }
    }
    let graph = graph(&edges);
    let request = collect(0, 3).limit(0).build().unwrap();

    let sequential = traverse(&graph, &request).unwrap();
    let parallel = Traverser::new(&graph)
        .with_parallel(ParallelConfig::default().with_min_frontier(4).with_threads(2))
        .unwrap()
        .traverse(&request)
        .unwrap();

    assert_eq!(sequential.output, parallel.output);
    assert_eq!(sequential.stats.edges_examined, parallel.stats.edges_examined);
}

#[test]
fn test_traverse_through_trait_object() {
    let graph = graph(&[(1, 2)]);
    let port: &dyn GraphAccessPort = &graph;
    let request = collect(1, 1).build().unwrap();

    assert_eq!(traverse(port, &request).unwrap().count(), 1);
}

// ========================================================================
// Levels iterator
// ========================================================================

#[test]
fn test_levels_yields_one_summary_per_hop() {
    use super::capacity::CapacityGuard;
    use super::expand::FrontierExpander;
    use super::levels::Levels;

    let graph = graph(&[(1, 2), (1, 3), (2, 4), (4, 5)]);
    let request = collect(1, 2).build().unwrap();
    let guard = CapacityGuard::unlimited();
    let expander = FrontierExpander::new(&graph, &guard);

    let mut levels = Levels::new(&expander, &request);
    let summaries: Vec<_> = levels.by_ref().map(Result::unwrap).collect();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].frontier_size, 2);
    assert_eq!(summaries[1].reached, 3);
    assert_eq!(summaries[1].edges_examined, 1);
    assert_eq!(levels.depth(), 2);
    assert!(levels.reached_max_depth());
    assert!(levels.next().is_none());
    assert_eq!(levels.into_frontier(), numbers(&[4]));
}
