//! Fuzz target for the traversal engine.
//!
//! Builds a small random graph and request, then checks that a traversal
//! either succeeds within its budget or fails with `CapacityExceeded`.

#![no_main]

use arbitrary::Arbitrary;
use kout_core::graph::{Direction, MemoryGraph, PropertyMap, VertexId};
use kout_core::traversal::{Algorithm, OutputMode, Scope, Step, TraversalRequest};
use kout_core::{traverse, Error};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    edges: Vec<(u8, u8, bool)>,
    direction: u8,
    depth: u8,
    max_degree: u8,
    capacity: u8,
    limit: u8,
    nearest: bool,
    depth_first: bool,
    exactly: bool,
}

fuzz_target!(|input: Input| {
    let mut graph = MemoryGraph::new();
    graph.add_vertex(0, PropertyMap::new());
    for &(from, to, knows) in input.edges.iter().take(256) {
        let label = if knows { "knows" } else { "created" };
        let _ = graph.add_edge(i64::from(from % 32), i64::from(to % 32), label);
    }

    let direction = match input.direction % 3 {
        0 => Direction::Out,
        1 => Direction::In,
        _ => Direction::Both,
    };
    let Ok(step) = Step::new(direction, [], i64::from(input.max_degree % 8)) else {
        return;
    };
    let algorithm = if input.depth_first {
        Algorithm::DepthFirst
    } else {
        Algorithm::BreadthFirst
    };
    let scope = if input.exactly {
        Scope::Exactly
    } else {
        Scope::Within
    };
    let Ok(request) = TraversalRequest::builder(VertexId::Number(0), step)
        .depth(i64::from(input.depth % 6))
        .capacity(i64::from(input.capacity))
        .limit(i64::from(input.limit % 16))
        .nearest(input.nearest)
        .mode(OutputMode::Collect)
        .algorithm(algorithm)
        .scope(scope)
        .build()
    else {
        return;
    };

    match traverse(&graph, &request) {
        Ok(result) => {
            if let Some(capacity) = request.capacity() {
                assert!(result.stats.edges_examined <= capacity);
            }
            if let Some(limit) = request.limit() {
                assert!(result.count() <= limit);
            }
            let ids = result.ids().unwrap_or_default();
            assert!(!ids.contains(&VertexId::Number(0)));
        }
        Err(err) => assert!(matches!(err, Error::CapacityExceeded { .. })),
    }
});
