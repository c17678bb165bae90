//! Property-based tests for traversal invariants.

use kout_core::config::ParallelConfig;
use kout_core::graph::{Direction, MemoryGraph, PropertyMap, VertexId};
use kout_core::traversal::{
    Algorithm, OutputMode, Scope, Step, TraversalRequest, TraversalRequestBuilder,
};
use kout_core::{traverse, Error, Traverser};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn graph_strategy() -> impl Strategy<Value = MemoryGraph> {
    (2i64..30).prop_flat_map(|n| {
        proptest::collection::vec((0..n, 0..n, prop::bool::ANY), 0..120).prop_map(|edges| {
            let mut graph = MemoryGraph::new();
            graph.add_vertex(0, PropertyMap::new());
            for (from, to, knows) in edges {
                let label = if knows { "knows" } else { "created" };
                graph.add_edge(from, to, label).unwrap();
            }
            graph
        })
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Out),
        Just(Direction::In),
        Just(Direction::Both)
    ]
}

fn request(direction: Direction, max_degree: i64, depth: i64) -> TraversalRequestBuilder {
    let step = Step::new(direction, [], max_degree).unwrap();
    TraversalRequest::builder(0, step)
        .depth(depth)
        .limit(0)
        .capacity(0)
        .mode(OutputMode::Collect)
}

fn id_set(ids: &[VertexId]) -> BTreeSet<VertexId> {
    ids.iter().cloned().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: identical requests give identical answers, parallel or not
    #[test]
    fn prop_deterministic(
        graph in graph_strategy(),
        direction in direction_strategy(),
        max_degree in 0i64..4,
        depth in 1i64..5,
        nearest in prop::bool::ANY,
    ) {
        let request = request(direction, max_degree, depth).nearest(nearest).build().unwrap();

        let first = traverse(&graph, &request).unwrap();
        let second = traverse(&graph, &request).unwrap();
        let parallel = Traverser::new(&graph)
            .with_parallel(ParallelConfig::default().with_min_frontier(1))
            .unwrap()
            .traverse(&request)
            .unwrap();

        prop_assert_eq!(&first.output, &second.output);
        prop_assert_eq!(&first.output, &parallel.output);
        prop_assert_eq!(first.stats.edges_examined, parallel.stats.edges_examined);
    }

    /// Property: with nearest, each vertex belongs to exactly one depth
    #[test]
    fn prop_nearest_depth_exclusive(
        graph in graph_strategy(),
        direction in direction_strategy(),
        depth in 1i64..5,
    ) {
        let within = request(direction, 0, depth).build().unwrap();
        let within = id_set(traverse(&graph, &within).unwrap().ids().unwrap());

        let mut union = BTreeSet::new();
        for d in 1..=depth {
            let exactly = request(direction, 0, d).scope(Scope::Exactly).build().unwrap();
            let result = traverse(&graph, &exactly).unwrap();
            for id in result.ids().unwrap() {
                prop_assert!(union.insert(id.clone()), "{} reported at two depths", id);
            }
        }
        prop_assert_eq!(union, within);
    }

    /// Property: no vertex is sampled beyond max_degree edges per hop
    #[test]
    fn prop_degree_bound(
        graph in graph_strategy(),
        direction in direction_strategy(),
        max_degree in 1i64..4,
        depth in 1i64..4,
    ) {
        let request = request(direction, max_degree, depth).build().unwrap();

        let stats = traverse(&graph, &request).unwrap().stats;

        prop_assert!(stats.edges_examined <= stats.vertices_expanded * max_degree as u64);
    }

    /// Property: a traversal succeeds exactly when its work fits the budget
    #[test]
    fn prop_capacity_invariant(
        graph in graph_strategy(),
        direction in direction_strategy(),
        depth in 1i64..4,
        capacity in 1i64..60,
    ) {
        let unbounded = request(direction, 0, depth).build().unwrap();
        let needed = traverse(&graph, &unbounded).unwrap().stats.edges_examined;

        let bounded = request(direction, 0, depth).capacity(capacity).build().unwrap();
        match traverse(&graph, &bounded) {
            Ok(result) => {
                prop_assert!(needed <= capacity as u64);
                prop_assert!(result.stats.edges_examined <= capacity as u64);
            }
            Err(Error::CapacityExceeded { limit, consumed }) => {
                prop_assert!(needed > capacity as u64);
                prop_assert_eq!(limit, capacity as u64);
                prop_assert_eq!(consumed, limit + 1);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    /// Property: a limited answer is a prefix of the unlimited one
    #[test]
    fn prop_limit_truncation(
        graph in graph_strategy(),
        direction in direction_strategy(),
        depth in 1i64..5,
        limit in 1i64..10,
    ) {
        let full = request(direction, 0, depth).build().unwrap();
        let full = traverse(&graph, &full).unwrap();
        let full_ids = full.ids().unwrap();

        let limited = request(direction, 0, depth).limit(limit).build().unwrap();
        let limited = traverse(&graph, &limited).unwrap();
        let ids = limited.ids().unwrap();

        prop_assert_eq!(ids.len(), full_ids.len().min(limit as usize));
        prop_assert_eq!(ids, &full_ids[..ids.len()]);
        prop_assert!(!ids.contains(&VertexId::Number(0)));
    }

    /// Property: depth-first reaches the same vertices as breadth-first
    #[test]
    fn prop_depth_first_reaches_same_set(
        graph in graph_strategy(),
        direction in direction_strategy(),
        max_degree in 0i64..4,
        depth in 1i64..5,
    ) {
        let bfs = request(direction, max_degree, depth).build().unwrap();
        let dfs = request(direction, max_degree, depth)
            .algorithm(Algorithm::DepthFirst)
            .build()
            .unwrap();

        let bfs = traverse(&graph, &bfs).unwrap();
        let dfs = traverse(&graph, &dfs).unwrap();

        prop_assert_eq!(id_set(bfs.ids().unwrap()), id_set(dfs.ids().unwrap()));
    }
}
