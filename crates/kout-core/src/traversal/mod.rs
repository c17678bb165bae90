//! Bounded multi-hop traversal: k-out count, k-out collect and k-neighbor.
//!
//! A [`Traverser`] expands a [`TraversalRequest`] hop by hop through a
//! [`GraphAccessPort`](crate::graph::GraphAccessPort). Each hop applies a
//! [`Step`]; every edge pulled from the port is charged to a
//! [`CapacityGuard`], and the request fails once the budget is exhausted.

mod cancel;
mod capacity;
mod depth_first;
mod driver;
mod expand;
mod levels;
mod request;
mod stats;
mod step;

#[cfg(test)]
mod driver_tests;

pub use cancel::CancellationToken;
pub use capacity::{CapacityGuard, DEFAULT_CAPACITY};
pub use driver::{traverse, Traverser};
pub use expand::{vertex_set, Expansion, FrontierExpander, VertexScan, VertexSet};
pub use levels::{LevelSummary, Levels};
pub use request::{
    Algorithm, CompletionStatus, OutputMode, Scope, StepPlan, TraversalOutput, TraversalParams,
    TraversalRequest, TraversalRequestBuilder, TraversalResult, DEFAULT_LIMIT,
};
pub use stats::TraversalStats;
pub use step::{
    Condition, DegreeLimit, FilterTarget, PropertyFilter, Step, DEFAULT_MAX_DEGREE, NO_LIMIT,
};
