//! # kout Core
//!
//! Bounded multi-hop traversal engine for property graphs.
//!
//! Given a source vertex, `kout` explores the graph hop by hop under per-hop
//! constraints and reports the reachable vertices or their count, while a
//! global edge budget keeps dense or adversarial graphs from consuming
//! unbounded memory and CPU.
//!
//! ## Features
//!
//! - **k-out count / collect** and the **k-neighbor** generalization
//! - **Degree sampling**: at most `max_degree` edges read per vertex and hop
//! - **Nearest semantics**: a vertex counts only at its shortest depth
//! - **Capacity budget**: hard ceiling on edges examined per request
//! - **Parallel expansion** of large frontiers on a rayon pool, with results
//!   identical to the sequential path
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kout_core::graph::{Direction, MemoryGraph};
//! use kout_core::traversal::{Step, TraversalRequest};
//!
//! let mut graph = MemoryGraph::new();
//! let knows = graph.add_edge(1, 2, "knows")?;
//! graph.add_edge(2, 3, "knows")?;
//!
//! let step = Step::new(Direction::Out, [knows], 10)?;
//! let request = TraversalRequest::builder(1, step).depth(2).build()?;
//!
//! let result = kout_core::traverse(&graph, &request)?;
//! assert_eq!(result.count(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Counters are u64 and collection sizes usize; conversions between them are
// bounded by graph size.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::use_self)]

pub mod config;
pub mod error;
pub mod graph;
pub mod traversal;

#[cfg(test)]
mod error_tests;

pub use config::{ConfigError, KoutConfig};
pub use error::{Error, Result};
pub use graph::{Direction, GraphAccessPort, MemoryGraph, VertexId};
pub use traversal::{
    traverse, TraversalOutput, TraversalParams, TraversalRequest, TraversalResult, Traverser,
};
