//! Graph-side types and the backend port.
//!
//! The engine sees a graph only through [`GraphAccessPort`]. [`MemoryGraph`]
//! is the bundled in-memory implementation.

mod edge;
mod label_table;
mod memory;
mod port;
mod types;

#[cfg(test)]
mod types_tests;

pub use edge::{Edge, PropertyMap};
pub use label_table::{LabelId, LabelTable};
pub use memory::{EdgeRecord, GraphData, MemoryGraph, VertexRecord};
pub use port::{EdgeIter, GraphAccessPort};
pub use types::{parse_vertex_id, Direction, VertexId};
