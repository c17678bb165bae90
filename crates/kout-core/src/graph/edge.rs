//! Transient edge records produced by a [`GraphAccessPort`](super::GraphAccessPort).

use super::label_table::LabelId;
use super::types::{Direction, VertexId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Property bag attached to a vertex or an edge.
pub type PropertyMap = BTreeMap<String, Value>;

/// An edge as seen from the vertex being expanded.
///
/// `from`/`to` keep the stored orientation; `direction` says how the edge was
/// reached (`Out` when the expanded vertex is `from`, `In` when it is `to`).
/// Edges are never persisted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: VertexId,
    to: VertexId,
    label: LabelId,
    direction: Direction,
    properties: Arc<PropertyMap>,
}

impl Edge {
    /// Creates an edge without properties.
    ///
    /// `direction` must be `Out` or `In`; `Both` is treated as `Out`.
    #[must_use]
    pub fn new(from: VertexId, to: VertexId, label: LabelId, direction: Direction) -> Self {
        Self {
            from,
            to,
            label,
            direction: if direction == Direction::In {
                Direction::In
            } else {
                Direction::Out
            },
            properties: Arc::default(),
        }
    }

    /// Attaches a shared property map (builder pattern).
    #[must_use]
    pub fn with_properties(mut self, properties: Arc<PropertyMap>) -> Self {
        self.properties = properties;
        self
    }

    /// Stored source vertex.
    #[must_use]
    pub fn from(&self) -> &VertexId {
        &self.from
    }

    /// Stored target vertex.
    #[must_use]
    pub fn to(&self) -> &VertexId {
        &self.to
    }

    /// Edge label.
    #[must_use]
    pub fn label(&self) -> LabelId {
        self.label
    }

    /// Direction in which the edge was reached.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The endpoint opposite to the expanded vertex.
    #[must_use]
    pub fn other_endpoint(&self) -> &VertexId {
        match self.direction {
            Direction::In => &self.from,
            _ => &self.to,
        }
    }

    /// Edge properties.
    #[must_use]
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}
