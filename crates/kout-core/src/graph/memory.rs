//! In-memory adjacency store implementing [`GraphAccessPort`].
//!
//! Used by tests and the CLI. Edges are indexed in both directions so `IN`
//! and `BOTH` lookups are as cheap as `OUT` ones; adjacency lists keep
//! insertion order, which is the iteration order the port exposes.

use super::edge::{Edge, PropertyMap};
use super::label_table::{LabelId, LabelTable};
use super::port::{EdgeIter, GraphAccessPort};
use super::types::{Direction, VertexId};
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serialized graph document accepted by [`MemoryGraph::from_json`].
///
/// ```json
/// {
///   "vertices": [{ "id": 1, "properties": { "name": "marko" } }],
///   "edges": [{ "from": 1, "to": "lop", "label": "created" }]
/// }
/// ```
///
/// Edge endpoints that are not listed under `vertices` are created without
/// properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    /// Vertices with optional properties.
    #[serde(default)]
    pub vertices: Vec<VertexRecord>,
    /// Directed labelled edges.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// A vertex entry of [`GraphData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexRecord {
    /// Vertex id.
    pub id: VertexId,
    /// Vertex properties.
    #[serde(default)]
    pub properties: PropertyMap,
}

/// An edge entry of [`GraphData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source vertex.
    pub from: VertexId,
    /// Target vertex.
    pub to: VertexId,
    /// Edge label name.
    pub label: String,
    /// Edge properties.
    #[serde(default)]
    pub properties: PropertyMap,
}

/// Immutable-after-load property graph held in memory.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    labels: LabelTable,
    vertices: FxHashMap<VertexId, Arc<PropertyMap>>,
    outgoing: FxHashMap<VertexId, Vec<Edge>>,
    incoming: FxHashMap<VertexId, Vec<Edge>>,
    edge_count: usize,
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a deserialized document.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if an edge label is empty.
    pub fn from_data(data: GraphData) -> Result<Self> {
        let mut graph = Self::new();
        for vertex in data.vertices {
            graph.add_vertex(vertex.id, vertex.properties);
        }
        for edge in data.edges {
            graph.add_edge_with_properties(edge.from, edge.to, &edge.label, edge.properties)?;
        }
        Ok(graph)
    }

    /// Parses a JSON graph document.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: GraphData = serde_json::from_str(json)
            .map_err(|e| Error::invalid(format!("malformed graph document: {e}")))?;
        Self::from_data(data)
    }

    /// Adds a vertex, replacing its properties if it already exists.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>, properties: PropertyMap) {
        self.vertices.insert(id.into(), Arc::new(properties));
    }

    /// Adds a directed edge without properties.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `label` is empty.
    pub fn add_edge(
        &mut self,
        from: impl Into<VertexId>,
        to: impl Into<VertexId>,
        label: &str,
    ) -> Result<LabelId> {
        self.add_edge_with_properties(from, to, label, PropertyMap::new())
    }

    /// Adds a directed edge with properties.
    ///
    /// Missing endpoints are created without properties.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `label` is empty.
    pub fn add_edge_with_properties(
        &mut self,
        from: impl Into<VertexId>,
        to: impl Into<VertexId>,
        label: &str,
        properties: PropertyMap,
    ) -> Result<LabelId> {
        let (from, to) = (from.into(), to.into());
        let label = self.labels.intern(label)?;
        let properties = Arc::new(properties);

        for id in [&from, &to] {
            if !self.vertices.contains_key(id) {
                self.vertices.insert(id.clone(), Arc::default());
            }
        }

        let out_edge = Edge::new(from.clone(), to.clone(), label, Direction::Out)
            .with_properties(Arc::clone(&properties));
        let in_edge = Edge::new(from.clone(), to.clone(), label, Direction::In)
            .with_properties(properties);
        self.outgoing.entry(from).or_default().push(out_edge);
        self.incoming.entry(to).or_default().push(in_edge);
        self.edge_count += 1;
        Ok(label)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates vertex ids in no particular order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = &VertexId> {
        self.vertices.keys()
    }

    /// Label interning table.
    #[must_use]
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Number of edges incident to `vertex` in `direction`.
    #[must_use]
    pub fn degree(&self, vertex: &VertexId, direction: Direction) -> usize {
        let out = self.outgoing.get(vertex).map_or(0, Vec::len);
        let inc = self.incoming.get(vertex).map_or(0, Vec::len);
        match direction {
            Direction::Out => out,
            Direction::In => inc,
            Direction::Both => out + inc,
        }
    }

    fn adjacency(&self, vertex: &VertexId, direction: Direction) -> &[Edge] {
        let index = match direction {
            Direction::In => &self.incoming,
            _ => &self.outgoing,
        };
        index.get(vertex).map(Vec::as_slice).unwrap_or_default()
    }
}

impl GraphAccessPort for MemoryGraph {
    fn neighbors<'a>(
        &'a self,
        vertex: &VertexId,
        direction: Direction,
        labels: &[LabelId],
    ) -> Result<EdgeIter<'a>> {
        if !self.vertices.contains_key(vertex) {
            return Err(Error::NotFound(vertex.to_string()));
        }

        let (use_out, use_in) = match direction {
            Direction::Out => (true, false),
            Direction::In => (false, true),
            Direction::Both => (true, true),
        };
        let out_edges: &[Edge] = if use_out {
            self.adjacency(vertex, Direction::Out)
        } else {
            &[]
        };
        let in_edges: &[Edge] = if use_in {
            self.adjacency(vertex, Direction::In)
        } else {
            &[]
        };

        let labels = labels.to_vec();
        let iter = out_edges
            .iter()
            .chain(in_edges.iter())
            .filter(move |edge| labels.is_empty() || labels.contains(&edge.label()))
            .cloned()
            .map(Ok::<Edge, Error>);
        Ok(Box::new(iter))
    }

    fn contains_vertex(&self, vertex: &VertexId) -> Result<bool> {
        Ok(self.vertices.contains_key(vertex))
    }

    fn resolve_label(&self, name: &str) -> Result<LabelId> {
        self.labels
            .get_id(name)
            .ok_or_else(|| Error::invalid(format!("undefined edge label '{name}'")))
    }

    fn vertex_properties(&self, vertex: &VertexId) -> Result<Option<Arc<PropertyMap>>> {
        Ok(self.vertices.get(vertex).cloned())
    }
}
