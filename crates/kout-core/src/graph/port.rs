//! The backend-facing seam of the engine.
//!
//! A `GraphAccessPort` is whatever serves neighbor lookups: an in-process
//! adjacency store, a remote store client, a storage engine cursor. The
//! engine only reads through it and never holds a lock across a call.

use super::edge::{Edge, PropertyMap};
use super::label_table::LabelId;
use super::types::{parse_vertex_id, Direction, VertexId};
use crate::error::Result;
use std::sync::Arc;

/// Lazy edge sequence returned by [`GraphAccessPort::neighbors`].
///
/// Items are fallible so that I/O backed ports can surface failures
/// mid-iteration as `Error::Backend`.
pub type EdgeIter<'a> = Box<dyn Iterator<Item = Result<Edge>> + Send + 'a>;

/// Neighbor lookup interface consumed by the traversal engine.
///
/// Implementations must be restartable per call and return edges in an order
/// that is stable for a given backend state.
pub trait GraphAccessPort: Send + Sync {
    /// Returns edges incident to `vertex` in `direction`.
    ///
    /// An empty `labels` slice means every label. For `Direction::Both`
    /// implementations yield outgoing edges first, then incoming ones.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `vertex` does not exist. This must be
    /// reported by the call itself, not by the returned iterator.
    fn neighbors<'a>(
        &'a self,
        vertex: &VertexId,
        direction: Direction,
        labels: &[LabelId],
    ) -> Result<EdgeIter<'a>>;

    /// Returns true if `vertex` exists.
    fn contains_vertex(&self, vertex: &VertexId) -> Result<bool>;

    /// Resolves an edge label name.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the label is undefined.
    fn resolve_label(&self, name: &str) -> Result<LabelId>;

    /// Returns the properties of `vertex`, if the backend stores any.
    ///
    /// Only called when a step filters on vertex properties.
    fn vertex_properties(&self, _vertex: &VertexId) -> Result<Option<Arc<PropertyMap>>> {
        Ok(None)
    }

    /// Parses a raw id using the backend's encoding.
    ///
    /// The default accepts numeric and string ids, see [`parse_vertex_id`].
    fn parse_vertex_id(&self, raw: &str) -> Result<VertexId> {
        parse_vertex_id(raw)
    }
}

