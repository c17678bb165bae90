//! Edge label interning.
//!
//! Steps carry labels as compact `LabelId`s so the per-edge label check in the
//! expander is an integer comparison rather than a string comparison.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Interned edge label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct LabelId(u32);

impl LabelId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Creates a LabelId from a raw value (for backends with their own ids).
    #[must_use]
    pub const fn from_u32(id: u32) -> Self {
        Self(id)
    }
}

/// Bidirectional map between label names and `LabelId`s.
///
/// Ids are dense and assigned in first-intern order.
#[derive(Debug, Default, Clone)]
pub struct LabelTable {
    names: Vec<String>,
    ids: FxHashMap<String, LabelId>,
}

impl LabelTable {
    /// Creates a new empty label table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a label name, returning the existing id if already known.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for an empty name or when the table
    /// already holds `u32::MAX` labels.
    pub fn intern(&mut self, name: &str) -> Result<LabelId> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        if name.is_empty() {
            return Err(Error::invalid("edge label can't be empty"));
        }
        let id = u32::try_from(self.names.len())
            .map(LabelId)
            .map_err(|_| Error::invalid("too many distinct edge labels"))?;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Resolves a LabelId back to its name.
    #[must_use]
    pub fn resolve(&self, id: LabelId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Looks a name up without interning it.
    #[must_use]
    pub fn get_id(&self, name: &str) -> Option<LabelId> {
        self.ids.get(name).copied()
    }

    /// Returns the number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no labels have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates labels in id order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, s)| (LabelId(i as u32), s.as_str()))
    }
}
