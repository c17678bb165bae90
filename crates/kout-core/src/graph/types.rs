//! Core value types shared by the port and the traversal engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque vertex identifier.
///
/// Backends encode ids either as signed 64-bit numbers or as strings. The
/// engine only relies on equality, hashing and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexId {
    /// Numeric id.
    Number(i64),
    /// String id.
    Text(String),
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for VertexId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for VertexId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for VertexId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Parses a raw vertex id as received by the request layer.
///
/// Accepted forms:
/// - a bare integer (`42`, `-7`) is a numeric id
/// - a JSON string literal (`"alice"`) is a string id, escapes allowed
/// - any other token without quotes or whitespace is a string id
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for empty input, integers that overflow
/// `i64`, unterminated or empty string literals, and stray quotes or
/// whitespace inside an unquoted id.
pub fn parse_vertex_id(raw: &str) -> Result<VertexId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid("the vertex id can't be empty"));
    }

    if raw.starts_with('"') {
        let text: String = serde_json::from_str(raw)
            .map_err(|e| Error::invalid(format!("malformed vertex id {raw}: {e}")))?;
        if text.is_empty() {
            return Err(Error::invalid("the vertex id can't be empty"));
        }
        return Ok(VertexId::Text(text));
    }

    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .map(VertexId::Number)
            .map_err(|_| Error::invalid(format!("vertex id {raw} is out of range")));
    }

    if raw.contains('"') || raw.chars().any(char::is_whitespace) {
        return Err(Error::invalid(format!("malformed vertex id '{raw}'")));
    }
    Ok(VertexId::Text(raw.to_string()))
}

/// Traversal direction relative to the vertex being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow outgoing edges.
    #[default]
    #[serde(alias = "OUT")]
    Out,
    /// Follow incoming edges.
    #[serde(alias = "IN")]
    In,
    /// Follow edges in both directions.
    #[serde(alias = "BOTH")]
    Both,
}

impl Direction {
    /// Returns true if a traversal in this direction follows `edge_direction`.
    #[must_use]
    pub fn includes(self, edge_direction: Direction) -> bool {
        self == Self::Both || self == edge_direction
    }

    /// Canonical upper-case name, as used by the request layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Out => "OUT",
            Self::In => "IN",
            Self::Both => "BOTH",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "out" | "outgoing" => Ok(Self::Out),
            "in" | "incoming" => Ok(Self::In),
            "both" => Ok(Self::Both),
            other => Err(Error::invalid(format!(
                "unknown direction '{other}', expected one of OUT, IN, BOTH"
            ))),
        }
    }
}
