//! Per-hop constraints: direction, labels, degree sampling and property filters.

use crate::error::{Error, Result};
use crate::graph::{Direction, Edge, LabelId, PropertyMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Raw sentinel meaning "no limit" for degree, capacity and result limits.
pub const NO_LIMIT: i64 = 0;

/// Default per-vertex degree cap.
pub const DEFAULT_MAX_DEGREE: i64 = 10_000;

/// Maximum number of edges sampled per vertex at one hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegreeLimit {
    /// Every edge is observed.
    #[default]
    Unlimited,
    /// At most this many edges are consumed per vertex.
    Limited(u64),
}

impl DegreeLimit {
    /// Converts a request-layer value. `0` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for negative values.
    pub fn from_raw(max_degree: i64) -> Result<Self> {
        match max_degree {
            NO_LIMIT => Ok(Self::Unlimited),
            n if n > 0 => Ok(Self::Limited(n as u64)),
            n => Err(Error::invalid(format!(
                "max_degree must be >= 0 (0 = unlimited), got {n}"
            ))),
        }
    }

    /// Returns true if another edge may be consumed after `consumed` edges.
    #[must_use]
    pub fn allows(self, consumed: u64) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(max) => consumed < max,
        }
    }

    /// Returns the cap, `None` when unlimited.
    #[must_use]
    pub fn get(self) -> Option<u64> {
        match self {
            Self::Unlimited => None,
            Self::Limited(max) => Some(max),
        }
    }
}

/// A single comparison against one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// `key == value`
    Eq {
        /// Property name.
        key: String,
        /// Expected value.
        value: Value,
    },
    /// `key != value` (also true when the property is absent)
    Neq {
        /// Property name.
        key: String,
        /// Rejected value.
        value: Value,
    },
    /// `key > value`
    Gt {
        /// Property name.
        key: String,
        /// Bound.
        value: Value,
    },
    /// `key >= value`
    Gte {
        /// Property name.
        key: String,
        /// Bound.
        value: Value,
    },
    /// `key < value`
    Lt {
        /// Property name.
        key: String,
        /// Bound.
        value: Value,
    },
    /// `key <= value`
    Lte {
        /// Property name.
        key: String,
        /// Bound.
        value: Value,
    },
    /// `key` is one of `values`
    In {
        /// Property name.
        key: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// `key` is present
    Exists {
        /// Property name.
        key: String,
    },
}

impl Condition {
    /// Equality condition.
    #[must_use]
    pub fn eq(key: &str, value: impl Into<Value>) -> Self {
        Self::Eq {
            key: key.to_string(),
            value: value.into(),
        }
    }

    /// Greater-than condition.
    #[must_use]
    pub fn gt(key: &str, value: impl Into<Value>) -> Self {
        Self::Gt {
            key: key.to_string(),
            value: value.into(),
        }
    }

    /// Less-than condition.
    #[must_use]
    pub fn lt(key: &str, value: impl Into<Value>) -> Self {
        Self::Lt {
            key: key.to_string(),
            value: value.into(),
        }
    }

    /// Evaluates the condition against a property map.
    #[must_use]
    pub fn matches(&self, properties: &PropertyMap) -> bool {
        match self {
            Self::Eq { key, value } => properties.get(key).is_some_and(|v| values_equal(v, value)),
            Self::Neq { key, value } => !properties.get(key).is_some_and(|v| values_equal(v, value)),
            Self::Gt { key, value } => ordering(properties, key, value) == Some(Ordering::Greater),
            Self::Gte { key, value } => matches!(
                ordering(properties, key, value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Lt { key, value } => ordering(properties, key, value) == Some(Ordering::Less),
            Self::Lte { key, value } => matches!(
                ordering(properties, key, value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::In { key, values } => properties
                .get(key)
                .is_some_and(|v| values.iter().any(|candidate| values_equal(v, candidate))),
            Self::Exists { key } => properties.contains_key(key),
        }
    }
}

// Numbers compare by value regardless of integer/float encoding.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn ordering(properties: &PropertyMap, key: &str, bound: &Value) -> Option<Ordering> {
    match (properties.get(key)?, bound) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// What a [`PropertyFilter`] is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTarget {
    /// The traversed edge.
    #[default]
    Edge,
    /// The vertex the edge leads to.
    Vertex,
}

/// Conjunction of conditions over edge or target-vertex properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Element the conditions apply to.
    #[serde(default)]
    pub target: FilterTarget,
    /// Conditions, all of which must hold.
    pub conditions: Vec<Condition>,
}

impl PropertyFilter {
    /// Filter over edge properties.
    #[must_use]
    pub fn edge(conditions: Vec<Condition>) -> Self {
        Self {
            target: FilterTarget::Edge,
            conditions,
        }
    }

    /// Filter over target-vertex properties.
    #[must_use]
    pub fn vertex(conditions: Vec<Condition>) -> Self {
        Self {
            target: FilterTarget::Vertex,
            conditions,
        }
    }

    /// Evaluates every condition against `properties`.
    #[must_use]
    pub fn matches(&self, properties: &PropertyMap) -> bool {
        self.conditions.iter().all(|c| c.matches(properties))
    }
}

/// Immutable constraint bundle applied at one hop.
///
/// # Example
///
/// ```rust,ignore
/// let knows = graph.resolve_label("knows")?;
/// let step = Step::new(Direction::Out, [knows], 10)?
///     .with_filter(PropertyFilter::edge(vec![Condition::gt("weight", 0.5)]))?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    direction: Direction,
    labels: Vec<LabelId>,
    degree: DegreeLimit,
    filter: Option<PropertyFilter>,
}

impl Step {
    /// Creates a step. An empty label set is a wildcard; `max_degree == 0`
    /// disables degree sampling.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `max_degree` is negative.
    pub fn new(
        direction: Direction,
        labels: impl IntoIterator<Item = LabelId>,
        max_degree: i64,
    ) -> Result<Self> {
        let degree = DegreeLimit::from_raw(max_degree)?;
        let mut labels: Vec<LabelId> = labels.into_iter().collect();
        labels.sort_unstable();
        labels.dedup();
        Ok(Self {
            direction,
            labels,
            degree,
            filter: None,
        })
    }

    /// Wildcard step with unlimited degree.
    #[must_use]
    pub fn any(direction: Direction) -> Self {
        Self {
            direction,
            labels: Vec::new(),
            degree: DegreeLimit::Unlimited,
            filter: None,
        }
    }

    /// Returns a copy of this step with a property filter.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the step names more than one label:
    /// property filters are only defined against a single edge label.
    pub fn with_filter(mut self, filter: PropertyFilter) -> Result<Self> {
        if self.labels.len() > 1 {
            return Err(Error::invalid(
                "a property filter can only be combined with at most one edge label",
            ));
        }
        self.filter = Some(filter);
        Ok(self)
    }

    /// Traversal direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Allowed labels, sorted; empty means all.
    #[must_use]
    pub fn labels(&self) -> &[LabelId] {
        &self.labels
    }

    /// Per-vertex sampling cap.
    #[must_use]
    pub fn degree_limit(&self) -> DegreeLimit {
        self.degree
    }

    /// Property filter, if any.
    #[must_use]
    pub fn filter(&self) -> Option<&PropertyFilter> {
        self.filter.as_ref()
    }

    /// Label and edge-property check.
    ///
    /// The label check repeats what the port already filtered so a port that
    /// ignores the label hint cannot leak foreign edges.
    #[must_use]
    pub fn matches(&self, edge: &Edge) -> bool {
        if !self.direction.includes(edge.direction()) {
            return false;
        }
        if !self.labels.is_empty() && self.labels.binary_search(&edge.label()).is_err() {
            return false;
        }
        match &self.filter {
            Some(filter) if filter.target == FilterTarget::Edge => {
                filter.matches(edge.properties())
            }
            _ => true,
        }
    }

    /// Returns true if candidates need a vertex property lookup.
    #[must_use]
    pub fn needs_vertex_properties(&self) -> bool {
        self.filter
            .as_ref()
            .is_some_and(|f| f.target == FilterTarget::Vertex)
    }

    /// Vertex-property check. A vertex without stored properties is matched
    /// against an empty map.
    #[must_use]
    pub fn matches_vertex(&self, properties: Option<&PropertyMap>) -> bool {
        match &self.filter {
            Some(filter) if filter.target == FilterTarget::Vertex => {
                filter.matches(properties.unwrap_or(&PropertyMap::new()))
            }
            _ => true,
        }
    }
}
