//! Traversal requests, their validation, and the result shape.

use super::capacity::{CapacityGuard, DEFAULT_CAPACITY};
use super::stats::TraversalStats;
use super::step::{PropertyFilter, Step, NO_LIMIT};
use crate::config::TraversalDefaults;
use crate::error::{Error, Result};
use crate::graph::{Direction, GraphAccessPort, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default maximum number of reported vertices.
pub const DEFAULT_LIMIT: i64 = 100;

/// Whether the caller wants a count or the vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Report `min(|reached|, limit)`.
    #[default]
    Count,
    /// Report the reached ids, truncated to `limit` in discovery order.
    Collect,
}

/// Expansion strategy, chosen once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Level-synchronous expansion.
    #[default]
    BreadthFirst,
    /// Explicit-stack expansion with depth-aware revisits.
    DepthFirst,
}

impl Algorithm {
    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "breadth_first" | "bfs" => Ok(Self::BreadthFirst),
            "depth_first" | "dfs" => Ok(Self::DepthFirst),
            other => Err(Error::invalid(format!(
                "unknown algorithm '{other}', expected breadth_first or depth_first"
            ))),
        }
    }
}

/// Which reached vertices make up the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every vertex reached at depth `1..=depth` (k-neighbor).
    #[default]
    Within,
    /// Only the vertices of the last frontier (k-out).
    Exactly,
}

impl Scope {
    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Within => "within",
            Self::Exactly => "exactly",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "within" => Ok(Self::Within),
            "exactly" => Ok(Self::Exactly),
            other => Err(Error::invalid(format!(
                "unknown scope '{other}', expected within or exactly"
            ))),
        }
    }
}

/// The steps applied hop by hop.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPlan {
    /// Same step at every hop.
    Uniform(Step),
    /// One step per hop; length must equal the depth.
    PerHop(Vec<Step>),
}

impl StepPlan {
    /// Step used to expand the frontier into hop `depth` (1-based).
    ///
    /// Depths past the end of a per-hop plan reuse its last step; an empty
    /// per-hop plan has no step for any hop.
    #[must_use]
    pub fn step_for(&self, depth: u32) -> Option<&Step> {
        match self {
            Self::Uniform(step) => Some(step),
            Self::PerHop(steps) => {
                let idx = (depth.max(1) as usize - 1).min(steps.len().saturating_sub(1));
                steps.get(idx)
            }
        }
    }

    pub(crate) fn require_step(&self, depth: u32) -> Result<&Step> {
        self.step_for(depth)
            .ok_or_else(|| Error::invalid(format!("step plan has no step for hop {depth}")))
    }

    fn len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::PerHop(steps) => Some(steps.len()),
        }
    }
}

impl From<Step> for StepPlan {
    fn from(step: Step) -> Self {
        Self::Uniform(step)
    }
}

impl From<Vec<Step>> for StepPlan {
    fn from(steps: Vec<Step>) -> Self {
        Self::PerHop(steps)
    }
}

/// A validated traversal request.
///
/// Built through [`TraversalRequest::builder`]; every field has passed
/// validation, so the driver never sees a malformed request.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalRequest {
    source: VertexId,
    steps: StepPlan,
    depth: u32,
    nearest: bool,
    limit: Option<u64>,
    capacity: Option<u64>,
    mode: OutputMode,
    algorithm: Algorithm,
    scope: Scope,
}

impl TraversalRequest {
    /// Starts a request from `source` using `steps`.
    #[must_use]
    pub fn builder(
        source: impl Into<VertexId>,
        steps: impl Into<StepPlan>,
    ) -> TraversalRequestBuilder {
        TraversalRequestBuilder::new(source.into(), steps.into())
    }

    /// Source vertex.
    #[must_use]
    pub fn source(&self) -> &VertexId {
        &self.source
    }

    /// Step plan.
    #[must_use]
    pub fn steps(&self) -> &StepPlan {
        &self.steps
    }

    /// Maximum hop count.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Nearest-depth deduplication.
    #[must_use]
    pub fn nearest(&self) -> bool {
        self.nearest
    }

    /// Result limit, `None` when unlimited.
    #[must_use]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Edge budget, `None` when unlimited.
    #[must_use]
    pub fn capacity(&self) -> Option<u64> {
        self.capacity
    }

    /// Output mode.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Expansion strategy.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Result scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Fresh capacity guard for one execution of this request.
    #[must_use]
    pub fn capacity_guard(&self) -> CapacityGuard {
        self.capacity.map_or_else(CapacityGuard::unlimited, CapacityGuard::new)
    }

    /// Returns true once `reached` vertices satisfy the limit.
    #[must_use]
    pub fn limit_reached(&self, reached: usize) -> bool {
        self.limit.is_some_and(|limit| reached as u64 >= limit)
    }
}

/// Builder for [`TraversalRequest`].
///
/// Raw limits use the request-layer convention: `0` means unlimited and
/// negative values are rejected by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TraversalRequestBuilder {
    source: VertexId,
    steps: StepPlan,
    depth: i64,
    nearest: bool,
    limit: i64,
    capacity: i64,
    mode: OutputMode,
    algorithm: Algorithm,
    scope: Scope,
}

impl TraversalRequestBuilder {
    fn new(source: VertexId, steps: StepPlan) -> Self {
        Self {
            source,
            steps,
            depth: 0,
            nearest: true,
            limit: DEFAULT_LIMIT,
            capacity: DEFAULT_CAPACITY,
            mode: OutputMode::Count,
            algorithm: Algorithm::BreadthFirst,
            scope: Scope::Within,
        }
    }

    /// Sets the hop count (required, > 0).
    #[must_use]
    pub fn depth(mut self, depth: i64) -> Self {
        self.depth = depth;
        self
    }

    /// Sets nearest-depth deduplication.
    #[must_use]
    pub fn nearest(mut self, nearest: bool) -> Self {
        self.nearest = nearest;
        self
    }

    /// Sets the result limit (`0` = unlimited).
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the edge budget (`0` = unlimited).
    #[must_use]
    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the output mode.
    #[must_use]
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the expansion strategy.
    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the result scope.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the depth is not positive, if the
    /// limit or capacity is negative, or if a per-hop plan does not have
    /// exactly `depth` steps.
    pub fn build(self) -> Result<TraversalRequest> {
        if self.depth <= 0 {
            return Err(Error::invalid(format!(
                "depth must be > 0, got {}",
                self.depth
            )));
        }
        let depth = u32::try_from(self.depth)
            .map_err(|_| Error::invalid(format!("depth {} is too large", self.depth)))?;
        if let Some(len) = self.steps.len() {
            if len != depth as usize {
                return Err(Error::invalid(format!(
                    "per-hop plan has {len} steps but depth is {depth}"
                )));
            }
        }
        let limit = optional_limit("limit", self.limit)?;
        let capacity = optional_limit("capacity", self.capacity)?;

        Ok(TraversalRequest {
            source: self.source,
            steps: self.steps,
            depth,
            nearest: self.nearest,
            limit,
            capacity,
            mode: self.mode,
            algorithm: self.algorithm,
            scope: self.scope,
        })
    }
}

fn optional_limit(name: &str, raw: i64) -> Result<Option<u64>> {
    match raw {
        NO_LIMIT => Ok(None),
        n if n > 0 => Ok(Some(n as u64)),
        n => Err(Error::invalid(format!(
            "{name} must be >= 0 (0 = unlimited), got {n}"
        ))),
    }
}

/// Raw request parameters as a request layer receives them.
///
/// Absent values fall back to [`TraversalDefaults`]; [`resolve`](Self::resolve)
/// turns them into a validated [`TraversalRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalParams {
    /// Source id literal, e.g. `1` or `"marko"`.
    pub source: String,
    /// `OUT`, `IN` or `BOTH`.
    pub direction: Option<String>,
    /// Edge label names; empty means every label.
    pub labels: Vec<String>,
    /// Hop count (required).
    pub max_depth: Option<i64>,
    /// Nearest-depth deduplication.
    pub nearest: Option<bool>,
    /// Per-vertex degree cap (`0` = unlimited).
    pub max_degree: Option<i64>,
    /// Edge budget (`0` = unlimited).
    pub capacity: Option<i64>,
    /// Result limit (`0` = unlimited).
    pub limit: Option<i64>,
    /// `breadth_first` or `depth_first`.
    pub algorithm: Option<String>,
    /// `within` or `exactly`.
    pub scope: Option<String>,
    /// Optional property filter applied at every hop.
    pub filter: Option<PropertyFilter>,
    /// Count or collect.
    pub mode: OutputMode,
}

impl TraversalParams {
    /// Resolves the parameters against `port` and `defaults`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for a malformed source id, unknown
    /// direction, label, algorithm or scope, a missing or non-positive depth,
    /// negative limits, or a filter combined with several labels.
    pub fn resolve<P>(&self, port: &P, defaults: &TraversalDefaults) -> Result<TraversalRequest>
    where
        P: GraphAccessPort + ?Sized,
    {
        let source = port.parse_vertex_id(&self.source)?;
        let direction = match &self.direction {
            Some(raw) => raw.parse::<Direction>()?,
            None => defaults.direction,
        };
        let labels = self
            .labels
            .iter()
            .map(|name| port.resolve_label(name))
            .collect::<Result<Vec<_>>>()?;
        let depth = self
            .max_depth
            .ok_or_else(|| Error::invalid("max_depth is required"))?;

        let mut step = Step::new(
            direction,
            labels,
            self.max_degree.unwrap_or(defaults.max_degree),
        )?;
        if let Some(filter) = &self.filter {
            step = step.with_filter(filter.clone())?;
        }

        let algorithm = match &self.algorithm {
            Some(raw) => raw.parse()?,
            None => defaults.algorithm,
        };
        let scope = match &self.scope {
            Some(raw) => raw.parse()?,
            None => defaults.scope,
        };

        TraversalRequest::builder(source, step)
            .depth(depth)
            .nearest(self.nearest.unwrap_or(defaults.nearest))
            .limit(self.limit.unwrap_or(defaults.limit))
            .capacity(self.capacity.unwrap_or(defaults.capacity))
            .mode(self.mode)
            .algorithm(algorithm)
            .scope(scope)
            .build()
    }
}

/// How a successful traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Every reachable vertex within the depth was explored.
    Complete,
    /// Stopped early because the result limit was reached.
    LimitReached,
}

/// The answer, shaped by [`OutputMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOutput {
    /// Number of reached vertices, capped at the limit.
    Count(u64),
    /// Reached vertex ids in discovery order, truncated to the limit.
    Ids(Vec<VertexId>),
}

/// Outcome of a successful traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalResult {
    /// Count or ids.
    #[serde(flatten)]
    pub output: TraversalOutput,
    /// Whether the limit cut the traversal short.
    pub status: CompletionStatus,
    /// Diagnostics for this request.
    pub stats: TraversalStats,
}

impl TraversalResult {
    /// Number of reported vertices in either mode.
    #[must_use]
    pub fn count(&self) -> u64 {
        match &self.output {
            TraversalOutput::Count(n) => *n,
            TraversalOutput::Ids(ids) => ids.len() as u64,
        }
    }

    /// Reported ids, `None` in count mode.
    #[must_use]
    pub fn ids(&self) -> Option<&[VertexId]> {
        match &self.output {
            TraversalOutput::Count(_) => None,
            TraversalOutput::Ids(ids) => Some(ids),
        }
    }

    /// Returns true if the traversal was not cut short by the limit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == CompletionStatus::Complete
    }
}
