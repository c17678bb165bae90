//! Error types for `kout`.
//!
//! Every outcome that aborts a traversal is a distinct variant so the request
//! layer can tell "zero vertices reachable" apart from "traversal was aborted".

use thiserror::Error;

/// Result type alias for `kout` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or running a traversal.
///
/// Error codes follow the pattern `KOUT-XXX` and are stable across releases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input rejected before expansion starts (KOUT-001).
    #[error("[KOUT-001] Invalid argument: {0}")]
    InvalidArgument(String),

    /// Vertex absent from the backend (KOUT-002).
    #[error("[KOUT-002] Vertex '{0}' not found")]
    NotFound(String),

    /// Global work budget exhausted mid-traversal (KOUT-003).
    ///
    /// No partial answer accompanies this error.
    #[error("[KOUT-003] Capacity exceeded: examined {consumed} edges, limit is {limit}")]
    CapacityExceeded {
        /// Configured capacity limit.
        limit: u64,
        /// Edges examined when the limit was crossed.
        consumed: u64,
    },

    /// Caller-initiated cancellation observed (KOUT-004).
    #[error("[KOUT-004] Traversal cancelled at depth {depth}")]
    Cancelled {
        /// Depth being expanded when cancellation was observed.
        depth: u32,
    },

    /// Graph access port failure other than a missing vertex (KOUT-005).
    #[error("[KOUT-005] Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Returns the error code (e.g., "KOUT-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "KOUT-001",
            Self::NotFound(_) => "KOUT-002",
            Self::CapacityExceeded { .. } => "KOUT-003",
            Self::Cancelled { .. } => "KOUT-004",
            Self::Backend(_) => "KOUT-005",
        }
    }

    /// Returns true if the caller may retry with a smaller scope.
    ///
    /// The engine itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. } | Self::Backend(_))
    }

    /// Shorthand for building an [`Error::InvalidArgument`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
