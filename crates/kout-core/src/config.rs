//! `kout` Configuration Module
//!
//! Provides configuration file support via `kout.toml` and environment
//! variables.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`KOUT_*`, sections separated by `__`, e.g.
//!    `KOUT_TRAVERSAL__MAX_DEGREE=500`)
//! 2. Configuration file (`kout.toml`)
//! 3. Default values

use crate::graph::Direction;
use crate::traversal::{Algorithm, Scope, DEFAULT_CAPACITY, DEFAULT_LIMIT, DEFAULT_MAX_DEGREE};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Defaults applied to requests that leave a parameter unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalDefaults {
    /// Edge direction.
    pub direction: Direction,
    /// Per-vertex degree cap (0 = unlimited).
    pub max_degree: i64,
    /// Edges examined per request (0 = unlimited).
    pub capacity: i64,
    /// Reported vertices per request (0 = unlimited).
    pub limit: i64,
    /// Nearest-depth deduplication.
    pub nearest: bool,
    /// Expansion strategy.
    pub algorithm: Algorithm,
    /// Result scope.
    pub scope: Scope,
}

impl Default for TraversalDefaults {
    fn default() -> Self {
        Self {
            direction: Direction::Out,
            max_degree: DEFAULT_MAX_DEGREE,
            capacity: DEFAULT_CAPACITY,
            limit: DEFAULT_LIMIT,
            nearest: true,
            algorithm: Algorithm::BreadthFirst,
            scope: Scope::Within,
        }
    }
}

/// Parallel frontier expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Scan large frontiers on a rayon pool.
    pub enabled: bool,
    /// Minimum frontier size to trigger parallel expansion.
    pub min_frontier: usize,
    /// Worker threads (0 = rayon's global pool).
    pub threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_frontier: 64,
            threads: 0,
        }
    }
}

impl ParallelConfig {
    /// Sequential expansion only.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builder: set minimum frontier for parallel.
    #[must_use]
    pub fn with_min_frontier(mut self, min_frontier: usize) -> Self {
        self.min_frontier = min_frontier;
        self
    }

    /// Builder: set worker thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Determines if a frontier should be expanded in parallel.
    #[must_use]
    pub fn should_parallelize_frontier(&self, frontier_size: usize) -> bool {
        self.enabled && frontier_size >= self.min_frontier.max(1)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main `kout` configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KoutConfig {
    /// Request defaults.
    pub traversal: TraversalDefaults,
    /// Parallel expansion.
    pub parallel: ParallelConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl KoutConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("kout.toml")
    }

    /// Loads configuration from a specific file path. A missing file is
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("KOUT_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let traversal = &self.traversal;
        for (key, value) in [
            ("traversal.max_degree", traversal.max_degree),
            ("traversal.capacity", traversal.capacity),
            ("traversal.limit", traversal.limit),
        ] {
            if value < 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("value {value} must be >= 0 (0 = unlimited)"),
                });
            }
        }

        if self.parallel.threads > 1024 {
            return Err(ConfigError::InvalidValue {
                key: "parallel.threads".to_string(),
                message: format!("value {} is out of range [0, 1024]", self.parallel.threads),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
