//! Search configuration.
//!
//! Controls the heuristics, the random seed and the search limits without
//! code changes. Can be built in code or loaded from TOML.
//!
//! ```
//! use u_timetable::config::SearchConfig;
//! use u_timetable::heuristics::{OrderingKind, SelectorKind};
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     seed = 42
//!     selector = "most_unassigned_slot"
//!     ordering = "forward_checking"
//!     coverage_lookahead = true
//!     max_checks = 1000000
//!     time_limit_ms = 5000
//! "#).unwrap();
//!
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.selector, SelectorKind::MostUnassignedSlot);
//! assert_eq!(config.ordering, OrderingKind::ForwardChecking);
//! assert_eq!(config.time_limit(), Some(Duration::from_millis(5000)));
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heuristics::{OrderingKind, SelectorKind};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Backtracking search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Random seed for reproducible candidate orders. `None` = OS entropy.
    pub seed: Option<u64>,

    /// Variable selection heuristic.
    pub selector: SelectorKind,

    /// Value ordering heuristic.
    pub ordering: OrderingKind,

    /// Reject partial grids that can no longer reach full subject coverage.
    pub coverage_lookahead: bool,

    /// Stop after this many constraint checks.
    pub max_checks: Option<u64>,

    /// Stop after this much wall-clock time (ms).
    pub time_limit_ms: Option<u64>,
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the variable selector.
    pub fn with_selector(mut self, selector: SelectorKind) -> Self {
        self.selector = selector;
        self
    }

    /// Sets the value ordering.
    pub fn with_ordering(mut self, ordering: OrderingKind) -> Self {
        self.ordering = ordering;
        self
    }

    /// Enables or disables the coverage lookahead.
    pub fn with_coverage_lookahead(mut self, enabled: bool) -> Self {
        self.coverage_lookahead = enabled;
        self
    }

    /// Sets the constraint-check budget.
    pub fn with_max_checks(mut self, max_checks: u64) -> Self {
        self.max_checks = Some(max_checks);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the wall-clock limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.selector, SelectorKind::FirstUnassigned);
        assert_eq!(config.ordering, OrderingKind::Randomized);
        assert!(!config.coverage_lookahead);
        assert_eq!(config.max_checks, None);
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = SearchConfig::from_toml_str("ordering = \"least_constraining\"").unwrap();
        assert_eq!(config.ordering, OrderingKind::LeastConstraining);
        assert_eq!(config.selector, SelectorKind::FirstUnassigned);
    }

    #[test]
    fn test_invalid_toml() {
        let err = SearchConfig::from_toml_str("selector = \"bogus\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SearchConfig::load("/nonexistent/timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new()
            .with_seed(7)
            .with_selector(SelectorKind::MostUnassignedSlot)
            .with_ordering(OrderingKind::ForwardChecking)
            .with_coverage_lookahead(true)
            .with_max_checks(10)
            .with_time_limit(Duration::from_secs(2));

        assert_eq!(config.seed, Some(7));
        assert!(config.coverage_lookahead);
        assert_eq!(config.max_checks, Some(10));
        assert_eq!(config.time_limit_ms, Some(2000));
    }
}
