//! Configuration for the qualification engine

use qualify_domain::benchmark::default_benchmarks;
use qualify_domain::IndustryBenchmark;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Configuration for the qualification engine
///
/// Immutable once handed to [`crate::QualificationEngine`]. Fields missing from
/// a TOML document take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum time for a single oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Maximum dimension requests in flight at once
    pub max_concurrent_dimension_calls: usize,

    /// Request predictive metrics and risk after the dimensions, and the
    /// strategy after the metrics, passing earlier results as context
    pub staged_context: bool,

    /// Ask the oracle for an engagement strategy; when off the default
    /// strategy is used without a request
    pub synthesize_strategy: bool,

    /// Reference figures per industry, passed to the oracle as context
    pub industry_benchmarks: BTreeMap<String, IndustryBenchmark>,
}

impl EngineConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_dimension_calls == 0 {
            return Err("max_concurrent_dimension_calls must be greater than 0".to_string());
        }
        for (industry, benchmark) in &self.industry_benchmarks {
            benchmark
                .validate()
                .map_err(|e| format!("benchmark '{}': {}", industry, e))?;
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            oracle_timeout_secs: 30,
            max_concurrent_dimension_calls: 10,
            staged_context: false,
            synthesize_strategy: true,
            industry_benchmarks: default_benchmarks(),
        }
    }
}

impl EngineConfig {
    /// Aggressive preset: short timeout, every request in parallel
    pub fn aggressive() -> Self {
        Self {
            oracle_timeout_secs: 10,
            ..Self::default()
        }
    }

    /// Lenient preset: long timeout, staged requests with full context
    pub fn lenient() -> Self {
        Self {
            oracle_timeout_secs: 120,
            staged_context: true,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.oracle_timeout(), Duration::from_secs(30));
        assert_eq!(config.industry_benchmarks.len(), 3);
    }

    #[test]
    fn test_aggressive_config_is_valid() {
        let config = EngineConfig::aggressive();
        assert!(config.validate().is_ok());
        assert_eq!(config.oracle_timeout_secs, 10);
        assert!(!config.staged_context);
    }

    #[test]
    fn test_lenient_config_is_valid() {
        let config = EngineConfig::lenient();
        assert!(config.validate().is_ok());
        assert_eq!(config.oracle_timeout_secs, 120);
        assert!(config.staged_context);
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = EngineConfig::default();
        config.oracle_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_concurrency() {
        let mut config = EngineConfig::default();
        config.max_concurrent_dimension_calls = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_benchmark() {
        let mut config = EngineConfig::default();
        if let Some(b) = config.industry_benchmarks.get_mut("retail") {
            b.churn_rate = 2.0;
        }
        let err = config.validate().unwrap_err();
        assert!(err.contains("retail"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let parsed = EngineConfig::from_toml(
            r#"
            oracle_timeout_secs = 5

            [industry_benchmarks.dental]
            avg_review_count = 40
            avg_rating = 4.6
            conversion_rate = 0.3
            avg_lifetime_value = 5000.0
            churn_rate = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(parsed.oracle_timeout_secs, 5);
        assert_eq!(parsed.max_concurrent_dimension_calls, 10);
        assert!(parsed.synthesize_strategy);
        assert_eq!(parsed.industry_benchmarks.len(), 1);
        assert_eq!(parsed.industry_benchmarks["dental"].avg_review_count, 40);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(EngineConfig::from_toml("oracle_timeout_secs = \"soon\"").is_err());
    }
}
