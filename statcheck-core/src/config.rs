// Configuration for the statistics harness

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for running checks against a shared query engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Upper bound on engine calls in flight for one check. The engine's own
    /// slot count caps this further.
    pub max_concurrent_queries: usize,
    /// Abort a check (and cancel its engine calls) after this many milliseconds.
    pub check_timeout_ms: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_concurrent_queries: num_cpus::get(),
            check_timeout_ms: None,
        }
    }
}

impl HarnessConfig {
    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout_ms.map(Duration::from_millis)
    }

    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_str(&content)
    }

    /// Load configuration from string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        // Try JSON first
        if let Ok(config) = serde_json::from_str::<HarnessConfig>(content) {
            return config.validated();
        }

        // Try TOML
        if let Ok(config) = toml::from_str::<HarnessConfig>(content) {
            return config.validated();
        }

        // Try YAML
        if let Ok(config) = serde_yaml::from_str::<HarnessConfig>(content) {
            return config.validated();
        }

        Err(ConfigError::ParseError("Unknown format".to_string()))
    }

    /// Defaults overridden by `STATCHECK_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("STATCHECK_MAX_CONCURRENT_QUERIES") {
            if let Ok(n) = value.parse::<usize>() {
                config.max_concurrent_queries = n;
            }
        }

        if let Ok(value) = std::env::var("STATCHECK_CHECK_TIMEOUT_MS") {
            if let Ok(ms) = value.parse::<u64>() {
                config.check_timeout_ms = Some(ms);
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_queries == 0 {
            return Err(ConfigError::ValidationError(
                "max_concurrent_queries must be > 0".to_string(),
            ));
        }

        if self.check_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "check_timeout_ms must be > 0 when set".to_string(),
            ));
        }

        Ok(())
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
    UnknownProperty(String),
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
            ConfigError::UnknownProperty(key) => write!(f, "Unknown property: {}", key),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Configuration(err.to_string())
    }
}
