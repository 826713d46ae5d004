//! CLI configuration.
//!
//! Loaded from a TOML file when `--config` is given, otherwise built from
//! defaults. Command-line flags and `YIELD_*` environment variables override
//! individual fields after loading.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use yield_types::SchedulerParams;
use yield_utils::LogFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("invalid scheduler parameters: {0}")]
    Params(String),
}

/// Settings for one `yield-cli` invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Principal that owns a freshly initialised ledger.
    #[serde(default = "default_admin")]
    pub admin: String,

    /// Snapshot file the ledger is loaded from and saved to.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Only used when a new ledger is created; an existing snapshot keeps
    /// the parameters it was created with.
    #[serde(default)]
    pub params: SchedulerParams,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            state_file: default_state_file(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: SchedulerParams::default(),
        }
    }
}

fn default_admin() -> String {
    "deployer".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./yield_state.bin")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate its parameters.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config
            .params
            .validate()
            .map_err(|e| ConfigError::Params(e.to_string()))?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
