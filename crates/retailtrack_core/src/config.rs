//! Core runtime configuration.
//!
//! Resolution order: built-in defaults, then an optional JSON file, then
//! `RETAILTRACK_*` environment variables.

use crate::logging::{default_log_level, LogLevel};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "RETAILTRACK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RETAILTRACK_LOG_DIR";
pub const ENV_FIXTURES: &str = "RETAILTRACK_FIXTURES";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidLogLevel(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// Seed document; the embedded dataset is used when unset.
    pub fixtures_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            fixtures_path: None,
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validated()
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let document = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&document)
    }

    /// Applies overrides from `lookup`, typically `std::env::var`.
    /// Blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = lookup(ENV_FIXTURES) {
            self.fixtures_path = Some(PathBuf::from(path));
        }
        self.validated()
    }

    /// Defaults, optional file, then process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        info!(
            "event=config_resolve module=config status=ok level={} file={} fixtures={}",
            config.log_level,
            path.is_some(),
            config.fixtures_path.is_some()
        );
        Ok(config)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let level = LogLevel::parse(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        self.log_level = level.as_str().to_string();
        Ok(self)
    }
}
