//! Runtime configuration for embedding callers and the CLI.
//!
//! # Responsibility
//! - Resolve the data directory and log level from the environment.
//! - Derive database and log locations from the data directory.
//!
//! # Invariants
//! - `data_dir` is always absolute.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "LAZYBOARD_DATA_DIR";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "LAZYBOARD_LOG_LEVEL";

const DB_FILE_NAME: &str = "lazyboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `LAZYBOARD_DATA_DIR` is unset or blank.
    MissingDataDir,
    /// Data directory is not absolute.
    RelativeDataDir(String),
    /// Log level is not recognized.
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDataDir => write!(f, "{DATA_DIR_ENV} is not set"),
            Self::RelativeDataDir(value) => {
                write!(f, "data directory must be an absolute path, got `{value}`")
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    data_dir: PathBuf,
    log_level: &'static str,
}

impl CoreConfig {
    /// Builds a config rooted at `data_dir` with the build-mode log level.
    pub fn new(data_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let data_dir = data_dir.as_ref();
        if !data_dir.is_absolute() {
            return Err(ConfigError::RelativeDataDir(
                data_dir.display().to_string(),
            ));
        }
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            log_level: default_log_level(),
        })
    }

    /// Overrides the log level.
    pub fn with_log_level(mut self, level: &str) -> ConfigResult<Self> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(self)
    }

    /// Reads `LAZYBOARD_DATA_DIR` and `LAZYBOARD_LOG_LEVEL`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let data_dir = lookup(DATA_DIR_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingDataDir)?;
        let config = Self::new(data_dir)?;
        match lookup(LOG_LEVEL_ENV) {
            Some(level) if !level.trim().is_empty() => config.with_log_level(&level),
            _ => Ok(config),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_level(&self) -> &'static str {
        self.log_level
    }

    /// SQLite database holding the board snapshot.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DATA_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_data_dir_is_reported() {
        let err = CoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingDataDir);
    }

    #[test]
    fn relative_data_dir_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(DATA_DIR_ENV, "data")])).unwrap_err();
        assert!(matches!(err, ConfigError::RelativeDataDir(_)));
    }

    #[test]
    fn env_values_resolve_paths_and_level() {
        let dir = std::env::temp_dir().join("lazyboard-config");
        let dir_text = dir.to_str().unwrap().to_string();
        let config = CoreConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, dir_text.as_str()),
            (LOG_LEVEL_ENV, "WARNING"),
        ]))
        .unwrap();

        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.db_path(), dir.join("lazyboard.sqlite3"));
        assert_eq!(config.log_dir(), dir.join("logs"));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let dir = std::env::temp_dir();
        let err = CoreConfig::new(&dir)
            .unwrap()
            .with_log_level("loud")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
