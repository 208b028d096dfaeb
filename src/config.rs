//! Host configuration loading.
//!
//! The engine configuration is read from the JSON file named by
//! `BLOCKTRIS_CONFIG` (if set), then individual fields are overridden from
//! `BLOCKTRIS_*` environment variables. A missing seed is derived from the
//! system clock so every launch plays a different sequence.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;

/// Environment variable naming the JSON config file
pub const CONFIG_PATH_ENV: &str = "BLOCKTRIS_CONFIG";

/// Environment variable naming the log file
pub const LOG_PATH_ENV: &str = "BLOCKTRIS_LOG_PATH";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {}", err),
            ConfigError::Parse(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Read an engine config from a JSON file
pub fn load_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    let config = serde_json::from_str(&text)?;
    Ok(config)
}

/// Config file (if any), environment overrides and a clock-derived seed
pub fn resolve() -> Result<EngineConfig, ConfigError> {
    let base = match non_empty_env(CONFIG_PATH_ENV) {
        Some(path) => load_file(Path::new(&path))?,
        None => EngineConfig::default(),
    };

    let mut config = base.with_env();
    if config.seed.is_none() {
        config.seed = Some(clock_seed());
    }
    Ok(config)
}

/// Trimmed value of an environment variable, `None` if unset or blank
pub fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    (nanos as u32) ^ ((nanos >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/blocktris.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("failed to read config"));
    }
}
