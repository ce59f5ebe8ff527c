use std::fs;
use std::path::Path;

use crate::model::config::AppConfig;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read config.toml from the data directory. A missing file yields the
/// defaults; a malformed file is an error the user should see.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}
