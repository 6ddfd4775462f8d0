use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::SheetConfig;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "chordsheet.toml";

/// Error type for loading the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse config text. Every section and field is optional.
pub fn parse_config(text: &str) -> Result<SheetConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Read and parse the config at `path`
pub fn read_config(path: &Path) -> Result<SheetConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config named on the command line, or `chordsheet.toml` in `dir`.
/// Only an explicitly named file has to exist.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<SheetConfig, ConfigError> {
    if let Some(path) = explicit {
        log::debug!("loading config from {}", path.display());
        return read_config(path);
    }

    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        log::trace!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
        return Ok(SheetConfig::default());
    }
    log::debug!("loading config from {}", path.display());
    read_config(&path)
}
