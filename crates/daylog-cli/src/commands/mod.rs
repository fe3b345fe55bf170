pub mod config;
pub mod level;
pub mod sleep;
pub mod todo;

use daylog_core::Config;
use std::path::{Path, PathBuf};

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, daylog_core::ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Resolve where the config lives.
pub fn config_path(path: Option<&Path>) -> Result<PathBuf, daylog_core::ConfigError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::path(),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
