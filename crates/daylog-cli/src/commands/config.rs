use clap::Subcommand;
use daylog_core::Config;
use std::path::Path;

use super::{config_path, load_config, print_json};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "sleep.target_duration_minutes")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Show all config values
    Show,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(path)?;
            config.set(&key, &value)?;
            config.save_to(&config_path(path)?)?;
            println!("ok");
        }
        ConfigAction::Show => {
            print_json(&load_config(path)?)?;
        }
        ConfigAction::Reset => {
            Config::default().save_to(&config_path(path)?)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", config_path(path)?.display());
        }
    }
    Ok(())
}
