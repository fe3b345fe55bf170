use clap::Subcommand;
use daylog_core::{daily_level, lifetime_level};

use super::print_json;

#[derive(Subcommand)]
pub enum LevelAction {
    /// Level for today's completion percentage
    Daily {
        /// Completion percentage (0-100)
        percent: u32,
    },
    /// Level for the lifetime number of completed todos
    Lifetime {
        /// Completed todo count
        count: u32,
    },
}

pub fn run(action: LevelAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LevelAction::Daily { percent } => print_json(&daily_level(percent)),
        LevelAction::Lifetime { count } => print_json(&lifetime_level(count)),
    }
}
