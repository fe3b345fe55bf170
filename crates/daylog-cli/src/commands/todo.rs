use clap::Subcommand;
use daylog_core::{
    build_todo_tree, calculate_total_weighted_rate, daily_level, parse_todos, quadrant_summary,
    toggle_todo, Level,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::print_json;

#[derive(Subcommand)]
pub enum TodoAction {
    /// Parsed todo items
    Parse {
        /// Todo list text file
        #[arg(long)]
        input: PathBuf,
    },
    /// Items nested by indentation
    Tree {
        /// Todo list text file
        #[arg(long)]
        input: PathBuf,
    },
    /// Weighted completion rate and daily level
    Rate {
        /// Todo list text file
        #[arg(long)]
        input: PathBuf,
    },
    /// Per-quadrant counts
    Quadrants {
        /// Todo list text file
        #[arg(long)]
        input: PathBuf,
    },
    /// Check or uncheck the item on a line
    Toggle {
        /// Todo list text file
        #[arg(long)]
        input: PathBuf,
        /// Zero-based line number of the item
        line: usize,
        /// Rewrite the file instead of printing the result
        #[arg(long)]
        in_place: bool,
    },
}

#[derive(Serialize)]
struct RateOutput {
    rate: u32,
    level: Level,
}

fn read_text(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()).into())
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TodoAction::Parse { input } => print_json(&parse_todos(&read_text(&input)?)),
        TodoAction::Tree { input } => {
            print_json(&build_todo_tree(&parse_todos(&read_text(&input)?)))
        }
        TodoAction::Rate { input } => {
            let rate = calculate_total_weighted_rate(&parse_todos(&read_text(&input)?));
            print_json(&RateOutput {
                rate,
                level: daily_level(rate),
            })
        }
        TodoAction::Quadrants { input } => {
            print_json(&quadrant_summary(&parse_todos(&read_text(&input)?)))
        }
        TodoAction::Toggle {
            input,
            line,
            in_place,
        } => {
            let raw = read_text(&input)?;
            let updated =
                toggle_todo(&raw, line).ok_or_else(|| format!("line {line} is not a todo item"))?;
            if in_place {
                std::fs::write(&input, updated)?;
                println!("ok");
            } else {
                print!("{updated}");
            }
            Ok(())
        }
    }
}
