//! Level tables for the gamified progress display.
//!
//! Both tables use inclusive lower bounds: reaching a threshold exactly
//! unlocks the level.

use serde::{Deserialize, Serialize};

/// Lower bounds (completion %) of the five daily levels.
pub const DAILY_LEVEL_THRESHOLDS: [u32; 5] = [0, 20, 40, 60, 80];

/// Lower bounds (lifetime completed items) of the ten lifetime levels.
pub const LIFETIME_LEVEL_THRESHOLDS: [u32; 10] = [0, 25, 70, 130, 210, 330, 500, 750, 1100, 1700];

const DAILY_TITLES: [&str; 5] = ["Warming Up", "Getting Going", "Halfway There", "On a Roll", "Crushing It"];

const LIFETIME_TITLES: [&str; 10] = [
    "Beginner",
    "Apprentice",
    "Doer",
    "Achiever",
    "Go-Getter",
    "Specialist",
    "Expert",
    "Master",
    "Grandmaster",
    "Legend",
];

/// A level reached on one of the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub level: u32,
    pub title: String,
    /// Value at which this level starts
    pub min: u32,
    /// Value at which the next level starts, `None` at the top
    pub next: Option<u32>,
}

fn lookup(value: u32, thresholds: &[u32], titles: &[&str]) -> Level {
    let index = thresholds
        .iter()
        .rposition(|&min| value >= min)
        .unwrap_or(0);
    Level {
        level: index as u32 + 1,
        title: titles[index].to_string(),
        min: thresholds[index],
        next: thresholds.get(index + 1).copied(),
    }
}

/// Level for today's completion percentage. Values above 100 count as 100.
pub fn daily_level(percent: u32) -> Level {
    lookup(percent.min(100), &DAILY_LEVEL_THRESHOLDS, &DAILY_TITLES)
}

/// Level for the lifetime number of completed items.
pub fn lifetime_level(total_completed: u32) -> Level {
    lookup(total_completed, &LIFETIME_LEVEL_THRESHOLDS, &LIFETIME_TITLES)
}
