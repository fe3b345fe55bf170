//! # Daylog Core Library
//!
//! Pure derivation engines behind the Daylog daily-logging app. The app keeps
//! journal entries and todo lists in a hosted document store; this crate turns
//! that raw data into the metrics the UI renders.
//!
//! ## Architecture
//!
//! - **Time**: logical-day rollover at 05:00 and folded minute-of-day arithmetic
//! - **Sleep**: pairs `#sleep` / `#wake` entries into sessions, averages them and
//!   computes a 100-point weekly sleep score plus goal streaks
//! - **Todo**: parses an indented checklist into quadrant-tagged items, rebuilds
//!   the hierarchy and computes a depth-weighted completion rate
//! - **Storage**: TOML configuration for scoring targets
//!
//! Every engine function is deterministic and side-effect free, so callers may
//! recompute on every render and call from any thread.
//!
//! ## Key Components
//!
//! - [`reconstruct_sleep_records`]: sleep/wake matching
//! - [`SleepScorer`]: weekly score and streaks
//! - [`parse_todos`] / [`calculate_total_weighted_rate`]: todo engine
//! - [`Config`]: application configuration management

pub mod entry;
pub mod error;
pub mod sleep;
pub mod storage;
pub mod time;
pub mod todo;

pub use entry::{extract_hashtags, LogEntry, SLEEP_TAG, WAKE_TAG};
pub use error::{ConfigError, CoreError};
pub use sleep::{
    average_duration_hours, average_sleep_time, average_wake_time, reconstruct_sleep_records,
    recent_records, records_in_range, SleepRecord, SleepScore, SleepScoreDetails, SleepScorer,
    SleepSummary, SleepTargets, WeeklySleepReport, WeeklyStreak,
};
pub use storage::Config;
pub use time::{logical_day, WeekStart};
pub use todo::{
    build_todo_tree, calculate_total_weighted_rate, daily_level, lifetime_level, parse_todos,
    quadrant_summary, set_todo_checked, toggle_todo, Level, Quadrant, QuadrantSummary, TodoItem,
    TodoNode,
};
