//! Sleep tracking for Daylog.
//!
//! Users log going to bed (`#sleep`) and getting up (`#wake`) as independent
//! entries. This module pairs them into sessions, aggregates them over time
//! windows and scores a week of sleep out of 100.

mod record;
mod score;
mod summary;

pub use record::{reconstruct_sleep_records, SleepRecord, MAX_SLEEP_GAP_MS};

pub use score::{
    SleepScore, SleepScoreDetails, SleepScorer, SleepTargets, WeeklySleepReport, WeeklyStreak,
};

pub use summary::{
    average_duration_hours, average_sleep_time, average_wake_time, recent_records,
    records_in_range, SleepSummary,
};
