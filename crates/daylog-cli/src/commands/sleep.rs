use chrono::NaiveDate;
use clap::Subcommand;
use daylog_core::time::{logical_today, week_start};
use daylog_core::{reconstruct_sleep_records, recent_records, CoreError, LogEntry, SleepSummary};
use std::path::{Path, PathBuf};

use super::{load_config, print_json};

#[derive(Subcommand)]
pub enum SleepAction {
    /// Reconstructed sleep records, most recent first
    Records {
        /// JSON array of log entries
        #[arg(long)]
        input: PathBuf,
        /// Only records from the last N days
        #[arg(long)]
        days: Option<u32>,
    },
    /// Average duration, bed time and wake time
    Summary {
        /// JSON array of log entries
        #[arg(long)]
        input: PathBuf,
        /// Window size in days
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Weekly sleep score against the previous week
    Score {
        /// JSON array of log entries
        #[arg(long)]
        input: PathBuf,
        /// Any day inside the week to score (defaults to the current week)
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// Bed/wake time goal streaks for a week
    Streak {
        /// JSON array of log entries
        #[arg(long)]
        input: PathBuf,
        /// Any day inside the week (defaults to the current week)
        #[arg(long)]
        week: Option<NaiveDate>,
    },
}

fn load_entries(path: &Path) -> Result<Vec<LogEntry>, CoreError> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<LogEntry> = serde_json::from_str(&content)?;
    let entries: Vec<LogEntry> = entries.into_iter().map(LogEntry::with_content_tags).collect();
    tracing::debug!(count = entries.len(), path = %path.display(), "loaded log entries");
    Ok(entries)
}

pub fn run(action: SleepAction, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SleepAction::Records { input, days } => {
            let records = reconstruct_sleep_records(&load_entries(&input)?);
            let records = match days {
                Some(days) => recent_records(&records, logical_today(), days),
                None => records,
            };
            print_json(&records)
        }
        SleepAction::Summary { input, days } => {
            let records = reconstruct_sleep_records(&load_entries(&input)?);
            let recent = recent_records(&records, logical_today(), days);
            print_json(&SleepSummary::from_records(&recent))
        }
        SleepAction::Score { input, week } => {
            let config = load_config(config)?;
            let records = reconstruct_sleep_records(&load_entries(&input)?);
            let start = week_start(week.unwrap_or_else(logical_today), config.calendar.week_start);
            print_json(&config.sleep_scorer().score_week(&records, start))
        }
        SleepAction::Streak { input, week } => {
            let config = load_config(config)?;
            let records = reconstruct_sleep_records(&load_entries(&input)?);
            let start = week_start(week.unwrap_or_else(logical_today), config.calendar.week_start);
            print_json(&config.sleep_scorer().weekly_streak(&records, start))
        }
    }
}
