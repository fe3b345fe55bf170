//! Aggregates over reconstructed sleep records.
//!
//! Bed and wake times are averaged on the folded-midnight scale so 23:30 and
//! 00:30 average to 00:00 instead of noon. Score components read wake times
//! on the plain minute-of-day scale.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::record::SleepRecord;
use crate::time::{folded_minutes, format_minutes, minute_of_day, minutes_to_time};

/// Aggregate view of a set of sleep records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSummary {
    /// Number of records considered
    pub record_count: usize,
    /// Records with both a sleep and a wake time
    pub complete_count: usize,
    /// Mean duration in hours, one decimal
    pub average_duration_hours: Option<f64>,
    /// Mean bed time as `HH:mm`
    pub average_sleep_time: Option<String>,
    /// Mean wake time as `HH:mm`
    pub average_wake_time: Option<String>,
}

impl SleepSummary {
    /// Summarize `records`.
    pub fn from_records(records: &[SleepRecord]) -> Self {
        Self {
            record_count: records.len(),
            complete_count: records.iter().filter(|r| r.is_complete()).count(),
            average_duration_hours: average_duration_hours(records),
            average_sleep_time: mean_sleep_minutes(records).map(|m| format_minutes(m.round() as u32)),
            average_wake_time: mean_wake_minutes(records).map(|m| format_minutes(m.round() as u32)),
        }
    }
}

/// Records whose date is on or after `today - days`.
pub fn recent_records(records: &[SleepRecord], today: NaiveDate, days: u32) -> Vec<SleepRecord> {
    let cutoff = today - Duration::days(i64::from(days));
    records.iter().filter(|r| r.date >= cutoff).cloned().collect()
}

/// Records dated within `start..=end`.
pub fn records_in_range(
    records: &[SleepRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SleepRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// Mean sleep duration in hours rounded to one decimal, `None` without data.
pub fn average_duration_hours(records: &[SleepRecord]) -> Option<f64> {
    let minutes = mean(records.iter().filter_map(|r| r.duration_minutes).map(|m| m as f64))?;
    Some((minutes / 60.0 * 10.0).round() / 10.0)
}

/// Mean bed time on the folded-midnight scale.
pub fn average_sleep_time(records: &[SleepRecord]) -> Option<NaiveTime> {
    mean_sleep_minutes(records).map(|m| minutes_to_time(m.round() as u32))
}

/// Mean wake time on the folded-midnight scale.
pub fn average_wake_time(records: &[SleepRecord]) -> Option<NaiveTime> {
    mean_wake_minutes(records).map(|m| minutes_to_time(m.round() as u32))
}

pub(crate) fn sleep_minutes(records: &[SleepRecord]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.sleep_time)
        .map(|t| f64::from(folded_minutes(t.time())))
        .collect()
}

pub(crate) fn wake_minutes(records: &[SleepRecord]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.wake_time)
        .map(|t| f64::from(minute_of_day(t.time())))
        .collect()
}

fn mean_sleep_minutes(records: &[SleepRecord]) -> Option<f64> {
    mean(sleep_minutes(records))
}

fn mean_wake_minutes(records: &[SleepRecord]) -> Option<f64> {
    mean(
        records
            .iter()
            .filter_map(|r| r.wake_time)
            .map(|t| f64::from(folded_minutes(t.time()))),
    )
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Population standard deviation, `None` with fewer than two samples.
pub(crate) fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values.iter().copied())?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}
