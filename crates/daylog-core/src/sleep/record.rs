//! Sleep session reconstruction.
//!
//! Pairing is greedy nearest-prior matching: entries are processed in
//! timestamp order, and each `#wake` claims the latest still-unclaimed
//! `#sleep` that is strictly earlier and less than 24 hours before it.
//! Whatever is left over becomes a wake-only or sleep-only record.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entry::{LogEntry, SLEEP_TAG, WAKE_TAG};
use crate::time::logical_day;

/// Upper bound (exclusive) on the sleep-to-wake gap for a match.
pub const MAX_SLEEP_GAP_MS: i64 = 86_400_000;

/// One reconstructed night.
///
/// Either side may be missing when the user forgot to log it. When both are
/// present `sleep_time < wake_time` and `duration_minutes` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Logical day of the wake entry, or of the sleep entry when unmatched
    pub date: NaiveDate,
    pub sleep_time: Option<DateTime<FixedOffset>>,
    pub wake_time: Option<DateTime<FixedOffset>>,
    pub duration_minutes: Option<i64>,
}

impl SleepRecord {
    fn complete(sleep: DateTime<FixedOffset>, wake: DateTime<FixedOffset>) -> Self {
        let millis = (wake - sleep).num_milliseconds();
        Self {
            date: logical_day(&wake),
            sleep_time: Some(sleep),
            wake_time: Some(wake),
            duration_minutes: Some((millis as f64 / 60_000.0).round() as i64),
        }
    }

    fn wake_only(wake: DateTime<FixedOffset>) -> Self {
        Self {
            date: logical_day(&wake),
            sleep_time: None,
            wake_time: Some(wake),
            duration_minutes: None,
        }
    }

    fn sleep_only(sleep: DateTime<FixedOffset>) -> Self {
        Self {
            date: logical_day(&sleep),
            sleep_time: Some(sleep),
            wake_time: None,
            duration_minutes: None,
        }
    }

    /// Whether both ends of the session are known.
    pub fn is_complete(&self) -> bool {
        self.sleep_time.is_some() && self.wake_time.is_some()
    }

    fn anchor(&self) -> Option<DateTime<FixedOffset>> {
        self.wake_time.or(self.sleep_time)
    }
}

/// Rebuild sleep sessions from tagged log entries.
///
/// Entries may arrive in any order. An entry tagged with both `#wake` and
/// `#sleep` counts as a wake. Output is sorted by date, most recent first.
pub fn reconstruct_sleep_records(entries: &[LogEntry]) -> Vec<SleepRecord> {
    let mut sorted: Vec<&LogEntry> = entries
        .iter()
        .filter(|e| e.has_tag(SLEEP_TAG) || e.has_tag(WAKE_TAG))
        .collect();
    sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    let (wakes, sleeps): (Vec<&LogEntry>, Vec<&LogEntry>) =
        sorted.into_iter().partition(|e| e.has_tag(WAKE_TAG));

    let mut consumed = vec![false; sleeps.len()];
    let mut records = Vec::with_capacity(wakes.len() + sleeps.len());

    for wake in &wakes {
        let earlier = sleeps.partition_point(|s| s.timestamp < wake.timestamp);
        let candidate = (0..earlier).rev().find(|&i| !consumed[i]);

        match candidate {
            Some(i)
                if (wake.timestamp - sleeps[i].timestamp).num_milliseconds()
                    < MAX_SLEEP_GAP_MS =>
            {
                consumed[i] = true;
                records.push(SleepRecord::complete(sleeps[i].timestamp, wake.timestamp));
            }
            _ => records.push(SleepRecord::wake_only(wake.timestamp)),
        }
    }

    let matched = consumed.iter().filter(|c| **c).count();
    for (sleep, _) in sleeps.iter().zip(&consumed).filter(|(_, c)| !**c) {
        records.push(SleepRecord::sleep_only(sleep.timestamp));
    }

    tracing::debug!(
        wakes = wakes.len(),
        sleeps = sleeps.len(),
        matched,
        "reconstructed sleep records"
    );

    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.anchor().cmp(&a.anchor())));
    records
}
