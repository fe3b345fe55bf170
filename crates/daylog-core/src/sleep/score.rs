//! Weekly sleep score and goal streaks.
//!
//! The score is out of 100:
//!
//! | Component        | Max | Rule                                                     |
//! |------------------|-----|----------------------------------------------------------|
//! | Duration         | 40  | `40 - 8 * |avg - target| / 60` (8 points per hour off)   |
//! | Sleep regularity | 15  | full inside the bed-time window, `-15` per 120 min away  |
//! | Wake regularity  | 15  | full inside the wake window, `-15` per 120 min away      |
//! | Consistency      | 30  | 15 per side, full at σ ≤ 15 min, zero at σ ≥ 90 min      |
//!
//! Each component is rounded half away from zero and clamped to its range.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::record::SleepRecord;
use super::summary::{mean, records_in_range, sleep_minutes, std_dev, wake_minutes};
use crate::error::ConfigError;
use crate::time::{folded_minutes, minute_of_day, serde_hhmm, week_end};

/// Maximum points for the duration component.
pub const DURATION_MAX: u32 = 40;
/// Maximum points for each regularity component.
pub const REGULARITY_MAX: u32 = 15;
/// Maximum points for each half of the consistency component.
pub const CONSISTENCY_SIDE_MAX: u32 = 15;

const DURATION_POINTS_PER_HOUR: f64 = 8.0;
const REGULARITY_ZERO_AT_MINUTES: f64 = 120.0;
const CONSISTENCY_FULL_AT_MINUTES: f64 = 15.0;
const CONSISTENCY_ZERO_AT_MINUTES: f64 = 90.0;

/// Sleep goals the score and streaks are measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepTargets {
    pub target_duration_minutes: u32,
    #[serde(with = "serde_hhmm")]
    pub sleep_window_start: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub sleep_window_end: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub wake_window_start: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub wake_window_end: NaiveTime,
    /// Days inside the window needed for a streak to count as met
    pub streak_goal_days: u32,
}

fn clock(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default()
}

impl Default for SleepTargets {
    fn default() -> Self {
        Self {
            target_duration_minutes: 450,
            sleep_window_start: clock(23, 0),
            sleep_window_end: clock(0, 30),
            wake_window_start: clock(6, 0),
            wake_window_end: clock(7, 30),
            streak_goal_days: 5,
        }
    }
}

impl SleepTargets {
    /// Check the targets can be scored.
    ///
    /// The bed-time window is compared on the folded-midnight scale and the
    /// wake window on the plain scale, so each must start no later than it
    /// ends on its own scale (a bed-time window may cross midnight, a wake
    /// window may not).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: format!("sleep.{key}"),
            message: message.to_string(),
        };
        if self.target_duration_minutes == 0 {
            return Err(invalid("target_duration_minutes", "must be greater than zero"));
        }
        if folded_minutes(self.sleep_window_start) > folded_minutes(self.sleep_window_end) {
            return Err(invalid(
                "sleep_window_end",
                "bed-time window must end after it starts (times before 06:00 count as after midnight)",
            ));
        }
        if minute_of_day(self.wake_window_start) > minute_of_day(self.wake_window_end) {
            return Err(invalid("wake_window_end", "wake window must not cross midnight"));
        }
        if self.streak_goal_days == 0 || self.streak_goal_days > 7 {
            return Err(invalid("streak_goal_days", "must be between 1 and 7"));
        }
        Ok(())
    }
}

/// Raw deviations behind the consistency component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepScoreDetails {
    /// Standard deviation of bed times in minutes
    pub sleep_consistency: Option<u32>,
    /// Standard deviation of wake times in minutes
    pub wake_consistency: Option<u32>,
}

/// Composite sleep score. `total` is always the sum of the four components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    pub total: u32,
    pub duration_score: u32,
    pub sleep_regularity: u32,
    pub wake_regularity: u32,
    pub consistency_score: u32,
    pub details: SleepScoreDetails,
}

/// A week's score next to the week before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySleepReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub current: SleepScore,
    pub previous: SleepScore,
    /// `current.total - previous.total`
    pub change: i32,
}

/// Goal streaks within one week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStreak {
    pub sleep_streak: u32,
    pub wake_streak: u32,
    pub sleep_streak_met: bool,
    pub wake_streak_met: bool,
}

/// Scores sleep records against a set of [`SleepTargets`].
#[derive(Debug, Clone, Default)]
pub struct SleepScorer {
    pub targets: SleepTargets,
}

impl SleepScorer {
    /// Create a scorer with the default targets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom targets
    pub fn with_targets(targets: SleepTargets) -> Self {
        Self { targets }
    }

    /// Score an arbitrary set of records. No records yields a zero score.
    pub fn score(&self, records: &[SleepRecord]) -> SleepScore {
        let durations = records
            .iter()
            .filter_map(|r| r.duration_minutes)
            .map(|m| m as f64);
        let duration_score = mean(durations).map_or(0, |avg| self.duration_score(avg));

        let sleep = sleep_minutes(records);
        let wake = wake_minutes(records);

        let sleep_regularity = mean(sleep.iter().copied())
            .map_or(0, |avg| regularity_score(self.sleep_window_distance(avg)));
        let wake_regularity = mean(wake.iter().copied())
            .map_or(0, |avg| regularity_score(self.wake_window_distance(avg)));

        let sleep_sd = std_dev(&sleep);
        let wake_sd = std_dev(&wake);
        let consistency =
            sleep_sd.map_or(0, consistency_score) + wake_sd.map_or(0, consistency_score);

        SleepScore {
            total: duration_score + sleep_regularity + wake_regularity + consistency,
            duration_score,
            sleep_regularity,
            wake_regularity,
            consistency_score: consistency,
            details: SleepScoreDetails {
                sleep_consistency: sleep_sd.map(|sd| sd.round() as u32),
                wake_consistency: wake_sd.map(|sd| sd.round() as u32),
            },
        }
    }

    /// Score the week starting at `week_start` and the week before it.
    pub fn score_week(&self, records: &[SleepRecord], week_start: NaiveDate) -> WeeklySleepReport {
        let end = week_end(week_start);
        let previous_start = week_start - Duration::days(7);
        let previous_end = week_start - Duration::days(1);

        let current = self.score(&records_in_range(records, week_start, end));
        let previous = self.score(&records_in_range(records, previous_start, previous_end));
        let change = current.total as i32 - previous.total as i32;

        WeeklySleepReport {
            week_start,
            week_end: end,
            current,
            previous,
            change,
        }
    }

    /// Count goal days within the week starting at `week_start`.
    ///
    /// Looks at the `streak_goal_days` most recent days that have a bed time
    /// (or wake time) logged and counts how many fall inside the window.
    /// Days do not have to be consecutive.
    pub fn weekly_streak(&self, records: &[SleepRecord], week_start: NaiveDate) -> WeeklyStreak {
        let mut week = records_in_range(records, week_start, week_end(week_start));
        week.sort_by(|a, b| b.date.cmp(&a.date));

        let goal = self.targets.streak_goal_days as usize;
        let sleep_streak = count_goal_days(
            week.iter().filter_map(|r| r.sleep_time.map(|t| (r.date, t.time()))),
            goal,
            |t| self.sleep_window_distance(f64::from(folded_minutes(t))) == 0.0,
        );
        let wake_streak = count_goal_days(
            week.iter().filter_map(|r| r.wake_time.map(|t| (r.date, t.time()))),
            goal,
            |t| self.wake_window_distance(f64::from(minute_of_day(t))) == 0.0,
        );

        WeeklyStreak {
            sleep_streak,
            wake_streak,
            sleep_streak_met: sleep_streak >= self.targets.streak_goal_days,
            wake_streak_met: wake_streak >= self.targets.streak_goal_days,
        }
    }

    /// Duration points for an average duration in minutes.
    pub fn duration_score(&self, average_minutes: f64) -> u32 {
        let deviation = (average_minutes - f64::from(self.targets.target_duration_minutes)).abs();
        let raw = f64::from(DURATION_MAX) - DURATION_POINTS_PER_HOUR * deviation / 60.0;
        raw.clamp(0.0, f64::from(DURATION_MAX)).round() as u32
    }

    fn sleep_window_distance(&self, folded: f64) -> f64 {
        window_distance(
            folded,
            folded_minutes(self.targets.sleep_window_start),
            folded_minutes(self.targets.sleep_window_end),
        )
    }

    fn wake_window_distance(&self, minutes: f64) -> f64 {
        window_distance(
            minutes,
            minute_of_day(self.targets.wake_window_start),
            minute_of_day(self.targets.wake_window_end),
        )
    }
}

/// Distance from `value` to `start..=end`; the window is expected to be
/// ordered (see [`SleepTargets::validate`]).
fn window_distance(value: f64, start: u32, end: u32) -> f64 {
    let (lo, hi) = (f64::from(start), f64::from(end));
    if value < lo {
        lo - value
    } else if value > hi {
        value - hi
    } else {
        0.0
    }
}

/// Regularity points for a distance (minutes) from the target window.
pub fn regularity_score(distance_minutes: f64) -> u32 {
    let raw = f64::from(REGULARITY_MAX) * (1.0 - distance_minutes / REGULARITY_ZERO_AT_MINUTES);
    raw.clamp(0.0, f64::from(REGULARITY_MAX)).round() as u32
}

/// Consistency points for one side given its standard deviation in minutes.
pub fn consistency_score(std_dev_minutes: f64) -> u32 {
    if std_dev_minutes <= CONSISTENCY_FULL_AT_MINUTES {
        return CONSISTENCY_SIDE_MAX;
    }
    let span = CONSISTENCY_ZERO_AT_MINUTES - CONSISTENCY_FULL_AT_MINUTES;
    let raw = f64::from(CONSISTENCY_SIDE_MAX) * (CONSISTENCY_ZERO_AT_MINUTES - std_dev_minutes) / span;
    raw.clamp(0.0, f64::from(CONSISTENCY_SIDE_MAX)).round() as u32
}

fn count_goal_days(
    days: impl Iterator<Item = (NaiveDate, NaiveTime)>,
    lookback: usize,
    in_window: impl Fn(NaiveTime) -> bool,
) -> u32 {
    let mut seen = HashSet::new();
    days.filter(|(date, _)| seen.insert(*date))
        .take(lookback)
        .filter(|(_, time)| in_window(*time))
        .count() as u32
}
