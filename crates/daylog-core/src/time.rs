//! Shared time and date utilities.
//!
//! Two rules live here and are used by every other module:
//!
//! - **Logical day**: a day rolls over at 05:00 local time, not midnight. An
//!   instant at 04:59 belongs to the previous calendar day.
//! - **Folded-midnight scale**: minute-of-day values for clock times before
//!   06:00 are shifted by +1440 so 23:30 and 00:45 sit next to each other when
//!   averaged or compared.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Local hour at which a logical day begins.
pub const DAY_CUTOFF_HOUR: u32 = 5;

/// Clock times before this hour are shifted onto the previous night.
pub const FOLD_BOUNDARY_HOUR: u32 = 6;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// First day of a scoring week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// Logical day an instant belongs to, in the instant's own local offset.
pub fn logical_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    let local = instant.naive_local();
    if local.hour() < DAY_CUTOFF_HOUR {
        local.date().pred_opt().unwrap_or(local.date())
    } else {
        local.date()
    }
}

/// Logical day of "now" on the host clock.
pub fn logical_today() -> NaiveDate {
    logical_day(&Local::now())
}

/// Plain minute of day (0..1440).
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minute of day on the folded-midnight scale (360..1800).
pub fn folded_minutes(time: NaiveTime) -> u32 {
    let minutes = minute_of_day(time);
    if time.hour() < FOLD_BOUNDARY_HOUR {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Map a (possibly folded) minute value back onto 0..1440.
pub fn unfold_minutes(minutes: u32) -> u32 {
    minutes % MINUTES_PER_DAY
}

/// Convert a (possibly folded) minute value into a clock time.
pub fn minutes_to_time(minutes: u32) -> NaiveTime {
    let minutes = unfold_minutes(minutes);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or_default()
}

/// Format a (possibly folded) minute value as `HH:mm`.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = unfold_minutes(minutes);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse an `HH:mm` clock time. A trailing `:ss` is accepted.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, start: WeekStart) -> NaiveDate {
    let offset = match start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(i64::from(offset))
}

/// Last day of the week beginning at `start`.
pub fn week_end(start: NaiveDate) -> NaiveDate {
    start + Duration::days(6)
}

/// Serde adapter storing a [`NaiveTime`] as `HH:mm`.
pub mod serde_hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::parse_hhmm;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_hhmm(&raw).ok_or_else(|| D::Error::custom(format!("invalid clock time '{raw}'")))
    }
}
