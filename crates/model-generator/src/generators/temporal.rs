//! Date, time and duration generators.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rand::Rng;

/// Earliest generated year.
pub const MIN_YEAR: i32 = 2000;

/// Latest generated year.
pub const MAX_YEAR: i32 = 2050;

/// Highest generated day of month, valid in every month.
pub const MAX_DAY: u32 = 28;

/// Generate a random calendar date between 2000-01-01 and 2050-12-28.
pub fn generate_date<R: Rng>(rng: &mut R) -> NaiveDate {
    let year = rng.random_range(MIN_YEAR..=MAX_YEAR);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=MAX_DAY);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Generate a random time of day with second precision.
pub fn generate_time<R: Rng>(rng: &mut R) -> NaiveTime {
    let hour = rng.random_range(0..=23);
    let minute = rng.random_range(0..=59);
    let second = rng.random_range(0..=59);
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
}

/// Generate a random date/time without timezone.
pub fn generate_datetime<R: Rng>(rng: &mut R) -> NaiveDateTime {
    let date = generate_date(rng);
    let time = generate_time(rng);
    date.and_time(time)
}

/// Generate a random date/time in UTC.
///
/// The wall-clock value is taken as UTC, so the year range of
/// [`generate_datetime`] holds here too.
pub fn generate_datetime_utc<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    generate_datetime(rng).and_utc()
}

/// Generate a random duration of 1-7 days, 1-23 hours and 0-59 minutes.
pub fn generate_duration<R: Rng>(rng: &mut R) -> TimeDelta {
    TimeDelta::days(rng.random_range(1..=7))
        + TimeDelta::hours(rng.random_range(1..=23))
        + TimeDelta::minutes(rng.random_range(0..=59))
}
