//! Calendar and instant helpers.
//!
//! All instants in the catalog are absolute (`DateTime<Utc>`); requested dates
//! are plain calendar dates. A requested date is anchored at the start of its
//! UTC day whenever it has to be compared against an instant.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Returns the instant at which `date` begins.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::start_of_day;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(start_of_day(date).to_rfc3339(), "2025-06-01T00:00:00+00:00");
/// ```
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Returns true if `instant` falls on the calendar day `date`.
pub fn falls_on(instant: DateTime<Utc>, date: NaiveDate) -> bool {
    instant.date_naive() == date
}

/// Absolute distance between two instants.
pub fn abs_distance(a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
    let delta = a.signed_duration_since(b);
    if delta < Duration::zero() { -delta } else { delta }
}

/// Converts a whole number of days to a `Duration`.
pub fn days(n: u32) -> Duration {
    Duration::days(i64::from(n))
}
