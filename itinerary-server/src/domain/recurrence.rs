//! Recurring trips.
//!
//! A trip may repeat on a fixed interval. Expanding it yields plain scheduled
//! copies that can be added to a catalog like any other trip.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use super::{DomainError, TripEntry, TripId};

/// Largest number of copies a single trip may expand into.
pub const MAX_RECURRENCES: u32 = 366;

/// How often a trip repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    /// Every 30 days, not every calendar month.
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    /// Gap between consecutive occurrences, or `None` for a one-off trip.
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(Duration::days(1)),
            Recurrence::Weekly => Some(Duration::days(7)),
            Recurrence::Monthly => Some(Duration::days(30)),
        }
    }
}

impl FromStr for Recurrence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            other => Err(DomainError::UnknownRecurrence(other.to_string())),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expand `parent` into `count` later copies, one per interval.
///
/// Copy `i` (1-based) departs and arrives `i` intervals after the parent,
/// keeps its vehicle, track and endpoints, and is `Scheduled` whatever the
/// parent's status. Copies are numbered from `first_id` upwards. The parent
/// itself is not included.
///
/// # Errors
///
/// Returns `Err` if `count` exceeds [`MAX_RECURRENCES`], or if a copy's id
/// or times would overflow.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::{expand_recurring, LocationId, Recurrence, TripEntry, TripId, VehicleId};
/// use chrono::{TimeZone, Utc};
///
/// let dep = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
/// let arr = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
/// let trip = TripEntry::new(TripId(1), VehicleId(1), 2, LocationId(1), LocationId(3), dep, arr).unwrap();
///
/// let copies = expand_recurring(&trip, Recurrence::Weekly, 2, TripId(100)).unwrap();
/// assert_eq!(copies[1].id(), TripId(101));
/// assert_eq!(copies[1].departure().to_rfc3339(), "2025-06-15T10:00:00+00:00");
/// ```
pub fn expand_recurring(
    parent: &TripEntry,
    recurrence: Recurrence,
    count: u32,
    first_id: TripId,
) -> Result<Vec<TripEntry>, DomainError> {
    let Some(interval) = recurrence.interval() else {
        return Ok(Vec::new());
    };
    if count > MAX_RECURRENCES {
        return Err(DomainError::TooManyRecurrences(count));
    }

    let out_of_range = || DomainError::RecurrenceOutOfRange(parent.id());

    (1..=count)
        .map(|i| {
            let id = first_id
                .0
                .checked_add(u64::from(i - 1))
                .ok_or_else(out_of_range)?;
            let offset = interval * i as i32;
            let departure = parent
                .departure()
                .checked_add_signed(offset)
                .ok_or_else(out_of_range)?;
            let arrival = parent
                .arrival()
                .checked_add_signed(offset)
                .ok_or_else(out_of_range)?;

            TripEntry::new(
                TripId(id),
                parent.vehicle(),
                parent.track(),
                parent.origin(),
                parent.destination(),
                departure,
                arrival,
            )
        })
        .collect()
}
