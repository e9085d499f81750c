//! Scheduled trip types.
//!
//! A `TripEntry` is one scheduled, time-stamped movement of a vehicle from
//! one location to another. It is the edge type of the search graph.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use super::{DomainError, LocationId};

/// Identifier of a trip in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(pub u64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of the vehicle that runs a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub u64);

/// Lifecycle status of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TripStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    /// Returns the canonical name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "Scheduled",
            TripStatus::InProgress => "InProgress",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for TripStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(TripStatus::Scheduled),
            "InProgress" => Ok(TripStatus::InProgress),
            "Completed" => Ok(TripStatus::Completed),
            "Cancelled" => Ok(TripStatus::Cancelled),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled trip between two locations.
///
/// # Invariants
///
/// - `arrival > departure`
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::{LocationId, TripEntry, TripId, VehicleId};
/// use chrono::{TimeZone, Utc};
///
/// let dep = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
/// let arr = Utc.with_ymd_and_hms(2025, 6, 1, 11, 30, 0).unwrap();
///
/// let trip = TripEntry::new(TripId(1), VehicleId(9), 2, LocationId(1), LocationId(3), dep, arr).unwrap();
/// assert_eq!(trip.duration().num_minutes(), 90);
///
/// // Arrival must be after departure
/// assert!(TripEntry::new(TripId(2), VehicleId(9), 2, LocationId(1), LocationId(3), arr, dep).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripEntry {
    id: TripId,
    vehicle: VehicleId,
    track: u32,
    origin: LocationId,
    destination: LocationId,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    status: TripStatus,
}

impl TripEntry {
    /// Construct a scheduled trip, validating its times.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `arrival` is not strictly after `departure`.
    pub fn new(
        id: TripId,
        vehicle: VehicleId,
        track: u32,
        origin: LocationId,
        destination: LocationId,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if arrival <= departure {
            return Err(DomainError::ArrivalNotAfterDeparture(id));
        }

        Ok(Self {
            id,
            vehicle,
            track,
            origin,
            destination,
            departure,
            arrival,
            status: TripStatus::Scheduled,
        })
    }

    /// Replaces the recorded lifecycle status.
    pub fn with_status(mut self, status: TripStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    /// Track or platform the trip departs from.
    pub fn track(&self) -> u32 {
        self.track
    }

    pub fn origin(&self) -> LocationId {
        self.origin
    }

    pub fn destination(&self) -> LocationId {
        self.destination
    }

    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// The status recorded in the catalog.
    pub fn status(&self) -> TripStatus {
        self.status
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TripStatus::Cancelled
    }

    /// Time spent travelling.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Status as observed at `now`.
    ///
    /// A cancelled trip stays cancelled. Otherwise the status follows the
    /// clock: completed once arrived, in progress while travelling.
    pub fn effective_status(&self, now: DateTime<Utc>) -> TripStatus {
        if self.is_cancelled() {
            TripStatus::Cancelled
        } else if now >= self.arrival {
            TripStatus::Completed
        } else if now >= self.departure {
            TripStatus::InProgress
        } else {
            TripStatus::Scheduled
        }
    }
}
