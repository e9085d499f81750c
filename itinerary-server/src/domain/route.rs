//! Route type.
//!
//! A `Route` is an itinerary made of one or more consecutive trips. Trips are
//! shared with the catalog through `Arc`, so cloning routes during search is
//! cheap.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{DomainError, LocationId, TripEntry};

/// An ordered, connected and causal sequence of trips.
///
/// # Invariants
///
/// - At least one trip
/// - Each trip starts where the previous one ends
/// - Each trip departs no earlier than the previous one arrives
/// - No location is visited twice (the origin counts as visited)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    trips: Vec<Arc<TripEntry>>,
}

impl Route {
    /// Construct a route, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the trips are empty, disconnected, overlap in time,
    /// or revisit a location.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::{LocationId, Route, TripEntry, TripId, VehicleId};
    /// use chrono::{TimeZone, Utc};
    /// use std::sync::Arc;
    ///
    /// let t = |h| Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap();
    /// let a = TripEntry::new(TripId(1), VehicleId(1), 1, LocationId(1), LocationId(3), t(10), t(11)).unwrap();
    /// let b = TripEntry::new(TripId(2), VehicleId(2), 1, LocationId(3), LocationId(5), t(12), t(13)).unwrap();
    ///
    /// let route = Route::new(vec![Arc::new(a), Arc::new(b)]).unwrap();
    /// assert_eq!(route.hop_count(), 2);
    /// assert_eq!(route.destination(), LocationId(5));
    /// ```
    pub fn new(trips: Vec<Arc<TripEntry>>) -> Result<Self, DomainError> {
        let first = trips.first().ok_or(DomainError::EmptyRoute)?;

        let mut visited = HashSet::with_capacity(trips.len() + 1);
        visited.insert(first.origin());

        for (i, trip) in trips.iter().enumerate() {
            if i > 0 {
                let prev = &trips[i - 1];
                if prev.destination() != trip.origin() {
                    return Err(DomainError::Disconnected(prev.destination(), trip.origin()));
                }
                if trip.departure() < prev.arrival() {
                    return Err(DomainError::DepartsBeforeArrival(trip.id()));
                }
            }
            if !visited.insert(trip.destination()) {
                return Err(DomainError::RepeatedDestination(trip.destination()));
            }
        }

        Ok(Self { trips })
    }

    pub fn trips(&self) -> &[Arc<TripEntry>] {
        &self.trips
    }

    /// Number of trips ridden.
    pub fn hop_count(&self) -> usize {
        self.trips.len()
    }

    /// Returns true for a single-trip route.
    pub fn is_direct(&self) -> bool {
        self.trips.len() == 1
    }

    fn first(&self) -> &TripEntry {
        // Non-empty by construction
        &self.trips[0]
    }

    fn last(&self) -> &TripEntry {
        &self.trips[self.trips.len() - 1]
    }

    pub fn origin(&self) -> LocationId {
        self.first().origin()
    }

    pub fn destination(&self) -> LocationId {
        self.last().destination()
    }

    pub fn departure(&self) -> DateTime<Utc> {
        self.first().departure()
    }

    pub fn arrival(&self) -> DateTime<Utc> {
        self.last().arrival()
    }

    /// Time from first departure to final arrival, layovers included.
    pub fn total_duration(&self) -> Duration {
        self.arrival().signed_duration_since(self.departure())
    }

    /// Locations passed through between origin and destination.
    pub fn interchanges(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.trips[..self.trips.len() - 1]
            .iter()
            .map(|t| t.destination())
    }
}
