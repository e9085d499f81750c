//! Read-only catalog snapshot.
//!
//! The caller materializes trips and locations once per search; the snapshot
//! keeps them in catalog order and indexes trips by origin so the router can
//! look up outbound edges without rescanning the whole catalog.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Location, LocationId, TripEntry};

/// Immutable view of trips and locations for the duration of a search.
///
/// Cheap to share across threads behind an `Arc`: nothing mutates it once
/// built.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Trips in catalog order.
    trips: Vec<Arc<TripEntry>>,

    /// Locations in catalog order.
    locations: Vec<Location>,

    /// Map from location -> position in `locations`.
    location_index: HashMap<LocationId, usize>,

    /// Map from location -> positions in `trips` of trips departing there.
    /// Positions are ascending, so catalog order is preserved.
    outbound: HashMap<LocationId, Vec<usize>>,
}

impl CatalogSnapshot {
    /// Build a snapshot, indexing trips by origin.
    ///
    /// If two locations share an id, the first one wins.
    pub fn new(trips: Vec<TripEntry>, locations: Vec<Location>) -> Self {
        let trips: Vec<Arc<TripEntry>> = trips.into_iter().map(Arc::new).collect();
        Self::from_shared(trips, locations)
    }

    fn from_shared(trips: Vec<Arc<TripEntry>>, locations: Vec<Location>) -> Self {
        let mut outbound: HashMap<LocationId, Vec<usize>> = HashMap::new();
        for (idx, trip) in trips.iter().enumerate() {
            outbound.entry(trip.origin()).or_default().push(idx);
        }

        let mut location_index = HashMap::with_capacity(locations.len());
        for (idx, location) in locations.iter().enumerate() {
            location_index.entry(location.id).or_insert(idx);
        }

        Self {
            trips,
            locations,
            location_index,
            outbound,
        }
    }

    /// All trips in catalog order.
    pub fn trips(&self) -> &[Arc<TripEntry>] {
        &self.trips
    }

    /// All locations in catalog order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Trips departing from `origin`, in catalog order.
    pub fn departures_from(&self, origin: LocationId) -> impl Iterator<Item = &Arc<TripEntry>> {
        self.outbound
            .get(&origin)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.trips[idx])
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.location_index.get(&id).map(|&idx| &self.locations[idx])
    }

    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|l| l.name.as_str())
    }

    /// A snapshot without trips that have already arrived at `now`.
    pub fn live(&self, now: DateTime<Utc>) -> Self {
        let trips = self
            .trips
            .iter()
            .filter(|t| t.arrival() >= now)
            .cloned()
            .collect();
        Self::from_shared(trips, self.locations.clone())
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
