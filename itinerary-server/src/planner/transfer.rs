//! Time-respecting BFS for multi-hop itineraries.
//!
//! Nodes are locations and edges are individual trip departures, so the
//! edges available at a location depend on when the traveller got there.
//! Partial paths are explored first-in first-out, which discovers routes in
//! non-decreasing hop count.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, trace};

use crate::domain::{LocationId, Route, TripEntry, falls_on, start_of_day};

use super::context::SearchContext;

/// A partial path waiting in the queue.
///
/// Each branch owns its visited set, so sibling paths never see each
/// other's history.
#[derive(Debug, Clone)]
struct PartialPath {
    trips: Vec<Arc<TripEntry>>,
    location: LocationId,
    last_arrival: Option<DateTime<Utc>>,
    visited: HashSet<LocationId>,
}

impl PartialPath {
    fn start(origin: LocationId) -> Self {
        Self {
            trips: Vec::new(),
            location: origin,
            last_arrival: None,
            visited: HashSet::from([origin]),
        }
    }

    fn hop_count(&self) -> usize {
        self.trips.len()
    }

    fn extend(&self, trip: &Arc<TripEntry>) -> Self {
        let mut trips = self.trips.clone();
        trips.push(trip.clone());

        let mut visited = self.visited.clone();
        visited.insert(trip.destination());

        Self {
            trips,
            location: trip.destination(),
            last_arrival: Some(trip.arrival()),
            visited,
        }
    }
}

/// Routes found by the transfer search.
#[derive(Debug, Clone, Default)]
pub struct TransferResult {
    /// Completed routes in discovery order.
    pub routes: Vec<Route>,

    /// Number of partial paths taken off the queue.
    pub states_explored: usize,
}

/// Find routes from `origin` to `destination` of at most `max_hops` trips.
///
/// Returns at most `ctx.policy.max_results` routes in discovery order. A
/// single-trip route is reported if one is admissible; callers that only want
/// transfers filter on [`Route::hop_count`].
///
/// Missing origin or destination yields an empty result.
pub fn find_transfers(
    ctx: &SearchContext<'_>,
    origin: Option<LocationId>,
    destination: Option<LocationId>,
    start_date: Option<NaiveDate>,
    max_hops: usize,
) -> TransferResult {
    let (Some(origin), Some(destination)) = (origin, destination) else {
        return TransferResult::default();
    };

    let cap = ctx.policy.max_results;
    let mut routes: Vec<Route> = Vec::new();
    let mut states_explored = 0;

    let mut queue: VecDeque<PartialPath> = VecDeque::from([PartialPath::start(origin)]);

    while routes.len() < cap {
        let Some(path) = queue.pop_front() else {
            break;
        };
        states_explored += 1;

        if path.hop_count() >= max_hops {
            continue;
        }

        trace!(
            location = %path.location,
            hops = path.hop_count(),
            queued = queue.len(),
            "expanding partial path"
        );

        for trip in ctx.catalog.departures_from(path.location) {
            if path.visited.contains(&trip.destination()) || !ctx.is_offerable(trip) {
                continue;
            }
            if !is_admissible(ctx, &path, trip, start_date) {
                continue;
            }

            let next = path.extend(trip);

            if trip.destination() == destination {
                match Route::new(next.trips) {
                    Ok(route) => routes.push(route),
                    Err(e) => trace!(error = %e, "discarding invalid route"),
                }
                if routes.len() >= cap {
                    break;
                }
            } else if next.hop_count() < max_hops {
                queue.push_back(next);
            }
        }
    }

    debug!(
        origin = %origin,
        destination = %destination,
        routes = routes.len(),
        states_explored,
        "transfer search complete"
    );

    TransferResult {
        routes,
        states_explored,
    }
}

/// Whether `trip` may extend `path`.
///
/// The first trip is constrained by the requested date: the same calendar
/// day, or within the nearby window after it when multi-day routes are
/// allowed. Later trips must leave after the previous arrival plus the
/// minimum connection, and within the nearby window of it.
fn is_admissible(
    ctx: &SearchContext<'_>,
    path: &PartialPath,
    trip: &TripEntry,
    start_date: Option<NaiveDate>,
) -> bool {
    let window = ctx.policy.window();

    match path.last_arrival {
        None => match start_date {
            None => true,
            Some(date) if ctx.policy.allow_multi_day => {
                let skew = trip.departure().signed_duration_since(start_of_day(date));
                skew >= chrono::Duration::zero() && skew <= window
            }
            Some(date) => falls_on(trip.departure(), date),
        },
        Some(arrival) => {
            let Some(earliest) = arrival.checked_add_signed(ctx.policy.min_connection()) else {
                return false;
            };
            trip.departure() >= earliest
                && trip.departure().signed_duration_since(arrival) <= window
        }
    }
}
