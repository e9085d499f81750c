//! Direct trip matching.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{LocationId, TripEntry, falls_on};

use super::context::SearchContext;

/// Find trips that directly connect `origin` to `destination`.
///
/// Absent filters match everything. When `date` is given, the trip must
/// depart on that calendar day. Trips already departed at `ctx.now` are never
/// returned. Results are in catalog order.
pub fn find_direct(
    ctx: &SearchContext<'_>,
    origin: Option<LocationId>,
    destination: Option<LocationId>,
    date: Option<NaiveDate>,
) -> Vec<Arc<TripEntry>> {
    let matches: Vec<Arc<TripEntry>> = ctx
        .trips_between(origin, destination)
        .into_iter()
        .filter(|trip| ctx.is_offerable(trip))
        .filter(|trip| date.is_none_or(|d| falls_on(trip.departure(), d)))
        .cloned()
        .collect();

    debug!(
        origin = ?origin,
        destination = ?destination,
        date = ?date,
        matches = matches.len(),
        "direct match complete"
    );

    matches
}
