//! Nearby-date fallback search.
//!
//! When nothing matches the requested day, offer trips between the same
//! endpoints on neighbouring days, closest first.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::domain::{LocationId, TripEntry, abs_distance, days, start_of_day};

use super::context::SearchContext;

/// Find trips near `date`, ranked by temporal proximity.
///
/// The distance is measured from the start of the requested day. A trip
/// qualifies when it departs strictly after `ctx.now` and its distance is
/// greater than zero and at most `window_days`. Ties keep catalog order.
/// Without a date there is nothing to be near, so the result is empty.
pub fn find_nearby(
    ctx: &SearchContext<'_>,
    origin: Option<LocationId>,
    destination: Option<LocationId>,
    date: Option<NaiveDate>,
    window_days: u32,
) -> Vec<Arc<TripEntry>> {
    let Some(date) = date else {
        return Vec::new();
    };

    let target = start_of_day(date);
    let window = days(window_days);

    let mut ranked: Vec<(Duration, Arc<TripEntry>)> = ctx
        .trips_between(origin, destination)
        .into_iter()
        .filter(|trip| trip.departure() > ctx.now && ctx.is_offerable(trip))
        .filter_map(|trip| {
            let distance = abs_distance(trip.departure(), target);
            (distance > Duration::zero() && distance <= window).then(|| (distance, trip.clone()))
        })
        .collect();

    // Stable sort: equal distances stay in catalog order
    ranked.sort_by_key(|(distance, _)| *distance);

    debug!(
        origin = ?origin,
        destination = ?destination,
        date = %date,
        window_days,
        matches = ranked.len(),
        "nearby search complete"
    );

    ranked.into_iter().map(|(_, trip)| trip).collect()
}
