//! Track occupancy checks and free-slot suggestions.
//!
//! A track is occupied by a trip from its departure to its arrival, and needs
//! a maintenance window between consecutive trips.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::domain::{TripEntry, TripId};

/// Minimum gap between consecutive trips on one track.
pub const MAINTENANCE_WINDOW_MINS: i64 = 20;

/// Maximum number of alternative slots suggested.
pub const MAX_ALTERNATIVES: usize = 3;

/// How far past the last trip a trailing slot may extend (hours).
const OPEN_SLOT_HOURS: i64 = 24;

fn maintenance_window() -> Duration {
    Duration::minutes(MAINTENANCE_WINDOW_MINS)
}

/// Why a proposed occupation of a track is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotConflict {
    #[error("track is already occupied by trip {0}")]
    Overlap(TripId),

    #[error("less than 20 minutes after trip {0}")]
    TooSoonAfter(TripId),

    #[error("less than 20 minutes before trip {0}")]
    TooSoonBefore(TripId),
}

/// A free interval on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub track: u32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

/// Trips occupying `track`, cancelled trips excluded.
fn occupying<'a>(
    catalog: &'a CatalogSnapshot,
    track: u32,
    ignore: Option<TripId>,
) -> impl Iterator<Item = &'a TripEntry> {
    catalog
        .trips()
        .iter()
        .map(|t| &**t)
        .filter(move |t| t.track() == track && !t.is_cancelled() && Some(t.id()) != ignore)
}

/// Check whether `track` can take a trip from `departure` to `arrival`.
///
/// `ignore` excludes one trip, typically the one being rescheduled.
pub fn find_conflict(
    catalog: &CatalogSnapshot,
    track: u32,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    ignore: Option<TripId>,
) -> Option<SlotConflict> {
    let covers = |t: &TripEntry, instant: DateTime<Utc>| t.departure() <= instant && t.arrival() >= instant;

    if let Some(t) = occupying(catalog, track, ignore).find(|t| {
        covers(*t, departure)
            || covers(*t, arrival)
            || (t.departure() >= departure && t.arrival() <= arrival)
    }) {
        return Some(SlotConflict::Overlap(t.id()));
    }

    let window = maintenance_window();

    let before = occupying(catalog, track, ignore)
        .filter(|t| t.arrival() <= departure)
        .max_by_key(|t| t.arrival());
    if let Some(t) = before {
        if departure.signed_duration_since(t.arrival()) < window {
            return Some(SlotConflict::TooSoonAfter(t.id()));
        }
    }

    let after = occupying(catalog, track, ignore)
        .filter(|t| t.departure() >= arrival)
        .min_by_key(|t| t.departure());
    if let Some(t) = after {
        if t.departure().signed_duration_since(arrival) < window {
            return Some(SlotConflict::TooSoonBefore(t.id()));
        }
    }

    None
}

/// Suggest up to [`MAX_ALTERNATIVES`] free slots of `duration` on `track`.
///
/// Gaps are scanned in departure order: before the first trip (from `near`,
/// or `now` if that is later), between consecutive trips, and after the last
/// one. A gap starting in the past starts at `now` plus the maintenance
/// window instead.
pub fn find_alternative_slots(
    catalog: &CatalogSnapshot,
    track: u32,
    duration: Duration,
    near: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    let mut trips: Vec<&TripEntry> = occupying(catalog, track, None).collect();
    trips.sort_by_key(|t| t.departure());

    let window = maintenance_window();
    let open = Duration::hours(OPEN_SLOT_HOURS);
    let search_start = near.max(now);
    let mut slots = Vec::new();

    for i in 0..=trips.len() {
        if slots.len() >= MAX_ALTERNATIVES {
            break;
        }

        let (mut start, end) = if i == 0 {
            match trips.first() {
                None => (search_start, search_start + open),
                Some(first) => (search_start, first.departure() - window),
            }
        } else if i == trips.len() {
            let start = trips[i - 1].arrival() + window;
            (start, start + open)
        } else {
            (trips[i - 1].arrival() + window, trips[i].departure() - window)
        };

        if start < now {
            start = now + window;
        }

        if end.signed_duration_since(start) >= duration {
            slots.push(TimeSlot {
                track,
                departure: start,
                arrival: start + duration,
            });
        }
    }

    debug!(track, found = slots.len(), "alternative slots computed");

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationId, TripStatus, VehicleId};
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    fn trip(id: u64, track: u32, dep: DateTime<Utc>, arr: DateTime<Utc>) -> TripEntry {
        TripEntry::new(
            TripId(id),
            VehicleId(1),
            track,
            LocationId(1),
            LocationId(2),
            dep,
            arr,
        )
        .unwrap()
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                trip(1, 1, at(10, 0), at(11, 0)),
                trip(2, 1, at(14, 0), at(15, 0)),
                trip(3, 2, at(10, 0), at(11, 0)),
            ],
            vec![],
        )
    }

    #[test]
    fn free_slot_has_no_conflict() {
        assert_eq!(find_conflict(&catalog(), 1, at(12, 0), at(13, 0), None), None);
    }

    #[test]
    fn overlap_detected() {
        let c = catalog();
        assert_eq!(
            find_conflict(&c, 1, at(10, 30), at(12, 0), None),
            Some(SlotConflict::Overlap(TripId(1)))
        );
        assert_eq!(
            find_conflict(&c, 1, at(13, 0), at(14, 0), None),
            Some(SlotConflict::Overlap(TripId(2)))
        );
        // Candidate fully containing an existing trip
        assert_eq!(
            find_conflict(&c, 1, at(9, 0), at(12, 0), None),
            Some(SlotConflict::Overlap(TripId(1)))
        );
    }

    #[test]
    fn other_tracks_do_not_conflict() {
        assert_eq!(find_conflict(&catalog(), 3, at(10, 0), at(11, 0), None), None);
    }

    #[test]
    fn maintenance_window_enforced() {
        let c = catalog();
        assert_eq!(
            find_conflict(&c, 1, at(11, 10), at(12, 0), None),
            Some(SlotConflict::TooSoonAfter(TripId(1)))
        );
        assert_eq!(
            find_conflict(&c, 1, at(12, 0), at(13, 50), None),
            Some(SlotConflict::TooSoonBefore(TripId(2)))
        );
        assert_eq!(find_conflict(&c, 1, at(11, 20), at(13, 40), None), None);
    }

    #[test]
    fn ignored_trip_does_not_conflict_with_itself() {
        assert_eq!(
            find_conflict(&catalog(), 1, at(10, 0), at(11, 0), Some(TripId(1))),
            None
        );
    }

    #[test]
    fn cancelled_trips_free_the_track() {
        let c = CatalogSnapshot::new(
            vec![trip(1, 1, at(10, 0), at(11, 0)).with_status(TripStatus::Cancelled)],
            vec![],
        );
        assert_eq!(find_conflict(&c, 1, at(10, 0), at(11, 0), None), None);
    }

    #[test]
    fn empty_track_offers_slot_at_search_start() {
        let slots = find_alternative_slots(
            &CatalogSnapshot::default(),
            5,
            Duration::hours(1),
            at(9, 0),
            at(8, 0),
        );
        assert_eq!(
            slots,
            vec![TimeSlot {
                track: 5,
                departure: at(9, 0),
                arrival: at(10, 0),
            }]
        );
    }

    #[test]
    fn gaps_scanned_in_order() {
        let slots = find_alternative_slots(&catalog(), 1, Duration::hours(1), at(6, 0), at(6, 0));

        let starts: Vec<_> = slots.iter().map(|s| s.departure).collect();
        assert_eq!(starts, vec![at(6, 0), at(11, 20), at(15, 20)]);
        assert!(slots.iter().all(|s| s.arrival - s.departure == Duration::hours(1)));
    }

    #[test]
    fn gaps_too_small_are_skipped() {
        // Gap between trips is 11:20..13:40, too small for three hours
        let slots = find_alternative_slots(&catalog(), 1, Duration::hours(3), at(6, 0), at(6, 0));

        let starts: Vec<_> = slots.iter().map(|s| s.departure).collect();
        assert_eq!(starts, vec![at(6, 0), at(15, 20)]);
    }

    #[test]
    fn past_gap_start_moves_to_now() {
        // now is 12:00, inside the gap after trip 1
        let slots = find_alternative_slots(&catalog(), 1, Duration::minutes(30), at(12, 0), at(12, 0));

        let starts: Vec<_> = slots.iter().map(|s| s.departure).collect();
        assert_eq!(starts, vec![at(12, 20), at(15, 20)]);
    }

    #[test]
    fn at_most_three_alternatives() {
        let trips = (0..6u32)
            .map(|i| trip(u64::from(i), 1, at(8 + 2 * i, 0), at(8 + 2 * i, 30)))
            .collect();
        let c = CatalogSnapshot::new(trips, vec![]);

        let slots = find_alternative_slots(&c, 1, Duration::minutes(10), at(0, 0), at(0, 0));
        assert_eq!(slots.len(), MAX_ALTERNATIVES);
    }

    #[test]
    fn conflict_display() {
        assert_eq!(
            SlotConflict::TooSoonAfter(TripId(4)).to_string(),
            "less than 20 minutes after trip #4"
        );
    }
}
