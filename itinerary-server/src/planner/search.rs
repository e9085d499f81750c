//! Leg orchestration.
//!
//! Runs the direct, transfer and nearby searches for each requested leg and
//! assembles one report per leg.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::domain::{LocationId, Route, TripEntry};

use super::config::{PolicyError, SearchPolicy};
use super::context::SearchContext;
use super::direct::find_direct;
use super::nearby::find_nearby;
use super::transfer::find_transfers;

/// Transfer time given to a leg created with [`LegRequest::follow_on`].
pub const DEFAULT_TRANSFER_MINS: i64 = 30;

/// One origin/destination/date segment of a journey.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegRequest {
    /// Where the leg starts; absent means any origin.
    pub origin: Option<LocationId>,

    /// Where the leg ends; absent means any destination.
    pub destination: Option<LocationId>,

    /// Calendar date to travel on.
    pub date: Option<NaiveDate>,

    /// Minimum time after the previous leg (minutes). Ignored for the first
    /// leg and not enforced across legs.
    pub transfer_time_mins: i64,
}

impl LegRequest {
    /// Create a new leg request.
    pub fn new(
        origin: Option<LocationId>,
        destination: Option<LocationId>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            origin,
            destination,
            date,
            transfer_time_mins: 0,
        }
    }

    /// Sets the minimum transfer time from the previous leg.
    pub fn with_transfer_time(mut self, mins: i64) -> Self {
        self.transfer_time_mins = mins;
        self
    }

    /// The next leg of a journey: it starts where `previous` ends.
    pub fn follow_on(previous: &LegRequest) -> Self {
        Self {
            origin: previous.destination,
            destination: None,
            date: None,
            transfer_time_mins: DEFAULT_TRANSFER_MINS,
        }
    }
}

/// Search results for one leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegReport {
    /// The request this report answers.
    pub leg: LegRequest,

    /// Single trips connecting the leg's endpoints.
    pub direct: Vec<Arc<TripEntry>>,

    /// Routes of two or more trips, in discovery order.
    pub transfers: Vec<Route>,

    /// Alternatives on neighbouring days, closest first.
    pub nearby: Vec<Arc<TripEntry>>,
}

impl LegReport {
    fn empty(leg: LegRequest) -> Self {
        Self {
            leg,
            direct: Vec::new(),
            transfers: Vec::new(),
            nearby: Vec::new(),
        }
    }

    /// Whether any direct trip or transfer route was found.
    ///
    /// Nearby alternatives do not count: they are a fallback.
    pub fn has_results(&self) -> bool {
        !self.direct.is_empty() || !self.transfers.is_empty()
    }
}

/// Itinerary planner over a catalog snapshot.
///
/// Purely functional: planning never mutates the snapshot, so one planner
/// can serve any number of searches.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    catalog: &'a CatalogSnapshot,
    policy: &'a SearchPolicy,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the policy is invalid.
    pub fn new(catalog: &'a CatalogSnapshot, policy: &'a SearchPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { catalog, policy })
    }

    /// Plan every leg, evaluating "now" once from the system clock.
    pub fn plan_now(&self, legs: &[LegRequest]) -> Vec<LegReport> {
        self.plan(legs, Utc::now())
    }

    /// Plan every leg against a fixed "now". Reports are in input order.
    pub fn plan(&self, legs: &[LegRequest], now: DateTime<Utc>) -> Vec<LegReport> {
        legs.iter().map(|leg| self.plan_leg(leg, now)).collect()
    }

    /// Plan a single leg.
    ///
    /// Direct trips first; transfers only when there are none; nearby
    /// alternatives only when both are empty and a date was given.
    pub fn plan_leg(&self, leg: &LegRequest, now: DateTime<Utc>) -> LegReport {
        let ctx = SearchContext::new(self.catalog, self.policy, now);
        let mut report = LegReport::empty(leg.clone());

        report.direct = find_direct(&ctx, leg.origin, leg.destination, leg.date);

        if report.direct.is_empty() && leg.origin.is_some() && leg.destination.is_some() {
            let result = find_transfers(
                &ctx,
                leg.origin,
                leg.destination,
                leg.date,
                self.policy.max_hops,
            );
            report.transfers = result
                .routes
                .into_iter()
                .filter(|route| !route.is_direct())
                .collect();
        }

        if !report.has_results() && leg.date.is_some() {
            report.nearby = find_nearby(
                &ctx,
                leg.origin,
                leg.destination,
                leg.date,
                self.policy.nearby_window_days,
            );
        }

        debug!(
            origin = ?leg.origin,
            destination = ?leg.destination,
            direct = report.direct.len(),
            transfers = report.transfers.len(),
            nearby = report.nearby.len(),
            "leg planned"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TripId, VehicleId};
    use chrono::{Duration, TimeZone};

    fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn trip(id: u64, from: u64, to: u64, dep: DateTime<Utc>) -> TripEntry {
        TripEntry::new(
            TripId(id),
            VehicleId(id),
            1,
            LocationId(from),
            LocationId(to),
            dep,
            dep + Duration::hours(1),
        )
        .unwrap()
    }

    fn leg(from: u64, to: u64, d: Option<NaiveDate>) -> LegRequest {
        LegRequest::new(Some(LocationId(from)), Some(LocationId(to)), d)
    }

    fn ids(trips: &[Arc<TripEntry>]) -> Vec<u64> {
        trips.iter().map(|t| t.id().0).collect()
    }

    #[test]
    fn invalid_policy_rejected() {
        let catalog = CatalogSnapshot::default();
        let policy = SearchPolicy {
            max_hops: 0,
            ..SearchPolicy::default()
        };
        assert_eq!(Planner::new(&catalog, &policy).unwrap_err(), PolicyError::ZeroHops);
    }

    #[test]
    fn transfer_found_when_no_direct_trip() {
        // 1 -> 3 at 10:00, 3 -> 5 at 12:00, nothing direct from 1 to 5
        let catalog = CatalogSnapshot::new(
            vec![trip(1, 1, 3, at(6, 1, 10)), trip(2, 3, 5, at(6, 1, 12))],
            vec![],
        );
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();

        let reports = planner.plan(&[leg(1, 5, Some(date(6, 1)))], at(5, 1, 0));

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert!(report.direct.is_empty());
        assert_eq!(report.transfers.len(), 1);
        let hops: Vec<u64> = report.transfers[0].trips().iter().map(|t| t.id().0).collect();
        assert_eq!(hops, vec![1, 2]);
        assert!(report.nearby.is_empty());
        assert!(report.has_results());
    }

    #[test]
    fn direct_match_skips_transfer_search() {
        let catalog = CatalogSnapshot::new(
            vec![
                trip(1, 1, 5, at(6, 1, 9)),
                trip(2, 1, 3, at(6, 1, 10)),
                trip(3, 3, 5, at(6, 1, 12)),
            ],
            vec![],
        );
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();

        let report = planner.plan_leg(&leg(1, 5, Some(date(6, 1))), at(5, 1, 0));

        assert_eq!(ids(&report.direct), vec![1]);
        assert!(report.transfers.is_empty());
        assert!(report.nearby.is_empty());
    }

    #[test]
    fn single_hop_routes_filtered_from_transfers() {
        // Direct trip is on a later day, so the direct matcher misses it but
        // the multi-day transfer search would find it as a one-hop route.
        let catalog = CatalogSnapshot::new(vec![trip(1, 1, 5, at(6, 2, 9))], vec![]);
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();

        let report = planner.plan_leg(&leg(1, 5, Some(date(6, 1))), at(5, 1, 0));

        assert!(report.direct.is_empty());
        assert!(report.transfers.is_empty());
        assert_eq!(ids(&report.nearby), vec![1]);
        assert!(!report.has_results());
    }

    #[test]
    fn nearby_needs_a_date() {
        let catalog = CatalogSnapshot::new(vec![trip(1, 2, 9, at(7, 2, 9))], vec![]);
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();

        let report = planner.plan_leg(&leg(2, 4, None), at(6, 1, 0));
        assert!(report.nearby.is_empty());
        assert!(!report.has_results());
    }

    #[test]
    fn nothing_matches() {
        let catalog = CatalogSnapshot::new(vec![trip(1, 1, 3, at(7, 1, 9))], vec![]);
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();

        let report = planner.plan_leg(&leg(2, 4, Some(date(7, 1))), at(6, 1, 0));
        assert!(report.direct.is_empty());
        assert!(report.transfers.is_empty());
        assert!(report.nearby.is_empty());
    }

    #[test]
    fn past_trip_never_offered() {
        let catalog = CatalogSnapshot::new(
            vec![trip(1, 1, 2, at(6, 1, 8)), trip(2, 2, 3, at(6, 1, 12))],
            vec![],
        );
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();
        let now = at(6, 1, 10);

        for request in [
            leg(1, 2, Some(date(6, 1))),
            leg(1, 2, None),
            leg(1, 3, Some(date(6, 1))),
            leg(1, 2, Some(date(6, 2))),
        ] {
            let report = planner.plan_leg(&request, now);
            let used = report
                .direct
                .iter()
                .chain(report.nearby.iter())
                .chain(report.transfers.iter().flat_map(|r| r.trips().iter()));
            for trip in used {
                assert_ne!(trip.id(), TripId(1));
            }
        }
    }

    #[test]
    fn single_day_policy_excludes_later_first_hop() {
        let catalog = CatalogSnapshot::new(
            vec![trip(1, 1, 3, at(6, 2, 10)), trip(2, 3, 5, at(6, 2, 12))],
            vec![],
        );
        let policy = SearchPolicy {
            allow_multi_day: false,
            ..SearchPolicy::default()
        };
        let planner = Planner::new(&catalog, &policy).unwrap();

        let report = planner.plan_leg(&leg(1, 5, Some(date(6, 1))), at(5, 1, 0));
        assert!(report.transfers.is_empty());
    }

    #[test]
    fn reports_follow_input_order() {
        let catalog = CatalogSnapshot::new(
            vec![trip(1, 1, 2, at(6, 1, 10)), trip(2, 2, 3, at(6, 1, 14))],
            vec![],
        );
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();

        let first = leg(1, 2, Some(date(6, 1)));
        let second = LegRequest {
            destination: Some(LocationId(3)),
            date: Some(date(6, 1)),
            ..LegRequest::follow_on(&first)
        };

        let reports = planner.plan(&[first.clone(), second.clone()], at(5, 1, 0));
        assert_eq!(reports[0].leg, first);
        assert_eq!(ids(&reports[0].direct), vec![1]);
        assert_eq!(reports[1].leg, second);
        assert_eq!(ids(&reports[1].direct), vec![2]);
    }

    #[test]
    fn follow_on_chains_endpoints() {
        let first = leg(1, 2, Some(date(6, 1)));
        let next = LegRequest::follow_on(&first);

        assert_eq!(next.origin, Some(LocationId(2)));
        assert_eq!(next.destination, None);
        assert_eq!(next.date, None);
        assert_eq!(next.transfer_time_mins, DEFAULT_TRANSFER_MINS);
    }

    #[test]
    fn repeated_planning_is_identical() {
        let catalog = CatalogSnapshot::new(
            vec![
                trip(1, 1, 3, at(6, 1, 10)),
                trip(2, 3, 5, at(6, 1, 12)),
                trip(3, 1, 4, at(6, 1, 11)),
                trip(4, 4, 5, at(6, 1, 13)),
            ],
            vec![],
        );
        let policy = SearchPolicy::default();
        let planner = Planner::new(&catalog, &policy).unwrap();
        let legs = [leg(1, 5, Some(date(6, 1))), leg(1, 3, None)];

        let now = at(5, 1, 0);
        assert_eq!(planner.plan(&legs, now), planner.plan(&legs, now));
    }
}
