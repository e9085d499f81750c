//! Per-invocation search context.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::catalog::CatalogSnapshot;
use crate::domain::{LocationId, TripEntry};

use super::config::SearchPolicy;

/// Everything one search invocation reads: the snapshot, the policy and the
/// instant treated as "now".
///
/// `now` is fixed when the context is built and used for every comparison
/// in the invocation.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub catalog: &'a CatalogSnapshot,
    pub policy: &'a SearchPolicy,
    pub now: DateTime<Utc>,
}

impl<'a> SearchContext<'a> {
    pub fn new(catalog: &'a CatalogSnapshot, policy: &'a SearchPolicy, now: DateTime<Utc>) -> Self {
        Self {
            catalog,
            policy,
            now,
        }
    }

    /// Whether a trip may be offered at all: it has not departed yet, and it
    /// is not cancelled when the policy excludes cancellations.
    pub fn is_offerable(&self, trip: &TripEntry) -> bool {
        if trip.departure() < self.now {
            return false;
        }
        !(self.policy.exclude_cancelled && trip.is_cancelled())
    }

    /// Trips matching optional endpoint filters, in catalog order.
    ///
    /// An absent filter matches everything. Uses the origin index when an
    /// origin is given.
    pub fn trips_between(
        &self,
        origin: Option<LocationId>,
        destination: Option<LocationId>,
    ) -> Vec<&'a Arc<TripEntry>> {
        let matches_destination =
            move |trip: &&'a Arc<TripEntry>| destination.is_none_or(|d| trip.destination() == d);

        match origin {
            Some(origin) => self
                .catalog
                .departures_from(origin)
                .filter(matches_destination)
                .collect(),
            None => self
                .catalog
                .trips()
                .iter()
                .filter(matches_destination)
                .collect(),
        }
    }
}
