//! Search policy for the itinerary planner.

use chrono::Duration;

use crate::domain::days;

/// Error returned for a policy the planner cannot run with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("max_hops must be at least 1")]
    ZeroHops,

    #[error("max_results must be at least 1")]
    ZeroResults,

    #[error("min_connection_mins must not be negative, got {0}")]
    NegativeConnection(i64),

    #[error("min_connection_mins is out of range: {0}")]
    ConnectionOutOfRange(i64),
}

/// Caller-supplied parameters for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Maximum number of trips in a transfer route.
    pub max_hops: usize,

    /// How many days either side of the requested date the nearby search
    /// looks, and the longest layover the transfer search will offer.
    pub nearby_window_days: u32,

    /// Whether a transfer route's first trip may leave on a later day than
    /// the requested date. When false it must leave on that exact date.
    pub allow_multi_day: bool,

    /// Maximum number of transfer routes per leg.
    pub max_results: usize,

    /// Never offer cancelled trips.
    /// Off by default: the caller is expected to filter its snapshot.
    pub exclude_cancelled: bool,

    /// Minimum layover between consecutive trips of a route (minutes).
    pub min_connection_mins: i64,
}

impl SearchPolicy {
    /// Create a new policy with the given parameters.
    pub fn new(
        max_hops: usize,
        nearby_window_days: u32,
        allow_multi_day: bool,
        max_results: usize,
    ) -> Self {
        Self {
            max_hops,
            nearby_window_days,
            allow_multi_day,
            max_results,
            ..Self::default()
        }
    }

    /// Check the policy can drive a search.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_hops == 0 {
            return Err(PolicyError::ZeroHops);
        }
        if self.max_results == 0 {
            return Err(PolicyError::ZeroResults);
        }
        if self.min_connection_mins < 0 {
            return Err(PolicyError::NegativeConnection(self.min_connection_mins));
        }
        if Duration::try_minutes(self.min_connection_mins).is_none() {
            return Err(PolicyError::ConnectionOutOfRange(self.min_connection_mins));
        }
        Ok(())
    }

    /// Returns the nearby window as a Duration.
    pub fn window(&self) -> Duration {
        days(self.nearby_window_days)
    }

    /// Returns the minimum layover as a Duration.
    ///
    /// Negative values count as zero and values too large for a `Duration`
    /// saturate, so an unvalidated policy never panics here.
    pub fn min_connection(&self) -> Duration {
        Duration::try_minutes(self.min_connection_mins.max(0)).unwrap_or(Duration::MAX)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_hops: 2,
            nearby_window_days: 3,
            allow_multi_day: true,
            max_results: 10,
            exclude_cancelled: false,
            min_connection_mins: 0,
        }
    }
}
