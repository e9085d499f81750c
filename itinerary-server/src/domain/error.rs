//! Domain error types.
//!
//! These errors represent validation failures when building domain values
//! from caller-supplied catalog data. They are distinct from transport errors.

use super::{LocationId, TripId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Trip arrival is not strictly after its departure
    #[error("trip {0} must arrive after it departs")]
    ArrivalNotAfterDeparture(TripId),

    /// Route has no entries
    #[error("route must have at least one trip")]
    EmptyRoute,

    /// Consecutive trips don't share a location
    #[error("trip ends at {0} but the next trip starts at {1}")]
    Disconnected(LocationId, LocationId),

    /// Next trip leaves before the previous one arrives
    #[error("trip {0} departs before the previous trip arrives")]
    DepartsBeforeArrival(TripId),

    /// Route passes through the same location twice
    #[error("route visits location {0} more than once")]
    RepeatedDestination(LocationId),

    /// Unrecognised lifecycle status string
    #[error("unknown trip status: {0}")]
    UnknownStatus(String),

    /// Unrecognised recurrence string
    #[error("unknown recurrence: {0}")]
    UnknownRecurrence(String),

    /// Recurrence would produce too many copies
    #[error("cannot repeat a trip {0} times")]
    TooManyRecurrences(u32),

    /// A recurring copy's id or times do not fit
    #[error("recurrences of trip {0} are out of range")]
    RecurrenceOutOfRange(TripId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::ArrivalNotAfterDeparture(TripId(7));
        assert_eq!(err.to_string(), "trip #7 must arrive after it departs");

        let err = DomainError::EmptyRoute;
        assert_eq!(err.to_string(), "route must have at least one trip");

        let err = DomainError::Disconnected(LocationId(3), LocationId(4));
        assert_eq!(
            err.to_string(),
            "trip ends at L3 but the next trip starts at L4"
        );

        let err = DomainError::DepartsBeforeArrival(TripId(2));
        assert_eq!(
            err.to_string(),
            "trip #2 departs before the previous trip arrives"
        );

        let err = DomainError::RepeatedDestination(LocationId(1));
        assert_eq!(err.to_string(), "route visits location L1 more than once");

        let err = DomainError::UnknownStatus("Delayed".into());
        assert_eq!(err.to_string(), "unknown trip status: Delayed");

        let err = DomainError::TooManyRecurrences(1000);
        assert_eq!(err.to_string(), "cannot repeat a trip 1000 times");

        let err = DomainError::RecurrenceOutOfRange(TripId(3));
        assert_eq!(err.to_string(), "recurrences of trip #3 are out of range");
    }
}
