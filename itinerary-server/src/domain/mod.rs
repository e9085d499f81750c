//! Domain types for the itinerary search.
//!
//! This module contains the core domain model types that represent
//! validated catalog data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod location;
mod recurrence;
mod route;
mod time;
mod trip;

pub use error::DomainError;
pub use location::{Location, LocationId};
pub use recurrence::{MAX_RECURRENCES, Recurrence, expand_recurring};
pub use route::Route;
pub use time::{abs_distance, days, falls_on, start_of_day};
pub use trip::{TripEntry, TripId, TripStatus, VehicleId};
