//! Itinerary planner.
//!
//! This module implements the search that answers: "which scheduled trips
//! take me from here to there around this date?"
//!
//! Each leg is answered by a direct match, then a time-respecting
//! breadth-first transfer search, then a nearby-date fallback.

mod config;
mod context;
mod direct;
mod nearby;
mod search;
mod transfer;

pub use config::{PolicyError, SearchPolicy};
pub use context::SearchContext;
pub use direct::find_direct;
pub use nearby::find_nearby;
pub use search::{DEFAULT_TRANSFER_MINS, LegReport, LegRequest, Planner};
pub use transfer::{TransferResult, find_transfers};
