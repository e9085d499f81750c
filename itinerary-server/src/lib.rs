//! Itinerary search server.
//!
//! Answers "which scheduled trips take me from here to there around this
//! date?" over a caller-supplied catalog, with direct matches, multi-hop
//! transfer routes and nearby-date alternatives. Also checks track
//! occupancy for proposed trips.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod slots;
pub mod web;
