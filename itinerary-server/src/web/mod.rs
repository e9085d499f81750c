//! Web layer for the itinerary server.
//!
//! Provides HTTP endpoints for journey search and track slot checks.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
