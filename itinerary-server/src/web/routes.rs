//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use futures::future::join_all;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::catalog::CatalogSnapshot;
use crate::domain::{DomainError, Location, TripId};
use crate::planner::{LegRequest, Planner, PolicyError, SearchPolicy};
use crate::slots::{find_alternative_slots, find_conflict};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(plan_search))
        .route("/api/slots", post(check_slots))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan every requested leg over the supplied catalog.
///
/// Legs are independent, so each one runs on its own blocking worker and
/// they share the snapshot read-only.
async fn plan_search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequestBody>,
) -> Result<Json<SearchResponse>, AppError> {
    let policy = match body.policy {
        Some(dto) => SearchPolicy::from(dto),
        None => SearchPolicy::clone(&state.default_policy),
    };
    policy.validate()?;

    // "now" is fixed once for the whole request
    let now = body.now.unwrap_or_else(Utc::now);

    let trips = trips_from_dtos(body.trips)?;
    let locations = body.locations.into_iter().map(Location::from).collect();
    // Trips that have already arrived can never be offered
    let catalog = Arc::new(CatalogSnapshot::new(trips, locations).live(now));
    let policy = Arc::new(policy);
    let legs: Vec<LegRequest> = body.legs.into_iter().map(LegRequest::from).collect();

    info!(
        legs = legs.len(),
        trips = catalog.len(),
        locations = catalog.locations().len(),
        "planning journey"
    );

    let tasks = legs.into_iter().map(|leg| {
        let catalog = Arc::clone(&catalog);
        let policy = Arc::clone(&policy);
        tokio::task::spawn_blocking(move || {
            Planner::new(&catalog, &policy).map(|planner| planner.plan_leg(&leg, now))
        })
    });
    let joined = join_all(tasks).await;

    let mut reports = Vec::with_capacity(joined.len());
    for (position, result) in joined.into_iter().enumerate() {
        let report = result??;
        reports.push(LegReportResult::from_report(position, &report, &catalog, now));
    }

    Ok(Json(SearchResponse { reports }))
}

/// Check whether a track can take a trip; suggest alternatives if not.
async fn check_slots(Json(body): Json<SlotsRequestBody>) -> Result<Json<SlotsResponse>, AppError> {
    if body.arrival <= body.departure {
        return Err(AppError::BadRequest {
            message: "arrival must be after departure".to_string(),
        });
    }

    let trips = trips_from_dtos(body.trips)?;
    let catalog = CatalogSnapshot::new(trips, Vec::new());
    let now = body.now.unwrap_or_else(Utc::now);

    let conflict = find_conflict(
        &catalog,
        body.track,
        body.departure,
        body.arrival,
        body.ignore.map(TripId),
    );

    let alternatives = match conflict {
        Some(_) => find_alternative_slots(
            &catalog,
            body.track,
            body.arrival - body.departure,
            body.departure,
            now,
        )
        .into_iter()
        .map(TimeSlotResult::from)
        .collect(),
        None => Vec::new(),
    };

    Ok(Json(SlotsResponse {
        conflict: conflict.map(ConflictResult::from),
        alternatives,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PolicyError> for AppError {
    fn from(e: PolicyError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("search worker failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
