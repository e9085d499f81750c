//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSnapshot;
use crate::domain::{
    DomainError, Location, LocationId, Recurrence, Route, TripEntry, TripId, TripStatus,
    VehicleId, expand_recurring,
};
use crate::planner::{LegReport, LegRequest, SearchPolicy};
use crate::slots::{SlotConflict, TimeSlot};

/// A location in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl From<LocationDto> for Location {
    fn from(dto: LocationDto) -> Self {
        Location {
            id: LocationId(dto.id),
            name: dto.name,
            code: dto.code,
        }
    }
}

/// A scheduled trip, as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    pub id: u64,
    pub vehicle_id: u64,
    pub track: u32,
    pub origin: u64,
    pub destination: u64,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,

    /// Lifecycle status; defaults to "Scheduled"
    #[serde(default)]
    pub status: Option<String>,

    /// "none", "daily", "weekly" or "monthly"; defaults to "none"
    #[serde(default)]
    pub recurrence: Option<String>,

    /// Number of later copies to generate when the trip recurs
    #[serde(default)]
    pub recur_count: u32,
}

impl TripDto {
    fn recurrence(&self) -> Result<Recurrence, DomainError> {
        match self.recurrence.as_deref() {
            Some(s) => s.parse(),
            None => Ok(Recurrence::None),
        }
    }
}

impl TryFrom<TripDto> for TripEntry {
    type Error = DomainError;

    fn try_from(dto: TripDto) -> Result<Self, Self::Error> {
        let status = match dto.status.as_deref() {
            Some(s) => s.parse::<TripStatus>()?,
            None => TripStatus::default(),
        };

        Ok(TripEntry::new(
            TripId(dto.id),
            VehicleId(dto.vehicle_id),
            dto.track,
            LocationId(dto.origin),
            LocationId(dto.destination),
            dto.departure,
            dto.arrival,
        )?
        .with_status(status))
    }
}

/// Convert caller trips into domain trips, failing on the first invalid one.
///
/// Recurring trips are followed by their generated copies, which take fresh
/// ids above the largest id supplied.
pub fn trips_from_dtos(trips: Vec<TripDto>) -> Result<Vec<TripEntry>, DomainError> {
    let mut next_id = trips.iter().map(|t| t.id).max().map_or(0, |id| id.saturating_add(1));
    let mut catalog = Vec::with_capacity(trips.len());

    for dto in trips {
        let recurrence = dto.recurrence()?;
        let count = dto.recur_count;
        let trip = TripEntry::try_from(dto)?;

        let copies = expand_recurring(&trip, recurrence, count, TripId(next_id))?;
        next_id = next_id.saturating_add(copies.len() as u64);

        catalog.push(trip);
        catalog.extend(copies);
    }

    Ok(catalog)
}

/// A trip in results.
#[derive(Debug, Clone, Serialize)]
pub struct TripResult {
    pub id: u64,
    pub vehicle_id: u64,
    pub track: u32,
    pub origin: u64,
    pub destination: u64,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,

    /// Status recorded in the catalog
    pub status: &'static str,

    /// Status at the time of the search
    pub effective_status: &'static str,
}

impl TripResult {
    pub fn from_trip(trip: &TripEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: trip.id().0,
            vehicle_id: trip.vehicle().0,
            track: trip.track(),
            origin: trip.origin().0,
            destination: trip.destination().0,
            departure: trip.departure(),
            arrival: trip.arrival(),
            status: trip.status().as_str(),
            effective_status: trip.effective_status(now).as_str(),
        }
    }
}

/// A multi-trip route in results.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub trips: Vec<TripResult>,
    pub hop_count: usize,

    /// Locations where the traveller changes
    pub interchanges: Vec<u64>,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub total_minutes: i64,
}

impl RouteResult {
    pub fn from_route(route: &Route, now: DateTime<Utc>) -> Self {
        Self {
            trips: route
                .trips()
                .iter()
                .map(|t| TripResult::from_trip(t, now))
                .collect(),
            hop_count: route.hop_count(),
            interchanges: route.interchanges().map(|l| l.0).collect(),
            departure: route.departure(),
            arrival: route.arrival(),
            total_minutes: route.total_duration().num_minutes(),
        }
    }
}

/// One requested leg.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    #[serde(default)]
    pub origin: Option<u64>,
    #[serde(default)]
    pub destination: Option<u64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub transfer_time_mins: i64,
}

impl From<LegDto> for LegRequest {
    fn from(dto: LegDto) -> Self {
        LegRequest::new(
            dto.origin.map(LocationId),
            dto.destination.map(LocationId),
            dto.date,
        )
        .with_transfer_time(dto.transfer_time_mins)
    }
}

/// Search policy overrides; omitted fields take their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyDto {
    pub max_hops: usize,
    pub nearby_window_days: u32,
    pub allow_multi_day: bool,
    pub max_results: usize,
    pub exclude_cancelled: bool,
    pub min_connection_mins: i64,
}

impl Default for PolicyDto {
    fn default() -> Self {
        SearchPolicy::default().into()
    }
}

impl From<SearchPolicy> for PolicyDto {
    fn from(p: SearchPolicy) -> Self {
        Self {
            max_hops: p.max_hops,
            nearby_window_days: p.nearby_window_days,
            allow_multi_day: p.allow_multi_day,
            max_results: p.max_results,
            exclude_cancelled: p.exclude_cancelled,
            min_connection_mins: p.min_connection_mins,
        }
    }
}

impl From<PolicyDto> for SearchPolicy {
    fn from(dto: PolicyDto) -> Self {
        SearchPolicy {
            max_hops: dto.max_hops,
            nearby_window_days: dto.nearby_window_days,
            allow_multi_day: dto.allow_multi_day,
            max_results: dto.max_results,
            exclude_cancelled: dto.exclude_cancelled,
            min_connection_mins: dto.min_connection_mins,
        }
    }
}

/// Request to plan a journey over a supplied catalog.
#[derive(Debug, Deserialize)]
pub struct SearchRequestBody {
    #[serde(default)]
    pub locations: Vec<LocationDto>,
    pub trips: Vec<TripDto>,
    pub legs: Vec<LegDto>,

    /// Overrides the server's default policy
    #[serde(default)]
    pub policy: Option<PolicyDto>,

    /// Instant to treat as "now"; defaults to the server clock
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Results for one leg.
#[derive(Debug, Serialize)]
pub struct LegReportResult {
    /// 1-based position of the leg in the request
    pub leg: usize,
    pub origin: Option<u64>,
    pub destination: Option<u64>,
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub transfer_time_mins: i64,
    pub direct: Vec<TripResult>,
    pub transfers: Vec<RouteResult>,
    pub nearby: Vec<TripResult>,
    pub has_results: bool,
}

impl LegReportResult {
    pub fn from_report(
        position: usize,
        report: &LegReport,
        catalog: &CatalogSnapshot,
        now: DateTime<Utc>,
    ) -> Self {
        let name = |id: Option<LocationId>| {
            id.and_then(|id| catalog.location_name(id))
                .map(str::to_string)
        };

        Self {
            leg: position + 1,
            origin: report.leg.origin.map(|l| l.0),
            destination: report.leg.destination.map(|l| l.0),
            origin_name: name(report.leg.origin),
            destination_name: name(report.leg.destination),
            date: report.leg.date,
            transfer_time_mins: report.leg.transfer_time_mins,
            direct: report
                .direct
                .iter()
                .map(|t| TripResult::from_trip(t, now))
                .collect(),
            transfers: report
                .transfers
                .iter()
                .map(|r| RouteResult::from_route(r, now))
                .collect(),
            nearby: report
                .nearby
                .iter()
                .map(|t| TripResult::from_trip(t, now))
                .collect(),
            has_results: report.has_results(),
        }
    }
}

/// Response from journey planning.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub reports: Vec<LegReportResult>,
}

/// Request to check a track occupation and suggest alternatives.
#[derive(Debug, Deserialize)]
pub struct SlotsRequestBody {
    pub trips: Vec<TripDto>,
    pub track: u32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,

    /// Trip being rescheduled, excluded from the check
    #[serde(default)]
    pub ignore: Option<u64>,

    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// A detected track conflict.
#[derive(Debug, Serialize)]
pub struct ConflictResult {
    pub kind: &'static str,
    pub trip_id: u64,
    pub message: String,
}

impl From<SlotConflict> for ConflictResult {
    fn from(conflict: SlotConflict) -> Self {
        let (kind, trip) = match conflict {
            SlotConflict::Overlap(id) => ("overlap", id),
            SlotConflict::TooSoonAfter(id) => ("too_soon_after", id),
            SlotConflict::TooSoonBefore(id) => ("too_soon_before", id),
        };
        Self {
            kind,
            trip_id: trip.0,
            message: conflict.to_string(),
        }
    }
}

/// A free slot on a track.
#[derive(Debug, Serialize)]
pub struct TimeSlotResult {
    pub track: u32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

impl From<TimeSlot> for TimeSlotResult {
    fn from(slot: TimeSlot) -> Self {
        Self {
            track: slot.track,
            departure: slot.departure,
            arrival: slot.arrival,
        }
    }
}

/// Response from a slot check.
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    /// Present when the requested occupation is not possible
    pub conflict: Option<ConflictResult>,

    /// Suggested free slots of the same duration; empty without a conflict
    pub alternatives: Vec<TimeSlotResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
