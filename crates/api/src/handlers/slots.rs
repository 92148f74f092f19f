//! # Slot Resolution Handlers
//!
//! Exposes the availability engine over HTTP. The engine itself takes an
//! explicit horizon and step; the booking-page policy of "from now,
//! ceiled to the step, until end of day two months ahead, every 15
//! minutes" is applied here when the caller omits those parameters.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Default candidate granularity, in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 15;

/// Default forward booking window, in months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 2;

/// Query parameters for the slot resolution endpoint.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Service duration in whole minutes; must be positive
    pub duration_minutes: u32,

    /// Candidate granularity in minutes (default: 15)
    pub step_minutes: Option<u32>,

    /// Horizon start (default: now)
    pub from: Option<DateTime<Utc>>,

    /// Horizon end, exclusive (default: end of day two months after `from`)
    pub to: Option<DateTime<Utc>>,
}

/// Response body for the slot resolution endpoint.
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub provider_id: Uuid,
    /// Bookable start instants, ascending, RFC 3339
    pub slots: Vec<DateTime<Utc>>,
}

/// Resolves the bookable start instants for a provider.
///
/// # Endpoint
///
/// ```text
/// GET /api/providers/{provider_id}/slots?duration_minutes=30&step_minutes=15
/// ```
///
/// # Errors
///
/// * 400 - non-positive duration or step
/// * 404 - provider has no stored schedule
/// * 422 - stored schedule has an unknown zone or fails validation
/// * 503 - busy-interval source unavailable (no slots are offered rather
///   than risking a double booking)
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let step_minutes = query.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES);
    let from = query.from.unwrap_or_else(Utc::now);
    let to = query
        .to
        .unwrap_or_else(|| end_of_day(from + Months::new(DEFAULT_HORIZON_MONTHS)));

    debug!(%provider_id, step_minutes, %from, %to, "resolving slots");

    let slots = state
        .engine
        .resolve(provider_id, query.duration_minutes, from, to, step_minutes)
        .await?;

    Ok(Json(SlotsResponse { provider_id, slots }))
}

/// First instant after `instant` that starts a new UTC day. The horizon
/// end is exclusive, so this covers the whole final day.
fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
}
