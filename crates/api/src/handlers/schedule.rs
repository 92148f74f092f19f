//! # Schedule Handlers
//!
//! Schedule replacement is all-or-nothing: the submitted entry list and
//! zone id are validated as a whole and rejected entirely on any
//! conflict. The validation preview endpoint runs the same checks
//! without persisting anything, so a form can surface per-row
//! diagnostics while the provider is still editing.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use slotbook_core::models::availability::{validate, AvailabilityEntry, ScheduleConflict};
use slotbook_core::sources::ProviderSchedule;

use crate::{middleware::error_handling::AppError, ApiState};

/// Request body for schedule replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceScheduleRequest {
    /// IANA zone id for all wall-clock entries (e.g. "America/Cordoba")
    pub timezone: String,
    pub entries: Vec<AvailabilityEntry>,
}

/// Response body for schedule replacement.
#[derive(Debug, Serialize)]
pub struct ReplaceScheduleResponse {
    pub provider_id: Uuid,
    pub entry_count: usize,
}

/// Request body for the validation preview.
#[derive(Debug, Deserialize)]
pub struct ValidateScheduleRequest {
    pub entries: Vec<AvailabilityEntry>,
}

/// Response body for the validation preview.
#[derive(Debug, Serialize)]
pub struct ValidateScheduleResponse {
    pub valid: bool,
    /// Index-addressed diagnostics; empty when `valid`
    pub conflicts: Vec<ScheduleConflict>,
}

/// Replaces a provider's weekly availability, all-or-nothing.
///
/// # Endpoint
///
/// ```text
/// PUT /api/providers/{provider_id}/schedule
/// ```
///
/// # Errors
///
/// * 422 - unknown zone id, or conflicting/inverted entries (with
///   structured diagnostics; no partial application occurs)
/// * 503 - schedule store unavailable
#[axum::debug_handler]
pub async fn replace_schedule(
    State(state): State<Arc<ApiState>>,
    Path(provider_id): Path<Uuid>,
    Json(request): Json<ReplaceScheduleRequest>,
) -> Result<Json<ReplaceScheduleResponse>, AppError> {
    let entry_count = request.entries.len();
    let schedule = ProviderSchedule {
        timezone: request.timezone,
        entries: request.entries,
    };

    state.engine.replace_schedule(provider_id, schedule).await?;

    info!(%provider_id, entry_count, "schedule replaced");

    Ok(Json(ReplaceScheduleResponse {
        provider_id,
        entry_count,
    }))
}

/// Validates an entry list without applying it.
///
/// # Endpoint
///
/// ```text
/// POST /api/schedule/validate
/// ```
#[axum::debug_handler]
pub async fn validate_schedule(
    Json(request): Json<ValidateScheduleRequest>,
) -> Json<ValidateScheduleResponse> {
    let conflicts = validate(&request.entries);

    Json(ValidateScheduleResponse {
        valid: conflicts.is_empty(),
        conflicts,
    })
}
