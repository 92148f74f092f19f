//! # Availability Resolver
//!
//! The core algorithm of the engine: filtering a candidate-instant
//! sequence against a provider's validated weekly availability and the
//! busy intervals already on their calendar.
//!
//! ## Resolution Algorithm
//!
//! For each candidate instant `t`, in input order:
//!
//! 1. Compute the service end `t + duration`.
//! 2. Map `t` to provider wall clock and look up that day's windows.
//! 3. Reject if the day has no windows; a booking is only offered when it
//!    fits entirely within a single day's declared windows, so the next
//!    day is never consulted even for a span that would cross midnight.
//! 4. Accept only if some window `[ws, we)` satisfies `ws <= time(t)` and
//!    `time(t) + duration <= we` (boundary inclusive).
//! 5. Reject if `[t, t + duration)` intersects any busy interval.
//!
//! All duration arithmetic is in whole minutes and comparisons are
//! instant-exact. The function is pure: identical inputs produce
//! identical output, and concurrent calls need no coordination.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::generator::SlotCandidates;
use crate::models::availability::{validate, WeeklyAvailabilitySet};
use crate::models::busy_interval::{merge_busy_intervals, BusyInterval};
use crate::sources::{BusyIntervalSource, ProviderSchedule, ScheduleStore};
use crate::timezone::TimezoneNormalizer;

/// Filters candidate instants down to bookable start instants.
///
/// `schedule` is already validated by construction, so the malformed-set
/// precondition of the algorithm is enforced by the type. Output keeps
/// the input order; duplicates in the input produce duplicates in the
/// output (the generator is responsible for not producing any). An empty
/// candidate sequence yields an empty result, not an error.
///
/// # Errors
///
/// * `EngineError::Precondition` - `service_duration_minutes` is zero
pub fn resolve_slots(
    candidates: impl IntoIterator<Item = DateTime<Utc>>,
    schedule: &WeeklyAvailabilitySet,
    busy: &[BusyInterval],
    service_duration_minutes: u32,
    normalizer: &TimezoneNormalizer,
) -> EngineResult<Vec<DateTime<Utc>>> {
    if service_duration_minutes == 0 {
        return Err(EngineError::Precondition(
            "service duration must be positive".to_string(),
        ));
    }

    let duration = Duration::minutes(i64::from(service_duration_minutes));
    let busy = merge_busy_intervals(busy.to_vec());

    let mut accepted = Vec::new();
    for candidate in candidates {
        let candidate_end = candidate + duration;
        let wall = normalizer.to_wall_clock(candidate);

        // Same-day-only: minute arithmetic past midnight can never satisfy
        // `end_minutes <= window.end`, and the next day's windows are not
        // consulted.
        let start_minutes = wall.time.num_seconds_from_midnight() / 60;
        let end_minutes = start_minutes + service_duration_minutes;

        let windows = schedule.windows_for(wall.day_of_week());
        let fits = windows
            .iter()
            .any(|window| window.start_minutes() <= start_minutes && end_minutes <= window.end_minutes());
        if !fits {
            continue;
        }

        // Merged intervals are sorted and disjoint: the first one ending
        // after the candidate start is the only possible collision.
        let next = busy.partition_point(|interval| interval.end <= candidate);
        if let Some(interval) = busy.get(next) {
            if interval.start < candidate_end {
                continue;
            }
        }

        accepted.push(candidate);
    }

    Ok(accepted)
}

/// The orchestrating entry point over the collaborator contracts.
///
/// Holds no mutable state; cloning shares the underlying collaborators
/// and concurrent resolutions need no coordination.
#[derive(Clone)]
pub struct Engine {
    schedule_store: Arc<dyn ScheduleStore>,
    busy_source: Arc<dyn BusyIntervalSource>,
}

impl Engine {
    pub fn new(
        schedule_store: Arc<dyn ScheduleStore>,
        busy_source: Arc<dyn BusyIntervalSource>,
    ) -> Self {
        Self {
            schedule_store,
            busy_source,
        }
    }

    /// Resolves the bookable start instants for one provider.
    ///
    /// Busy intervals are fetched once up front before the per-candidate
    /// loop; there is no interleaved fetching. A busy-source failure
    /// aborts resolution (fail-safe-closed) so the provider is never
    /// treated as fully free.
    ///
    /// # Errors
    ///
    /// * `EngineError::Precondition` - non-positive service duration
    /// * `EngineError::InvalidParameter` - non-positive step
    /// * `EngineError::NotFound` - provider has no stored schedule
    /// * `EngineError::InvalidTimezone` - stored zone id is unknown
    /// * `EngineError::InvalidSchedule` - stored entries fail validation
    /// * `EngineError::Upstream` - schedule store or busy source failed
    pub async fn resolve(
        &self,
        provider_id: Uuid,
        service_duration_minutes: u32,
        horizon_start: DateTime<Utc>,
        horizon_end: DateTime<Utc>,
        step_minutes: u32,
    ) -> EngineResult<Vec<DateTime<Utc>>> {
        if service_duration_minutes == 0 {
            return Err(EngineError::Precondition(
                "service duration must be positive".to_string(),
            ));
        }

        let schedule = self
            .schedule_store
            .get_schedule(provider_id)
            .await
            .map_err(EngineError::Upstream)?
            .ok_or_else(|| {
                EngineError::NotFound(format!("No schedule for provider {provider_id}"))
            })?;

        let normalizer = TimezoneNormalizer::new(&schedule.timezone)?;
        let availability =
            WeeklyAvailabilitySet::try_new(schedule.entries).map_err(EngineError::InvalidSchedule)?;

        let candidates = SlotCandidates::new(horizon_start, horizon_end, step_minutes)?;

        // Candidates near the horizon end have service intervals reaching
        // past it; the busy fetch must cover those too or a booking
        // committed just after the horizon would never be seen.
        let busy_range_end =
            horizon_end + Duration::minutes(i64::from(service_duration_minutes));
        let busy = self
            .busy_source
            .fetch_busy(provider_id, horizon_start, busy_range_end)
            .await
            .map_err(EngineError::Upstream)?;
        resolve_slots(
            candidates,
            &availability,
            &busy,
            service_duration_minutes,
            &normalizer,
        )
    }

    /// Validated, all-or-nothing schedule replacement.
    ///
    /// The zone id and the full entry list are checked first; any
    /// conflict rejects the whole set and nothing reaches the store.
    pub async fn replace_schedule(
        &self,
        provider_id: Uuid,
        schedule: ProviderSchedule,
    ) -> EngineResult<()> {
        TimezoneNormalizer::new(&schedule.timezone)?;

        let conflicts = validate(&schedule.entries);
        if !conflicts.is_empty() {
            return Err(EngineError::InvalidSchedule(conflicts));
        }

        self.schedule_store
            .replace_schedule(provider_id, schedule)
            .await
            .map_err(EngineError::Upstream)
    }
}
