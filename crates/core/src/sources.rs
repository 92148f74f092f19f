use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::availability::AvailabilityEntry;
use crate::models::busy_interval::BusyInterval;

/// A provider's schedule as stored: an IANA zone id plus the raw weekly
/// entries. Stored data is not trusted; the engine validates both before
/// resolving against them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSchedule {
    pub timezone: String,
    pub entries: Vec<AvailabilityEntry>,
}

/// Access to provider schedule configuration, implemented elsewhere.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn get_schedule(&self, provider_id: Uuid) -> eyre::Result<Option<ProviderSchedule>>;

    /// Persists a replacement schedule. The engine validates the set
    /// before calling this, so stores only ever see consistent data.
    async fn replace_schedule(
        &self,
        provider_id: Uuid,
        schedule: ProviderSchedule,
    ) -> eyre::Result<()>;
}

/// Already-committed intervals on the provider's external calendar.
///
/// Returned intervals all intersect the requested range at least
/// partially, but carry no ordering or disjointness guarantee; callers
/// must normalize with
/// [`merge_busy_intervals`](crate::models::busy_interval::merge_busy_intervals).
/// A fetch error means "no busy information available" and resolution
/// must fail closed rather than treat the provider as fully free.
#[async_trait]
pub trait BusyIntervalSource: Send + Sync {
    async fn fetch_busy(
        &self,
        provider_id: Uuid,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> eyre::Result<Vec<BusyInterval>>;
}
