//! # In-Memory Collaborators
//!
//! Standalone implementations of the engine's collaborator contracts,
//! used by the server binary and by handler tests. Production
//! deployments substitute a real schedule store and a calendar-backed
//! busy source; nothing in the engine or the handlers depends on these
//! concrete types.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use slotbook_core::models::busy_interval::BusyInterval;
use slotbook_core::sources::{BusyIntervalSource, ProviderSchedule, ScheduleStore};

/// Schedule storage backed by a map. Replacement overwrites the whole
/// schedule for a provider, matching the all-or-nothing contract.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    schedules: RwLock<HashMap<Uuid, ProviderSchedule>>,
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn get_schedule(&self, provider_id: Uuid) -> eyre::Result<Option<ProviderSchedule>> {
        Ok(self.schedules.read().await.get(&provider_id).cloned())
    }

    async fn replace_schedule(
        &self,
        provider_id: Uuid,
        schedule: ProviderSchedule,
    ) -> eyre::Result<()> {
        self.schedules.write().await.insert(provider_id, schedule);
        Ok(())
    }
}

/// Busy intervals kept per provider. A confirmed booking is recorded
/// with [`InMemoryBusySource::add_busy`] so subsequent resolutions
/// exclude it.
#[derive(Debug, Default)]
pub struct InMemoryBusySource {
    intervals: RwLock<HashMap<Uuid, Vec<BusyInterval>>>,
}

impl InMemoryBusySource {
    pub async fn add_busy(&self, provider_id: Uuid, interval: BusyInterval) {
        self.intervals
            .write()
            .await
            .entry(provider_id)
            .or_default()
            .push(interval);
    }
}

#[async_trait]
impl BusyIntervalSource for InMemoryBusySource {
    async fn fetch_busy(
        &self,
        provider_id: Uuid,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> eyre::Result<Vec<BusyInterval>> {
        let intervals = self.intervals.read().await;
        // Closed-range intersection: an interval touching either bound is
        // still returned; the resolver's merge handles the rest.
        Ok(intervals
            .get(&provider_id)
            .map(|all| {
                all.iter()
                    .filter(|interval| interval.start <= range_end && interval.end >= range_start)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}
