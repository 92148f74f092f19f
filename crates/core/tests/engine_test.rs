use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use slotbook_core::errors::EngineError;
use slotbook_core::models::availability::{AvailabilityEntry, DayOfWeek};
use slotbook_core::models::busy_interval::BusyInterval;
use slotbook_core::resolver::Engine;
use slotbook_core::sources::{BusyIntervalSource, ProviderSchedule, ScheduleStore};
use uuid::Uuid;

struct FixedScheduleStore {
    schedule: Option<ProviderSchedule>,
    replaced: Mutex<Option<ProviderSchedule>>,
}

impl FixedScheduleStore {
    fn with(schedule: ProviderSchedule) -> Self {
        Self {
            schedule: Some(schedule),
            replaced: Mutex::new(None),
        }
    }

    fn empty() -> Self {
        Self {
            schedule: None,
            replaced: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ScheduleStore for FixedScheduleStore {
    async fn get_schedule(&self, _provider_id: Uuid) -> eyre::Result<Option<ProviderSchedule>> {
        Ok(self.schedule.clone())
    }

    async fn replace_schedule(
        &self,
        _provider_id: Uuid,
        schedule: ProviderSchedule,
    ) -> eyre::Result<()> {
        *self.replaced.lock().expect("lock poisoned") = Some(schedule);
        Ok(())
    }
}

struct StaticBusySource {
    intervals: Vec<BusyInterval>,
}

#[async_trait]
impl BusyIntervalSource for StaticBusySource {
    async fn fetch_busy(
        &self,
        _provider_id: Uuid,
        _range_start: DateTime<Utc>,
        _range_end: DateTime<Utc>,
    ) -> eyre::Result<Vec<BusyInterval>> {
        Ok(self.intervals.clone())
    }
}

/// Honors the fetch contract: returns only intervals intersecting the
/// closed requested range, and records what range was asked for.
struct RangeBoundBusySource {
    intervals: Vec<BusyInterval>,
    requested: Mutex<Option<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl RangeBoundBusySource {
    fn with(intervals: Vec<BusyInterval>) -> Self {
        Self {
            intervals,
            requested: Mutex::new(None),
        }
    }
}

#[async_trait]
impl BusyIntervalSource for RangeBoundBusySource {
    async fn fetch_busy(
        &self,
        _provider_id: Uuid,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> eyre::Result<Vec<BusyInterval>> {
        *self.requested.lock().expect("lock poisoned") = Some((range_start, range_end));
        Ok(self
            .intervals
            .iter()
            .filter(|interval| interval.start <= range_end && interval.end >= range_start)
            .copied()
            .collect())
    }
}

struct FailingBusySource;

#[async_trait]
impl BusyIntervalSource for FailingBusySource {
    async fn fetch_busy(
        &self,
        _provider_id: Uuid,
        _range_start: DateTime<Utc>,
        _range_end: DateTime<Utc>,
    ) -> eyre::Result<Vec<BusyInterval>> {
        Err(eyre::eyre!("calendar unreachable"))
    }
}

fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").expect("invalid test time")
}

fn monday_schedule(timezone: &str) -> ProviderSchedule {
    ProviderSchedule {
        timezone: timezone.to_string(),
        entries: vec![AvailabilityEntry {
            day_of_week: DayOfWeek::Monday,
            start_time: time("09:00"),
            end_time: time("17:00"),
        }],
    }
}

/// Local Monday in America/Cordoba (UTC-3), as UTC instants.
fn monday_utc(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour + 3, minute, 0)
        .single()
        .expect("invalid test instant")
}

#[test]
fn test_resolve_end_to_end() {
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::with(monday_schedule("America/Cordoba"))),
        Arc::new(StaticBusySource {
            intervals: vec![BusyInterval::new(monday_utc(10, 0), monday_utc(10, 30))],
        }),
    );

    let slots = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        30,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ))
    .expect("resolution succeeds");

    assert_eq!(
        slots,
        vec![
            monday_utc(9, 0),
            monday_utc(9, 15),
            monday_utc(9, 30),
            monday_utc(10, 30),
            monday_utc(10, 45),
            monday_utc(11, 0),
            monday_utc(11, 15),
            monday_utc(11, 30),
            monday_utc(11, 45),
        ]
    );
}

#[test]
fn test_resolve_sees_bookings_straddling_the_horizon_end() {
    // A booking committed at local 12:00 must block the 11:45 slot even
    // though the horizon ends at 12:00 and the source only returns
    // intervals intersecting the requested range.
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::with(monday_schedule("America/Cordoba"))),
        Arc::new(RangeBoundBusySource::with(vec![BusyInterval::new(
            monday_utc(12, 0),
            monday_utc(12, 30),
        )])),
    );

    let slots = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        30,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ))
    .expect("resolution succeeds");

    assert!(!slots.contains(&monday_utc(11, 45)));
    // 11:30-12:00 only touches the booking, half-open.
    assert_eq!(slots.last(), Some(&monday_utc(11, 30)));
}

#[test]
fn test_busy_fetch_range_extends_by_the_service_duration() {
    let source = Arc::new(RangeBoundBusySource::with(vec![]));
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::with(monday_schedule("America/Cordoba"))),
        source.clone(),
    );

    tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        45,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ))
    .expect("resolution succeeds");

    let requested = source
        .requested
        .lock()
        .expect("lock poisoned")
        .expect("fetch was issued");
    assert_eq!(
        requested,
        (
            monday_utc(9, 0),
            monday_utc(12, 0) + chrono::Duration::minutes(45)
        )
    );
}

#[test]
fn test_resolve_fails_closed_when_busy_source_is_down() {
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::with(monday_schedule("America/Cordoba"))),
        Arc::new(FailingBusySource),
    );

    let result = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        30,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ));

    // Never a slot list computed as if no bookings existed.
    assert!(matches!(result, Err(EngineError::Upstream(_))));
}

#[test]
fn test_resolve_unknown_provider_is_not_found() {
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::empty()),
        Arc::new(StaticBusySource { intervals: vec![] }),
    );

    let result = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        30,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ));

    assert!(matches!(result, Err(EngineError::NotFound(_))));
}

#[test]
fn test_resolve_rejects_unknown_stored_timezone() {
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::with(monday_schedule("Mars/Olympus"))),
        Arc::new(StaticBusySource { intervals: vec![] }),
    );

    let result = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        30,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ));

    assert!(matches!(result, Err(EngineError::InvalidTimezone(_))));
}

#[test]
fn test_resolve_rejects_malformed_stored_schedule() {
    let mut schedule = monday_schedule("America/Cordoba");
    schedule.entries.push(AvailabilityEntry {
        day_of_week: DayOfWeek::Monday,
        start_time: time("11:00"),
        end_time: time("14:00"),
    });

    let engine = Engine::new(
        Arc::new(FixedScheduleStore::with(schedule)),
        Arc::new(StaticBusySource { intervals: vec![] }),
    );

    let result = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        30,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ));

    match result {
        Err(EngineError::InvalidSchedule(conflicts)) => {
            assert_eq!(conflicts.len(), 2);
        }
        other => panic!("expected InvalidSchedule, got {other:?}"),
    }
}

#[test]
fn test_resolve_rejects_zero_duration_before_any_fetch() {
    let engine = Engine::new(
        Arc::new(FixedScheduleStore::empty()),
        Arc::new(FailingBusySource),
    );

    let result = tokio_test::block_on(engine.resolve(
        Uuid::new_v4(),
        0,
        monday_utc(9, 0),
        monday_utc(12, 0),
        15,
    ));

    assert!(matches!(result, Err(EngineError::Precondition(_))));
}

#[test]
fn test_replace_schedule_persists_valid_set() {
    let store = Arc::new(FixedScheduleStore::empty());
    let engine = Engine::new(store.clone(), Arc::new(StaticBusySource { intervals: vec![] }));
    let schedule = monday_schedule("America/Cordoba");

    tokio_test::block_on(engine.replace_schedule(Uuid::new_v4(), schedule.clone()))
        .expect("replace succeeds");

    assert_eq!(
        store.replaced.lock().expect("lock poisoned").as_ref(),
        Some(&schedule)
    );
}

#[test]
fn test_replace_schedule_rejects_conflicting_set_entirely() {
    let store = Arc::new(FixedScheduleStore::empty());
    let engine = Engine::new(store.clone(), Arc::new(StaticBusySource { intervals: vec![] }));

    let mut schedule = monday_schedule("America/Cordoba");
    schedule.entries.push(AvailabilityEntry {
        day_of_week: DayOfWeek::Monday,
        start_time: time("16:00"),
        end_time: time("18:00"),
    });

    let result = tokio_test::block_on(engine.replace_schedule(Uuid::new_v4(), schedule));

    assert!(matches!(result, Err(EngineError::InvalidSchedule(_))));
    // No partial application of the valid entries.
    assert_eq!(*store.replaced.lock().expect("lock poisoned"), None);
}

#[test]
fn test_replace_schedule_rejects_unknown_timezone() {
    let store = Arc::new(FixedScheduleStore::empty());
    let engine = Engine::new(store.clone(), Arc::new(StaticBusySource { intervals: vec![] }));

    let result =
        tokio_test::block_on(engine.replace_schedule(Uuid::new_v4(), monday_schedule("Nope/Nope")));

    assert!(matches!(result, Err(EngineError::InvalidTimezone(_))));
}
