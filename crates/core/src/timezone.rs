use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{EngineError, EngineResult};
use crate::models::availability::DayOfWeek;

/// A provider-local calendar date and wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl WallClock {
    pub fn day_of_week(&self) -> DayOfWeek {
        self.date.weekday().into()
    }
}

/// Converts between absolute instants and the provider's wall clock.
///
/// This is the single point of truth for UTC-offset math, including
/// daylight-saving transitions; everything else in the engine operates on
/// either pure instants or pure wall-clock values.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneNormalizer {
    tz: Tz,
}

impl TimezoneNormalizer {
    /// An unknown IANA zone id is a fatal configuration error.
    pub fn new(zone_id: &str) -> EngineResult<Self> {
        let tz = zone_id
            .parse::<Tz>()
            .map_err(|_| EngineError::InvalidTimezone(zone_id.to_string()))?;
        Ok(Self { tz })
    }

    pub fn zone_id(&self) -> &'static str {
        self.tz.name()
    }

    /// Maps an instant to the provider-local date and time. Total: every
    /// instant has exactly one local representation.
    pub fn to_wall_clock(&self, instant: DateTime<Utc>) -> WallClock {
        let local = instant.with_timezone(&self.tz);
        WallClock {
            date: local.date_naive(),
            time: local.time(),
        }
    }

    /// Maps a provider-local date and time back to an instant.
    ///
    /// Wall times inside a daylight-saving gap do not exist and yield
    /// `None`; ambiguous times in a fold resolve to the earlier offset.
    pub fn to_instant(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        match self.tz.from_local_datetime(&date.and_time(time)) {
            LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
            LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }
}
