use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// One recurring open-hours window, wall-clock in the provider's zone.
///
/// The zone itself is an attribute of the provider's schedule, not of the
/// entry; see [`crate::sources::ProviderSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A structured validation diagnostic, addressed by the position of the
/// offending entry in the submitted list so a caller can map it back to
/// the edited row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleConflict {
    pub index: usize,
    #[serde(flatten)]
    pub kind: ConflictKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictKind {
    /// The entry's `[start, end)` window overlaps another entry on the
    /// same day. The other entry receives its own diagnostic.
    OverlapsWith { other: usize },
    /// The entry has `start_time >= end_time` (zero-length or inverted).
    InvertedWindow,
}

impl fmt::Display for ScheduleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConflictKind::OverlapsWith { other } => {
                write!(f, "entry {} overlaps entry {}", self.index, other)
            }
            ConflictKind::InvertedWindow => {
                write!(f, "entry {} must end after it starts", self.index)
            }
        }
    }
}

/// Checks a submitted entry list for self-consistency.
///
/// Per day, every pair of entries whose half-open windows overlap yields a
/// diagnostic for each member of the pair (identical bounds count as
/// overlapping; touching endpoints do not). Entries with an inverted or
/// zero-length window yield their own diagnostic. An entry that conflicts
/// with several others appears once per conflict.
pub fn validate(entries: &[AvailabilityEntry]) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.start_time >= entry.end_time {
            conflicts.push(ScheduleConflict {
                index,
                kind: ConflictKind::InvertedWindow,
            });
        }

        for (other, candidate) in entries.iter().enumerate() {
            if other == index || candidate.day_of_week != entry.day_of_week {
                continue;
            }
            // Half-open overlap: touching endpoints are allowed.
            if candidate.start_time < entry.end_time && candidate.end_time > entry.start_time {
                conflicts.push(ScheduleConflict {
                    index,
                    kind: ConflictKind::OverlapsWith { other },
                });
            }
        }
    }

    conflicts
}

/// A single `[start, end)` window within one day, in provider wall-clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityWindow {
    /// Whole minutes since midnight for the window start.
    pub fn start_minutes(&self) -> u32 {
        self.start.num_seconds_from_midnight() / 60
    }

    /// Whole minutes since midnight for the window end.
    pub fn end_minutes(&self) -> u32 {
        self.end.num_seconds_from_midnight() / 60
    }
}

/// A provider's validated recurring weekly open hours.
///
/// Construction through [`WeeklyAvailabilitySet::try_new`] is the only way
/// to obtain a value, so holding one guarantees the entries passed
/// validation: downstream code never needs to re-check for overlaps.
#[derive(Debug, Clone, Default)]
pub struct WeeklyAvailabilitySet {
    windows: [Vec<AvailabilityWindow>; 7],
}

impl WeeklyAvailabilitySet {
    /// Builds a validated set from submitted entries, all-or-nothing: any
    /// conflict rejects the whole list and no partial set is produced.
    pub fn try_new(entries: Vec<AvailabilityEntry>) -> Result<Self, Vec<ScheduleConflict>> {
        let conflicts = validate(&entries);
        if !conflicts.is_empty() {
            return Err(conflicts);
        }

        let mut windows: [Vec<AvailabilityWindow>; 7] = Default::default();
        for entry in entries {
            windows[entry.day_of_week.index()].push(AvailabilityWindow {
                start: entry.start_time,
                end: entry.end_time,
            });
        }
        for day in &mut windows {
            day.sort_by_key(|window| window.start);
        }

        Ok(Self { windows })
    }

    /// Windows for one day, ascending by start time. Days with no declared
    /// availability return an empty slice; that is not an error.
    pub fn windows_for(&self, day: DayOfWeek) -> &[AvailabilityWindow] {
        &self.windows[day.index()]
    }
}
