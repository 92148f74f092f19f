use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An absolute time range already committed on the provider's calendar.
///
/// Calendar payloads are adapted into this type at the boundary; the
/// resolver never sees optional or loosely-typed calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Half-open overlap test against a candidate `[start, end)` interval.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Normalizes busy intervals fetched from an external source.
///
/// Upstream guarantees nothing: the list may be unsorted, intervals may
/// overlap each other, and zero-duration degenerates may be present. The
/// result is sorted, disjoint, and free of empty intervals, which the
/// resolver relies on for its early-exit scan. An empty interval blocks
/// nothing under half-open semantics, so dropping them here also keeps
/// the naive overlap test from misfiring on `start == end` entries.
pub fn merge_busy_intervals(mut intervals: Vec<BusyInterval>) -> Vec<BusyInterval> {
    intervals.retain(|interval| interval.start < interval.end);
    intervals.sort_by_key(|interval| interval.start);

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                if interval.end > last.end {
                    last.end = interval.end;
                }
            }
            _ => merged.push(interval),
        }
    }

    merged
}
