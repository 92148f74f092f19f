use chrono::{DateTime, Duration, Timelike, Utc};

use crate::errors::{EngineError, EngineResult};

/// A lazy, finite sequence of candidate start instants across a booking
/// horizon.
///
/// The first candidate is `from` ceiled to the next multiple of
/// `step_minutes` on its minute component (a non-zero seconds or
/// sub-second part rounds up); iteration ends strictly before `to`. The
/// iterator is `Clone`, so a sequence can be restarted by cloning the
/// freshly constructed value. A horizon with `from >= to` is an empty
/// sequence, not an error.
#[derive(Debug, Clone)]
pub struct SlotCandidates {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
}

impl SlotCandidates {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, step_minutes: u32) -> EngineResult<Self> {
        if step_minutes == 0 {
            return Err(EngineError::InvalidParameter(
                "step_minutes must be positive".to_string(),
            ));
        }

        Ok(Self {
            cursor: ceil_to_step(from, step_minutes),
            end: to,
            step: Duration::minutes(i64::from(step_minutes)),
        })
    }
}

impl Iterator for SlotCandidates {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.end {
            return None;
        }
        let candidate = self.cursor;
        self.cursor += self.step;
        Some(candidate)
    }
}

/// Ceils an instant to the next `step_minutes` boundary past the top of
/// its hour. An instant already on a boundary (with no sub-minute part)
/// is returned unchanged.
fn ceil_to_step(instant: DateTime<Utc>, step_minutes: u32) -> DateTime<Utc> {
    let step = i64::from(step_minutes);
    let minute = i64::from(instant.minute());
    let sub_minute = Duration::seconds(i64::from(instant.second()))
        + Duration::nanoseconds(i64::from(instant.nanosecond()));

    let hour_start = instant - Duration::minutes(minute) - sub_minute;
    let offset = if sub_minute.is_zero() { minute } else { minute + 1 };
    let ceiled = offset.div_euclid(step) * step + if offset.rem_euclid(step) == 0 { 0 } else { step };

    hour_start + Duration::minutes(ceiled)
}
