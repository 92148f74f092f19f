use thiserror::Error;

use crate::models::availability::ScheduleConflict;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),

    #[error("Weekly availability failed validation: {}", format_conflicts(.0))]
    InvalidSchedule(Vec<ScheduleConflict>),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Fail-safe-closed: when busy data cannot be obtained no slots are
    // emitted, so this is always distinct from "computed zero slots".
    #[error("Upstream source unavailable: {0}")]
    Upstream(eyre::Report),
}

pub type EngineResult<T> = Result<T, EngineError>;

fn format_conflicts(conflicts: &[ScheduleConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
