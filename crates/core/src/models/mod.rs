/// Weekly availability entries and the validated set
pub mod availability;
/// Absolute busy intervals sourced from external calendars
pub mod busy_interval;
