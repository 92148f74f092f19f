/// Schedule replacement and validation handlers
pub mod schedule;
/// Slot resolution handlers
pub mod slots;
