/// Health and version endpoints
pub mod health;
/// Schedule management endpoints
pub mod schedule;
/// Slot resolution endpoints
pub mod slots;
