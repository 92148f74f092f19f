//! # Slotbook Core
//!
//! The core crate implements the availability resolution engine for the
//! Slotbook booking service: given a provider's recurring weekly working
//! hours, a request horizon, a service duration, and the busy intervals
//! already committed on the provider's calendar, it computes the ordered
//! set of bookable start instants.
//!
//! ## Architecture
//!
//! - **Models**: validated weekly availability and busy-interval value types
//! - **Timezone**: the single point of truth for wall-clock/instant math
//! - **Generator**: the candidate-instant sequence over a horizon
//! - **Resolver**: the pure filtering algorithm plus the orchestrating engine
//! - **Sources**: collaborator contracts (schedule store, busy intervals)
//!
//! The resolution itself is a pure, synchronous function; the only async
//! boundaries are the collaborator traits in [`sources`].

/// Error taxonomy shared by the engine and its callers
pub mod errors;
/// Candidate-instant generation over a booking horizon
pub mod generator;
/// Availability and busy-interval value types
pub mod models;
/// The availability resolution algorithm and orchestrating engine
pub mod resolver;
/// Collaborator contracts implemented outside this crate
pub mod sources;
/// Wall-clock / instant conversion for IANA time zones
pub mod timezone;
