//! `pax-transit` — walking times between terminal stations.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                           |
//! |--------------|--------------------------------------------------------------------|
//! | [`provider`] | `TravelTimeProvider` trait, `TravelTimeMatrix`, `WalkingTravelTimes` |
//! | [`router`]   | `TransitRouter` — provider minutes or fixed delays → intervals     |
//! | [`error`]    | `TransitError`, `TransitResult<T>`                                 |
//!
//! # Pluggability
//!
//! `pax-sim` asks a [`TransitRouter`] for every walk; the router consults an
//! optional [`TravelTimeProvider`] and falls back to the configured fixed
//! delays when there is none or when it answers "unknown".  Applications with
//! a floorplan pathfinder implement the trait themselves.

pub mod error;
pub mod provider;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{TransitError, TransitResult};
pub use provider::{TravelTimeMatrix, TravelTimeProvider, WalkingTravelTimes};
pub use router::TransitRouter;
