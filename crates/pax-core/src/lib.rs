//! `pax-core` — foundational types for the terminal passenger-flow engine.
//!
//! Every other `pax-*` crate depends on this one.  It has no `pax-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `FlightId`, `PassengerId`                                  |
//! | [`time`]        | `Interval`, `IntervalLength`, minute/second conversions    |
//! | [`rng`]         | `SimRng` (seeded tie-breaking)                             |
//! | [`flight`]      | `Flight`, `parse_clock`                                    |
//! | [`passenger`]   | `Passenger`, `PassengerStore`                              |
//! | [`config`]      | `EngineConfig`, `ServerConfig`, `HoldRoomConfig`, `ArrivalCurveConfig` |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to flights and all configs. |

pub mod config;
pub mod error;
pub mod flight;
pub mod ids;
pub mod passenger;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ArrivalCurveConfig, CheckpointConfig, EngineConfig, HoldRoomConfig, ServerConfig,
    ServiceRate, TicketCounterConfig,
};
pub use error::{CoreError, CoreResult};
pub use flight::{parse_clock, Flight, DEFAULT_BOARDING_CLOSE_MINUTES};
pub use ids::{FlightId, PassengerId};
pub use passenger::{Passenger, PassengerStore};
pub use rng::SimRng;
pub use time::{ceil_minutes_from_seconds, Interval, IntervalLength};
