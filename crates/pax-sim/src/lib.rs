//! `pax-sim` — the interval stepper for the terminal passenger-flow engine.
//!
//! # Interval loop
//!
//! ```text
//! for interval in 0..total_intervals:
//!   ① Arrivals    — spawn this interval's passengers; in-person join the
//!                   shortest ticket queue, online the shortest checkpoint queue.
//!   ② Close       — flights closing now: everyone outside the hold room
//!                   is marked missed.
//!   ③ Ticket      — fractional-rate service; served passengers walk to the
//!                   checkpoint line picked at completion.
//!   ④ → checkpoint — walks ending now join their checkpoint queue.
//!   ⑤ Checkpoint  — fractional-rate service; served passengers walk to
//!                   their flight's hold room.
//!   ⑥ → hold room — walks ending now enter the room, or are marked missed if
//!                   the flight has closed.
//!   ⑦ Departure   — flights departing now empty their hold room.
//!   ⑧ Purge       — missed passengers leave every container; metrics and a
//!                   snapshot are recorded.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`stage`]    | `ServiceStage` — queues, staging, progress, serving slots      |
//! | [`pending`]  | `PendingTransit` — passengers walking between stages           |
//! | [`hold`]     | `HoldRoomAssignment` — one room per flight, seeded tie-break   |
//! | [`timeline`] | `Timeline` — close / departure / window intervals per flight   |
//! | [`boarding`] | `BoardingCloseMonitor`, close sweep, departure, purge          |
//! | [`state`]    | `EngineState`, `FlightTally`                                   |
//! | [`snapshot`] | `SnapshotManager` — one `EngineState` per computed interval    |
//! | [`metrics`]  | `IntervalMetrics`, per-flight and per-checkpoint histories, `FlightCensus`, `MetricsLog` |
//! | [`observer`] | `EngineObserver`, `NoopObserver`                               |
//! | [`builder`]  | `EngineBuilder`                                                |
//! | [`engine`]   | `Engine` — stepping, navigation, accessors                     |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the boarding-close safe set.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pax_core::{EngineConfig, Flight, ServerConfig};
//! use pax_sim::EngineBuilder;
//!
//! let config = EngineConfig {
//!     ticket_counters: vec![ServerConfig::ticket_counter(1, 1.0)],
//!     checkpoints:     vec![ServerConfig::checkpoint(1, 120.0)],
//!     ..EngineConfig::default()
//! };
//! let flights = vec![Flight::new("UA100", 9 * 60, 180, 0.85)?];
//! let mut engine = EngineBuilder::new(config, flights).build();
//! engine.run_all_intervals();
//! ```

mod arrivals;
pub mod boarding;
pub mod builder;
pub mod engine;
pub mod hold;
pub mod metrics;
pub mod observer;
pub mod pending;
pub mod snapshot;
pub mod stage;
pub mod state;
pub mod timeline;

#[cfg(test)]
mod tests;

pub use boarding::{BoardingCloseMonitor, CloseOutcome};
pub use builder::EngineBuilder;
pub use engine::Engine;
pub use hold::HoldRoomAssignment;
pub use metrics::{
    CheckpointArrivals, FlightArrivals, FlightCensus, FlightThroughput, IntervalMetrics, MetricsLog,
    StepRecord,
};
pub use observer::{EngineObserver, NoopObserver};
pub use pending::PendingTransit;
pub use snapshot::SnapshotManager;
pub use stage::ServiceStage;
pub use state::{EngineState, FlightTally};
pub use timeline::Timeline;
