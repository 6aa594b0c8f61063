//! Minute → interval conversion for the two walks between stages.
//!
//! | Walk                 | Provider answer `> 0`   | Otherwise                                  |
//! |----------------------|-------------------------|--------------------------------------------|
//! | ticket → checkpoint  | `ceil(minutes / L)`     | `ceil(transit_delay_minutes / L)`          |
//! | checkpoint → hold    | `ceil(minutes / L)`     | provider set: `ceil(hold_delay_minutes / L)` |
//! |                      |                         | no provider: `ceil(ceil(walk_seconds / 60) / L)` |
//!
//! `L` is the interval length in minutes.  Every result is at least one
//! interval: nobody reaches the next stage in the interval they left the
//! previous one.

use pax_core::{ceil_minutes_from_seconds, IntervalLength};
use tracing::trace;

use crate::TravelTimeProvider;

pub struct TransitRouter {
    length:                IntervalLength,
    transit_delay_minutes: u32,
    hold_delay_minutes:    u32,
    provider:              Option<Box<dyn TravelTimeProvider>>,
}

impl TransitRouter {
    pub fn new(length: IntervalLength, transit_delay_minutes: u32, hold_delay_minutes: u32) -> Self {
        Self { length, transit_delay_minutes, hold_delay_minutes, provider: None }
    }

    pub fn with_provider(mut self, provider: Box<dyn TravelTimeProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace (or remove) the provider.  Takes effect for the next walk
    /// computed; passengers already in transit keep their arrival interval.
    pub fn set_provider(&mut self, provider: Option<Box<dyn TravelTimeProvider>>) {
        self.provider = provider;
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn interval_length(&self) -> IntervalLength {
        self.length
    }

    /// Intervals from leaving ticket counter `ticket` to joining checkpoint
    /// line `checkpoint`.
    pub fn ticket_to_checkpoint(&self, ticket: usize, checkpoint: usize) -> u32 {
        if let Some(p) = &self.provider {
            let minutes = p.minutes_ticket_to_checkpoint(ticket, checkpoint);
            if minutes > 0 {
                return self.intervals(minutes.unsigned_abs());
            }
            trace!(ticket, checkpoint, minutes, "ticket→checkpoint time unknown, using fixed delay");
        }
        self.intervals(self.transit_delay_minutes)
    }

    /// Intervals from leaving checkpoint `checkpoint` to entering hold room
    /// `hold_room`, whose configured walk is `walk_seconds`.
    pub fn checkpoint_to_hold(&self, checkpoint: usize, hold_room: usize, walk_seconds: u32) -> u32 {
        match &self.provider {
            Some(p) => {
                let minutes = p.minutes_checkpoint_to_hold(checkpoint, hold_room);
                if minutes > 0 {
                    return self.intervals(minutes.unsigned_abs());
                }
                trace!(checkpoint, hold_room, minutes, "checkpoint→hold time unknown, using fixed delay");
                self.intervals(self.hold_delay_minutes)
            }
            None => self.intervals(ceil_minutes_from_seconds(walk_seconds)),
        }
    }

    fn intervals(&self, minutes: u32) -> u32 {
        self.length.intervals_for_minutes(minutes).max(1)
    }
}

impl std::fmt::Debug for TransitRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitRouter")
            .field("length", &self.length)
            .field("transit_delay_minutes", &self.transit_delay_minutes)
            .field("hold_delay_minutes", &self.hold_delay_minutes)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}
