//! `EngineState` — everything that changes from one interval to the next.
//!
//! One value of this type is the whole live simulation; the snapshot table is
//! a `Vec` of them.  Anything fixed at construction (flights, rates, hold-room
//! choice, arrival tables) lives on the engine instead.

use pax_core::{FlightId, Interval, Passenger, PassengerId, PassengerStore};

use crate::{PendingTransit, ServiceStage};

/// Running per-flight counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightTally {
    pub arrived:   u32,
    pub in_person: u32,
    pub online:    u32,
    pub missed:    u32,
    /// Left with the aircraft when the hold room was cleared at departure.
    pub boarded:   u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub(crate) interval:      Interval,
    pub(crate) passengers:    PassengerStore,
    pub(crate) ticket:        ServiceStage,
    pub(crate) checkpoint:    ServiceStage,
    pub(crate) hold_rooms:    Vec<Vec<PassengerId>>,
    pub(crate) to_checkpoint: PendingTransit,
    pub(crate) to_hold:       PendingTransit,
    pub(crate) just_closed:   Vec<FlightId>,
    pub(crate) tallies:       Vec<FlightTally>,
}

impl EngineState {
    /// The state at interval 0: nobody has arrived yet.
    pub fn initial(ticket_counters: usize, checkpoints: usize, hold_rooms: usize, flights: usize) -> Self {
        Self {
            interval:      Interval::ZERO,
            passengers:    PassengerStore::new(),
            ticket:        ServiceStage::new(ticket_counters),
            checkpoint:    ServiceStage::new(checkpoints),
            hold_rooms:    vec![Vec::new(); hold_rooms],
            to_checkpoint: PendingTransit::new(),
            to_hold:       PendingTransit::new(),
            just_closed:   Vec::new(),
            tallies:       vec![FlightTally::default(); flights],
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn passengers(&self) -> &PassengerStore {
        &self.passengers
    }

    pub fn passenger(&self, id: PassengerId) -> &Passenger {
        self.passengers.get(id)
    }

    pub fn ticket(&self) -> &ServiceStage {
        &self.ticket
    }

    pub fn checkpoint(&self) -> &ServiceStage {
        &self.checkpoint
    }

    pub fn hold_rooms(&self) -> &[Vec<PassengerId>] {
        &self.hold_rooms
    }

    pub fn to_checkpoint(&self) -> &PendingTransit {
        &self.to_checkpoint
    }

    pub fn to_hold(&self) -> &PendingTransit {
        &self.to_hold
    }

    /// Flights whose boarding closed during the interval that produced this
    /// state.
    pub fn just_closed(&self) -> &[FlightId] {
        &self.just_closed
    }

    pub fn tally(&self, flight: FlightId) -> FlightTally {
        self.tallies.get(flight.index()).copied().unwrap_or_default()
    }

    pub fn hold_room_total(&self) -> usize {
        self.hold_rooms.iter().map(Vec::len).sum()
    }

    pub fn ticket_queued(&self) -> usize {
        self.ticket.queued()
    }

    pub fn checkpoint_queued(&self) -> usize {
        self.checkpoint.queued()
    }

    // ── Mutation helpers shared by the step and the sweep ─────────────────

    /// Start a new interval: nobody is being served yet and no flight has
    /// closed.
    pub(crate) fn begin_interval(&mut self) {
        self.just_closed.clear();
        self.ticket.begin_interval();
        self.checkpoint.begin_interval();
    }

    /// Mark `passenger` missed, counting it against its flight only the first
    /// time.
    pub(crate) fn mark_missed(&mut self, passenger: PassengerId) -> bool {
        let newly = self.passengers.get_mut(passenger).mark_missed();
        if newly {
            let flight = self.passengers.flight_of(passenger);
            self.tallies[flight.index()].missed += 1;
        }
        newly
    }
}
