//! Passengers and the arena that owns them.
//!
//! Queues, staging lists, pending-transit records and hold rooms all hold
//! [`PassengerId`]s; the passenger data itself lives once in a
//! [`PassengerStore`].  Marking a passenger missed therefore updates it "in
//! place" for every container that references it.

use crate::{FlightId, Interval, PassengerId};

/// One traveller and the timestamps of each stage they have completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub id:                   PassengerId,
    pub flight:               FlightId,
    /// Interval in which the passenger entered the terminal.
    pub arrival:              Interval,
    /// `false` for online check-in (skips the ticket counters).
    pub in_person:            bool,
    pub ticket_completed:     Option<Interval>,
    pub checkpoint_entered:   Option<Interval>,
    pub checkpoint_completed: Option<Interval>,
    pub hold_room_entered:    Option<Interval>,
    /// Checkpoint line picked when the ticket counter finished with them.
    pub checkpoint_line:      Option<usize>,
    /// 1-based position in the hold room at entry.
    pub hold_room_sequence:   Option<u32>,
    hold_room:                Option<usize>,
    missed:                   bool,
}

impl Passenger {
    fn new(id: PassengerId, flight: FlightId, arrival: Interval, in_person: bool) -> Self {
        Self {
            id,
            flight,
            arrival,
            in_person,
            ticket_completed:     None,
            checkpoint_entered:   None,
            checkpoint_completed: None,
            hold_room_entered:    None,
            checkpoint_line:      None,
            hold_room_sequence:   None,
            hold_room:            None,
            missed:               false,
        }
    }

    #[inline]
    pub fn is_missed(&self) -> bool {
        self.missed
    }

    /// Mark the passenger missed.  Returns `true` only on the first call;
    /// there is no way back to `false`.
    pub fn mark_missed(&mut self) -> bool {
        let newly = !self.missed;
        self.missed = true;
        newly
    }

    #[inline]
    pub fn hold_room(&self) -> Option<usize> {
        self.hold_room
    }

    /// Assign the hold room if none is set yet and return the room the
    /// passenger is bound to.  Later calls never overwrite the first value.
    pub fn assign_hold_room(&mut self, room: usize) -> usize {
        *self.hold_room.get_or_insert(room)
    }
}

/// Append-only arena of every passenger spawned in the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerStore {
    passengers: Vec<Passenger>,
}

impl PassengerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a passenger and return its ID.
    pub fn spawn(&mut self, flight: FlightId, arrival: Interval, in_person: bool) -> PassengerId {
        let id = PassengerId(self.passengers.len() as u32);
        self.passengers.push(Passenger::new(id, flight, arrival, in_person));
        id
    }

    #[inline]
    pub fn get(&self, id: PassengerId) -> &Passenger {
        &self.passengers[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: PassengerId) -> &mut Passenger {
        &mut self.passengers[id.index()]
    }

    #[inline]
    pub fn flight_of(&self, id: PassengerId) -> FlightId {
        self.passengers[id.index()].flight
    }

    #[inline]
    pub fn is_missed(&self, id: PassengerId) -> bool {
        self.passengers[id.index()].missed
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter()
    }
}
