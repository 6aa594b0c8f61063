//! Boarding close, departure, and the missed-passenger purge.
//!
//! # Close sweep
//!
//! At flight F's close interval the passengers of F already sitting in F's
//! hold room are safe.  Every other passenger of F is marked missed wherever
//! the engine still references it: ticket and checkpoint queues, staging
//! lists, serving slots, and both pending-transit maps.  Pending entries are
//! removed outright (empty intervals are pruned); everything else is left in
//! place for the purge.
//!
//! # Purge
//!
//! Runs at the end of every interval and drops missed passengers from every
//! live container, so no stage ever sees a stale missed entry.
//!
//! # Departure
//!
//! At F's departure interval every passenger of F still in a hold room is
//! removed and counted as boarded, whatever their missed status.

use std::collections::BTreeMap;

use pax_core::{FlightId, Interval, PassengerId};

use crate::{EngineState, Timeline};

#[cfg(feature = "fx-hash")]
type PassengerSet = rustc_hash::FxHashSet<PassengerId>;
#[cfg(not(feature = "fx-hash"))]
type PassengerSet = std::collections::HashSet<PassengerId>;

// ── BoardingCloseMonitor ──────────────────────────────────────────────────────

/// Which flights close and which depart at each interval.
///
/// Built once from the [`Timeline`]; each flight appears in exactly one close
/// entry and one departure entry, so the sweep fires once per flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardingCloseMonitor {
    closing:   BTreeMap<Interval, Vec<FlightId>>,
    departing: BTreeMap<Interval, Vec<FlightId>>,
}

impl BoardingCloseMonitor {
    pub fn new(timeline: &Timeline) -> Self {
        let mut monitor = Self::default();
        for i in 0..timeline.flight_count() {
            let flight = FlightId(i as u32);
            monitor.closing.entry(timeline.close_interval(flight)).or_default().push(flight);
            monitor.departing.entry(timeline.departure_interval(flight)).or_default().push(flight);
        }
        monitor
    }

    /// Flights whose boarding closes at `interval`, in flight order.
    pub fn closing_at(&self, interval: Interval) -> &[FlightId] {
        self.closing.get(&interval).map_or(&[], Vec::as_slice)
    }

    /// Flights departing at `interval`, in flight order.
    pub fn departing_at(&self, interval: Interval) -> &[FlightId] {
        self.departing.get(&interval).map_or(&[], Vec::as_slice)
    }
}

// ── Sweep results ─────────────────────────────────────────────────────────────

/// What a close sweep did to one flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseOutcome {
    /// Already in the hold room when boarding closed.
    pub safe:   usize,
    /// Newly marked missed by this sweep.
    pub missed: usize,
}

// ── EngineState operations ────────────────────────────────────────────────────

impl EngineState {
    /// Close boarding for `flight`, whose passengers wait in hold room `room`.
    pub(crate) fn close_boarding(&mut self, flight: FlightId, room: usize) -> CloseOutcome {
        self.just_closed.push(flight);

        let safe: PassengerSet = self
            .hold_rooms
            .get(room)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&p| self.passengers.flight_of(p) == flight)
            .collect();

        let store = &self.passengers;
        let stranded = |p: PassengerId| store.flight_of(p) == flight && !safe.contains(&p);

        let mut doomed: Vec<PassengerId> = self
            .ticket
            .members()
            .chain(self.checkpoint.members())
            .filter(|&p| stranded(p))
            .collect();
        doomed.extend(self.to_checkpoint.remove_where(stranded));
        doomed.extend(self.to_hold.remove_where(stranded));

        let missed = doomed.into_iter().filter(|&p| self.mark_missed(p)).count();
        CloseOutcome { safe: safe.len(), missed }
    }

    /// Remove every passenger of `flight` from every hold room and count them
    /// as boarded.  Returns how many left.
    pub(crate) fn depart(&mut self, flight: FlightId) -> usize {
        let store = &self.passengers;
        let mut boarded = 0;
        for room in &mut self.hold_rooms {
            let before = room.len();
            room.retain(|&p| store.flight_of(p) != flight);
            boarded += before - room.len();
        }
        self.tallies[flight.index()].boarded += boarded as u32;
        boarded
    }

    /// Drop missed passengers from every live container.
    pub(crate) fn purge_missed(&mut self) {
        let store = &self.passengers;
        self.ticket.purge_missed(store);
        self.checkpoint.purge_missed(store);
        for room in &mut self.hold_rooms {
            room.retain(|&p| !store.is_missed(p));
        }
        self.to_checkpoint.remove_where(|p| store.is_missed(p));
        self.to_hold.remove_where(|p| store.is_missed(p));
    }
}
