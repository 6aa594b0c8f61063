//! Hold-room selection.
//!
//! Every flight is bound to one hold room when the engine is built:
//!
//! 1. among rooms that accept the flight, keep those with the shortest walk;
//! 2. pick one of them at random (seeded);
//! 3. if no room accepts the flight, use the first accept-all room, else
//!    room 0.
//!
//! Without configured rooms each flight gets its own room whose walk is the
//! legacy hold delay.

use pax_core::{Flight, FlightId, HoldRoomConfig, SimRng};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldRoomAssignment {
    rooms:  Vec<HoldRoomConfig>,
    chosen: Vec<usize>,
}

impl HoldRoomAssignment {
    pub fn assign(
        flights:            &[Flight],
        rooms:              Vec<HoldRoomConfig>,
        hold_delay_minutes: u32,
        rng:                &mut SimRng,
    ) -> Self {
        let rooms = if rooms.is_empty() {
            default_rooms(flights, hold_delay_minutes)
        } else {
            rooms
        };

        let chosen = flights.iter().map(|f| choose_room(f, &rooms, rng)).collect();
        Self { rooms, chosen }
    }

    /// The room `flight` was bound to.
    pub fn room_for(&self, flight: FlightId) -> usize {
        self.chosen.get(flight.index()).copied().unwrap_or(0)
    }

    pub fn walk_seconds(&self, room: usize) -> u32 {
        self.rooms.get(room).map_or(0, |r| r.walk_seconds)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> &[HoldRoomConfig] {
        &self.rooms
    }
}

fn default_rooms(flights: &[Flight], hold_delay_minutes: u32) -> Vec<HoldRoomConfig> {
    let walk = hold_delay_minutes.saturating_mul(60);
    if flights.is_empty() {
        return vec![HoldRoomConfig::new(1).with_walk_seconds(walk)];
    }
    flights
        .iter()
        .zip(1u32..)
        .map(|(f, id)| {
            HoldRoomConfig::new(id)
                .with_walk_seconds(walk)
                .with_allowed_flights([f.number.as_str()])
        })
        .collect()
}

fn choose_room(flight: &Flight, rooms: &[HoldRoomConfig], rng: &mut SimRng) -> usize {
    let accepting: Vec<usize> = (0..rooms.len()).filter(|&r| rooms[r].accepts(flight)).collect();
    if let Some(best) = accepting.iter().map(|&r| rooms[r].walk_seconds).min() {
        let nearest: Vec<usize> =
            accepting.into_iter().filter(|&r| rooms[r].walk_seconds == best).collect();
        if let Some(&room) = rng.choose(&nearest) {
            return room;
        }
    }
    rooms.iter().position(HoldRoomConfig::accepts_all).unwrap_or(0)
}
