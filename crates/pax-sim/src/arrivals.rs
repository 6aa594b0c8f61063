//! Per-flight minute tables produced by the arrival model.
//!
//! Model output is clipped to the engine's expectations before use:
//!
//! - exactly `span` entries (extra minutes dropped, missing ones zero);
//! - running sum capped at the flight's passenger count.

use pax_arrivals::ArrivalModel;
use pax_core::{ArrivalCurveConfig, Flight, FlightId, Interval};
use tracing::warn;

use crate::Timeline;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalTable {
    per_flight: Vec<Vec<u32>>,
}

impl ArrivalTable {
    pub fn build(
        flights: &[Flight],
        model:   &dyn ArrivalModel,
        curve:   &ArrivalCurveConfig,
        span:    u32,
    ) -> Self {
        let per_flight = flights
            .iter()
            .map(|f| {
                let total = f.total_passengers();
                normalize(f, model.arrivals_per_minute(f, total, curve, span), total, span)
            })
            .collect();
        Self { per_flight }
    }

    /// Per-minute counts for `flight`; index 0 is the minute the window opens.
    pub fn minutes(&self, flight: FlightId) -> &[u32] {
        self.per_flight.get(flight.index()).map_or(&[], Vec::as_slice)
    }

    /// Passengers of `flight` arriving during `interval`.
    pub fn count_in(&self, flight: FlightId, interval: Interval, timeline: &Timeline) -> u32 {
        let table = self.minutes(flight);
        let start = timeline.window_start_offset(flight);
        timeline
            .length()
            .minutes_of(interval)
            .filter_map(|m| m.checked_sub(start))
            .filter_map(|idx| table.get(idx as usize))
            .sum()
    }
}

fn normalize(flight: &Flight, mut counts: Vec<u32>, total: u32, span: u32) -> Vec<u32> {
    if counts.len() != span as usize {
        warn!(
            flight = %flight.number,
            got = counts.len(),
            span,
            "arrival model returned the wrong number of minutes; clipping to the span"
        );
        counts.resize(span as usize, 0);
    }

    let mut remaining = total;
    let mut capped = false;
    for c in &mut counts {
        if *c > remaining {
            *c = remaining;
            capped = true;
        }
        remaining -= *c;
    }
    if capped {
        warn!(
            flight = %flight.number,
            total,
            "arrival model produced more passengers than seats sold; capping"
        );
    }
    counts
}
