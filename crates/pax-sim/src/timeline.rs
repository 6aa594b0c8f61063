//! Mapping between the flight schedule and interval indices.
//!
//! All minutes here are offsets from the **global start**, the earliest
//! departure minus the arrival span, so every flight's arrival window begins
//! at a non-negative offset.
//!
//! | Per flight        | Offset                                  | Interval                 |
//! |-------------------|-----------------------------------------|--------------------------|
//! | window start      | `departure - span - global_start`       | —                        |
//! | boarding close    | `departure - close - global_start` (≥0) | `close_offset / L`       |
//! | departure         | `departure - global_start`              | `departure_offset / L`   |
//!
//! The run ends after `max(departure interval) + 1` intervals.

use pax_core::{Flight, FlightId, Interval, IntervalLength};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    length:          IntervalLength,
    global_start:    i64,
    window_start:    Vec<u32>,
    close:           Vec<Interval>,
    departure:       Vec<Interval>,
    total_intervals: u32,
}

impl Timeline {
    pub fn new(flights: &[Flight], span_minutes: u32, length: IntervalLength) -> Self {
        let global_start = flights
            .iter()
            .map(|f| f.departure_minute as i64)
            .min()
            .map_or(0, |m| m - span_minutes as i64);

        let offset = |minute: i64| -> u32 { (minute - global_start).clamp(0, u32::MAX as i64) as u32 };

        let window_start: Vec<u32> = flights
            .iter()
            .map(|f| offset(f.departure_minute as i64 - span_minutes as i64))
            .collect();
        let close: Vec<Interval> = flights
            .iter()
            .map(|f| {
                let at = f.departure_minute as i64 - f.boarding_close_minutes as i64;
                length.interval_of_minute(offset(at))
            })
            .collect();
        let departure: Vec<Interval> = flights
            .iter()
            .map(|f| length.interval_of_minute(offset(f.departure_minute as i64)))
            .collect();

        let total_intervals = departure.iter().map(|d| d.0 + 1).max().unwrap_or(1);

        Self { length, global_start, window_start, close, departure, total_intervals }
    }

    pub fn length(&self) -> IntervalLength {
        self.length
    }

    /// Schedule minute (same reference as `Flight::departure_minute`) of
    /// interval 0.  Negative when the first window opens before midnight.
    pub fn global_start_minute(&self) -> i64 {
        self.global_start
    }

    /// Intervals in a full run; the last one simulated is `total - 1`.
    pub fn total_intervals(&self) -> u32 {
        self.total_intervals
    }

    pub fn window_start_offset(&self, flight: FlightId) -> u32 {
        self.window_start[flight.index()]
    }

    pub fn close_interval(&self, flight: FlightId) -> Interval {
        self.close[flight.index()]
    }

    pub fn departure_interval(&self, flight: FlightId) -> Interval {
        self.departure[flight.index()]
    }

    /// Number of flights on the schedule.
    pub fn flight_count(&self) -> usize {
        self.departure.len()
    }

    /// `true` once `flight` no longer admits passengers to its hold room.
    pub fn is_closed_at(&self, flight: FlightId, interval: Interval) -> bool {
        interval >= self.close_interval(flight)
    }
}
