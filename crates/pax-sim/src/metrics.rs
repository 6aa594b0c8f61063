//! Per-interval aggregates and per-flight accounting.
//!
//! Metrics are append-only: a computed interval never changes, so the log is
//! kept once beside the snapshot table rather than copied into every
//! snapshot.  Engine accessors slice it to the current interval.

use pax_core::{Interval, PassengerId};

/// Queue totals at the start of an interval (after the previous one's purge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalMetrics {
    pub interval:          Interval,
    pub ticket_queued:     usize,
    pub checkpoint_queued: usize,
    pub hold_room_total:   usize,
    /// Still waiting in a ticket or checkpoint queue.
    pub held_ups:          usize,
}

/// Passengers of one flight injected during one interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightArrivals {
    pub in_person: u32,
    pub online:    u32,
}

impl FlightArrivals {
    pub fn total(self) -> u32 {
        self.in_person + self.online
    }
}

/// Passengers of one flight moving through each stage during one interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightThroughput {
    /// Joined a ticket queue on arrival.
    pub enqueued_ticket:       u32,
    pub ticketed:              u32,
    /// Joined a checkpoint queue, online or from a ticket counter.
    pub arrived_to_checkpoint: u32,
    pub passed_checkpoint:     u32,
}

/// Who joined one checkpoint line during one interval, by route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointArrivals {
    pub online:      Vec<PassengerId>,
    pub from_ticket: Vec<PassengerId>,
}

impl CheckpointArrivals {
    pub fn total(&self) -> usize {
        self.online.len() + self.from_ticket.len()
    }
}

/// Everything recorded while one interval ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepRecord {
    pub arrivals:    Vec<FlightArrivals>,
    pub throughput:  Vec<FlightThroughput>,
    pub checkpoints: Vec<CheckpointArrivals>,
}

impl StepRecord {
    pub fn new(flights: usize, checkpoints: usize) -> Self {
        Self {
            arrivals:    vec![FlightArrivals::default(); flights],
            throughput:  vec![FlightThroughput::default(); flights],
            checkpoints: vec![CheckpointArrivals::default(); checkpoints],
        }
    }
}

/// Where every passenger of one flight currently is.
///
/// `arrived == queued + in_transit + in_hold_room + missed + boarded` holds
/// after every interval; see [`is_conserved`][Self::is_conserved].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightCensus {
    pub arrived:      u32,
    /// Waiting in a ticket or checkpoint queue.
    pub queued:       u32,
    /// Walking between stages.
    pub in_transit:   u32,
    pub in_hold_room: u32,
    pub missed:       u32,
    pub boarded:      u32,
}

impl FlightCensus {
    pub fn accounted(&self) -> u32 {
        self.queued + self.in_transit + self.in_hold_room + self.missed + self.boarded
    }

    pub fn is_conserved(&self) -> bool {
        self.arrived == self.accounted()
    }
}

// ── MetricsLog ────────────────────────────────────────────────────────────────

/// `intervals[i]` describes the state at the start of interval `i`; the
/// per-step histories at index `i` describe what happened while interval `i`
/// ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsLog {
    intervals:   Vec<IntervalMetrics>,
    arrivals:    Vec<Vec<FlightArrivals>>,
    throughput:  Vec<Vec<FlightThroughput>>,
    checkpoints: Vec<Vec<CheckpointArrivals>>,
}

impl MetricsLog {
    pub fn new(initial: IntervalMetrics) -> Self {
        Self { intervals: vec![initial], ..Self::default() }
    }

    pub fn reset(&mut self, initial: IntervalMetrics) {
        *self = Self::new(initial);
    }

    /// Append the outcome of simulating interval `after.interval - 1`.
    pub fn record_step(&mut self, step: StepRecord, after: IntervalMetrics) {
        let at = after.interval.prev();
        self.truncate_after(at);
        self.arrivals.push(step.arrivals);
        self.throughput.push(step.throughput);
        self.checkpoints.push(step.checkpoints);
        self.intervals.push(after);
    }

    /// Forget everything computed after `interval`.
    pub fn truncate_after(&mut self, interval: Interval) {
        self.intervals.truncate(interval.index() + 1);
        self.arrivals.truncate(interval.index());
        self.throughput.truncate(interval.index());
        self.checkpoints.truncate(interval.index());
    }

    /// Entries for intervals `0..=upto`.
    pub fn intervals(&self, upto: Interval) -> &[IntervalMetrics] {
        let end = (upto.index() + 1).min(self.intervals.len());
        &self.intervals[..end]
    }

    /// Arrivals for intervals `0..upto`.
    pub fn arrivals(&self, upto: Interval) -> &[Vec<FlightArrivals>] {
        &self.arrivals[..upto.index().min(self.arrivals.len())]
    }

    /// Stage throughput for intervals `0..upto`.
    pub fn throughput(&self, upto: Interval) -> &[Vec<FlightThroughput>] {
        &self.throughput[..upto.index().min(self.throughput.len())]
    }

    /// Checkpoint-line arrivals for intervals `0..upto`.
    pub fn checkpoint_arrivals(&self, upto: Interval) -> &[Vec<CheckpointArrivals>] {
        &self.checkpoints[..upto.index().min(self.checkpoints.len())]
    }
}
