//! The `Engine` struct, its interval step, and navigation over computed
//! intervals.

use std::collections::VecDeque;

use pax_arrivals::ArrivalModel;
use pax_core::{
    ArrivalCurveConfig, EngineConfig, Flight, FlightId, HoldRoomConfig, Interval, IntervalLength,
    Passenger, PassengerId, PassengerStore,
};
use pax_transit::{TransitRouter, TravelTimeProvider};
use tracing::{debug, info};

use crate::arrivals::ArrivalTable;
use crate::{
    BoardingCloseMonitor, CheckpointArrivals, EngineObserver, EngineState, FlightArrivals,
    FlightCensus, FlightThroughput, HoldRoomAssignment, IntervalMetrics, MetricsLog, NoopObserver,
    PendingTransit, SnapshotManager, StepRecord, Timeline,
};

// ── Engine ────────────────────────────────────────────────────────────────────

/// The discrete-interval passenger-flow simulation.
///
/// Each call to [`simulate_interval`][Self::simulate_interval] advances one
/// interval through these phases:
///
/// 1. **Arrivals**: the arrival table's passengers for this interval are split
///    into in-person (shortest accepting ticket queue) and online (shortest
///    checkpoint queue).
/// 2. **Boarding close**: flights closing now have every passenger outside
///    their hold room marked missed.
/// 3. **Ticket service**, then delivery of passengers whose walk to the
///    checkpoint ends now.
/// 4. **Checkpoint service**, then delivery of passengers whose walk to the
///    hold room ends now (or who are marked missed if their flight closed).
/// 5. **Departure**: flights departing now empty their hold room.
/// 6. **Purge** of missed passengers, metrics, and a snapshot.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    pub(crate) flights:           Vec<Flight>,
    pub(crate) config:            EngineConfig,
    pub(crate) percent_in_person: f64,
    pub(crate) ticket_rates:      Vec<f64>,
    pub(crate) checkpoint_rates:  Vec<f64>,
    /// Per flight: ticket counters it may queue at, ascending.
    pub(crate) ticket_lines:      Vec<Vec<usize>>,
    pub(crate) timeline:          Timeline,
    pub(crate) monitor:           BoardingCloseMonitor,
    pub(crate) hold:              HoldRoomAssignment,
    pub(crate) router:            TransitRouter,
    pub(crate) arrival_model:     Box<dyn ArrivalModel>,
    pub(crate) curve:             ArrivalCurveConfig,
    pub(crate) arrivals:          ArrivalTable,
    pub(crate) state:             EngineState,
    pub(crate) snapshots:         SnapshotManager,
    pub(crate) metrics:           MetricsLog,
}

impl Engine {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Simulate the current interval and advance to the next one.
    ///
    /// If earlier navigation left the engine behind the latest computed
    /// interval, the snapshots and metrics after the current interval are
    /// discarded first.  Returns `false` (and does nothing) once the final
    /// interval has been simulated.
    pub fn simulate_interval(&mut self) -> bool {
        self.simulate_interval_with(&mut NoopObserver)
    }

    pub fn simulate_interval_with<O: EngineObserver>(&mut self, observer: &mut O) -> bool {
        let now = self.state.interval;
        if now.0 >= self.timeline.total_intervals() {
            return false;
        }
        if now < self.snapshots.max_computed() {
            self.snapshots.truncate_after(now);
            self.metrics.truncate_after(now);
        }

        self.state.begin_interval();
        let mut step = StepRecord::new(self.flights.len(), self.checkpoint_rates.len());
        self.inject_arrivals(now, &mut step);
        self.close_boarding(now, observer);
        self.serve_tickets(now, &mut step);
        self.deliver_to_checkpoints(now, &mut step);
        self.serve_checkpoints(now, &mut step);
        self.deliver_to_hold_rooms(now);
        self.depart_flights(now);
        self.state.purge_missed();

        self.state.interval = now.next();
        let after = measure(&self.state);
        self.metrics.record_step(step, after);
        self.snapshots.record(&self.state);
        observer.on_interval_end(now, &after);
        true
    }

    /// Advance one interval, restoring it from the snapshot table when it has
    /// already been computed.  Returns `false` at the final interval.
    pub fn compute_next_interval(&mut self) -> bool {
        let now = self.state.interval;
        if now.0 >= self.timeline.total_intervals() {
            return false;
        }
        let next = now.next();
        if next <= self.snapshots.max_computed() {
            self.snapshots.restore_into(next, &mut self.state);
            true
        } else {
            self.simulate_interval()
        }
    }

    /// Restore interval `target`, clamped to `[0, max_computed_interval]`.
    /// Returns the interval actually restored.
    pub fn go_to_interval(&mut self, target: Interval) -> Interval {
        self.snapshots.restore_into(target, &mut self.state)
    }

    /// Step back one interval.  Returns `false` at interval 0.
    pub fn rewind_one_interval(&mut self) -> bool {
        if !self.can_rewind() {
            return false;
        }
        let prev = self.state.interval.prev();
        self.snapshots.restore_into(prev, &mut self.state);
        true
    }

    /// Step forward one interval, restoring if possible and computing
    /// otherwise.  Returns `false` at the final interval.
    pub fn fast_forward_one_interval(&mut self) -> bool {
        if self.can_fast_forward() {
            let next = self.state.interval.next();
            self.snapshots.restore_into(next, &mut self.state);
            true
        } else {
            self.compute_next_interval()
        }
    }

    /// Reset to interval 0 and simulate every interval, rebuilding the
    /// snapshot table.
    pub fn run_all_intervals(&mut self) {
        self.run_all_intervals_with(&mut NoopObserver);
    }

    pub fn run_all_intervals_with<O: EngineObserver>(&mut self, observer: &mut O) {
        self.reset();
        while self.simulate_interval_with(observer) {}

        let (boarded, missed) = self
            .state
            .tallies
            .iter()
            .fold((0u64, 0u64), |(b, m), t| (b + t.boarded as u64, m + t.missed as u64));
        info!(
            intervals = self.timeline.total_intervals(),
            passengers = self.state.passengers.len(),
            boarded,
            missed,
            "run complete"
        );
        observer.on_run_end(self.state.interval);
    }

    /// Back to the state right after construction, dropping every snapshot.
    pub fn reset(&mut self) {
        self.state = EngineState::initial(
            self.ticket_rates.len(),
            self.checkpoint_rates.len(),
            self.hold.room_count(),
            self.flights.len(),
        );
        self.snapshots.reset(&self.state);
        self.metrics.reset(measure(&self.state));
    }

    // ── Configuration changes ─────────────────────────────────────────────

    /// Replace the arrival curve (validated) and rebuild the arrival table.
    ///
    /// Affects intervals simulated from now on; snapshots already computed
    /// keep the arrivals they were built with.
    pub fn set_arrival_curve_config(&mut self, curve: ArrivalCurveConfig) {
        self.curve = curve.validated();
        self.arrivals = ArrivalTable::build(
            &self.flights,
            self.arrival_model.as_ref(),
            &self.curve,
            self.config.arrival_span_minutes,
        );
    }

    /// Replace or remove the travel-time provider.  Passengers already walking
    /// keep their arrival interval.
    pub fn set_travel_time_provider(&mut self, provider: Option<Box<dyn TravelTimeProvider>>) {
        self.router.set_provider(provider);
    }

    // ── Navigation state ──────────────────────────────────────────────────

    pub fn current_interval(&self) -> Interval {
        self.state.interval
    }

    pub fn max_computed_interval(&self) -> Interval {
        self.snapshots.max_computed()
    }

    /// Intervals in a full run (last flight's departure interval + 1).
    pub fn total_intervals(&self) -> u32 {
        self.timeline.total_intervals()
    }

    pub fn can_rewind(&self) -> bool {
        self.state.interval > Interval::ZERO
    }

    pub fn can_fast_forward(&self) -> bool {
        self.state.interval < self.snapshots.max_computed()
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// The configuration after normalisation (clamped percentages, fallback
    /// checkpoint).
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn arrival_curve(&self) -> &ArrivalCurveConfig {
        &self.curve
    }

    pub fn interval_length(&self) -> IntervalLength {
        self.timeline.length()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn passengers(&self) -> &PassengerStore {
        &self.state.passengers
    }

    pub fn passenger(&self, id: PassengerId) -> &Passenger {
        self.state.passengers.get(id)
    }

    pub fn ticket_queues(&self) -> &[VecDeque<PassengerId>] {
        self.state.ticket.queues()
    }

    pub fn checkpoint_queues(&self) -> &[VecDeque<PassengerId>] {
        self.state.checkpoint.queues()
    }

    /// Passengers who finished at each ticket counter and are walking to a
    /// checkpoint.
    pub fn ticket_staging(&self) -> &[Vec<PassengerId>] {
        self.state.ticket.staging()
    }

    /// Passengers who cleared each checkpoint and are walking to a hold room.
    pub fn checkpoint_staging(&self) -> &[Vec<PassengerId>] {
        self.state.checkpoint.staging()
    }

    pub fn ticket_serving(&self) -> &[Option<PassengerId>] {
        self.state.ticket.serving()
    }

    pub fn checkpoint_serving(&self) -> &[Option<PassengerId>] {
        self.state.checkpoint.serving()
    }

    pub fn hold_rooms(&self) -> &[Vec<PassengerId>] {
        &self.state.hold_rooms
    }

    pub fn hold_room_configs(&self) -> &[HoldRoomConfig] {
        self.hold.rooms()
    }

    pub fn pending_to_checkpoint(&self) -> &PendingTransit {
        &self.state.to_checkpoint
    }

    pub fn pending_to_hold(&self) -> &PendingTransit {
        &self.state.to_hold
    }

    /// Index of the hold room `flight` was bound to at construction.
    pub fn chosen_hold_room(&self, flight: FlightId) -> usize {
        self.hold.room_for(flight)
    }

    /// Flights whose boarding closed during the last simulated interval.
    pub fn flights_just_closed(&self) -> &[FlightId] {
        &self.state.just_closed
    }

    /// Metrics for intervals `0..=current`.
    pub fn metrics(&self) -> &[IntervalMetrics] {
        self.metrics.intervals(self.state.interval)
    }

    pub fn metrics_at(&self, interval: Interval) -> Option<&IntervalMetrics> {
        self.metrics().get(interval.index())
    }

    /// Per-interval, per-flight arrivals for intervals `0..current`.
    pub fn arrival_history(&self) -> &[Vec<FlightArrivals>] {
        self.metrics.arrivals(self.state.interval)
    }

    /// Per-interval, per-flight stage throughput for intervals `0..current`.
    pub fn throughput_history(&self) -> &[Vec<FlightThroughput>] {
        self.metrics.throughput(self.state.interval)
    }

    /// Per-interval, per-checkpoint-line arrivals (online and from a ticket
    /// counter) for intervals `0..current`.
    pub fn checkpoint_arrival_history(&self) -> &[Vec<CheckpointArrivals>] {
        self.metrics.checkpoint_arrivals(self.state.interval)
    }

    /// Passengers (all flights) the arrival tables schedule for `minute`,
    /// counted from the global start.
    pub fn total_arrivals_at_minute(&self, minute: u32) -> u32 {
        (0..self.flights.len())
            .map(|i| {
                let flight = FlightId(i as u32);
                minute
                    .checked_sub(self.timeline.window_start_offset(flight))
                    .and_then(|idx| self.arrivals.minutes(flight).get(idx as usize))
                    .copied()
                    .unwrap_or(0)
            })
            .sum()
    }

    /// Passengers (all flights) injected while `interval` ran; `0` for
    /// intervals not yet simulated.
    pub fn total_arrivals_at_interval(&self, interval: Interval) -> u32 {
        self.arrival_history()
            .get(interval.index())
            .map_or(0, |row| row.iter().map(|a| a.total()).sum())
    }

    /// The minute table `flight` draws its arrivals from; index 0 is the
    /// minute its arrival window opens.
    pub fn minute_arrivals(&self, flight: FlightId) -> &[u32] {
        self.arrivals.minutes(flight)
    }

    /// Where every passenger of `flight` is right now.
    pub fn census(&self, flight: FlightId) -> FlightCensus {
        let store = &self.state.passengers;
        let of_flight = |p: &PassengerId| store.flight_of(*p) == flight;

        let queued = self.state.ticket.queued_for(flight, store)
            + self.state.checkpoint.queued_for(flight, store);
        let in_transit = self.state.to_checkpoint.passengers().filter(of_flight).count()
            + self.state.to_hold.passengers().filter(of_flight).count();
        let in_hold_room = self.state.hold_rooms.iter().flatten().filter(|p| of_flight(p)).count();

        let tally = self.state.tally(flight);
        FlightCensus {
            arrived:      tally.arrived,
            queued:       queued as u32,
            in_transit:   in_transit as u32,
            in_hold_room: in_hold_room as u32,
            missed:       tally.missed,
            boarded:      tally.boarded,
        }
    }

    // ── Interval phases ───────────────────────────────────────────────────

    fn inject_arrivals(&mut self, now: Interval, step: &mut StepRecord) {
        for i in 0..self.flights.len() {
            let flight = FlightId(i as u32);
            let count = self.arrivals.count_in(flight, now, &self.timeline);
            if count == 0 {
                continue;
            }

            let mut in_person = ((count as f64 * self.percent_in_person).round() as u32).min(count);
            let mut online = count - in_person;
            if self.ticket_rates.is_empty() {
                online += in_person;
                in_person = 0;
            }
            step.arrivals[i] = FlightArrivals { in_person, online };

            let tally = &mut self.state.tallies[i];
            tally.arrived += count;
            tally.in_person += in_person;
            tally.online += online;

            if now > self.timeline.close_interval(flight) {
                // Boarding already closed; nobody arriving now can make it.
                for k in 0..count {
                    let p = self.state.passengers.spawn(flight, now, k < in_person);
                    self.state.mark_missed(p);
                }
                continue;
            }

            for _ in 0..in_person {
                let p = self.state.passengers.spawn(flight, now, true);
                let line = self.state.ticket.shortest_queue(&self.ticket_lines[i]).unwrap_or(0);
                self.state.ticket.enqueue(line, p);
            }
            for _ in 0..online {
                let p = self.state.passengers.spawn(flight, now, false);
                let line = self.state.checkpoint.shortest_queue_any().unwrap_or(0);
                let pax = self.state.passengers.get_mut(p);
                pax.checkpoint_entered = Some(now);
                pax.checkpoint_line = Some(line);
                self.state.checkpoint.enqueue(line, p);
                step.checkpoints[line].online.push(p);
            }
            let moved = &mut step.throughput[i];
            moved.enqueued_ticket += in_person;
            moved.arrived_to_checkpoint += online;
        }
    }

    fn close_boarding<O: EngineObserver>(&mut self, now: Interval, observer: &mut O) {
        for &flight in self.monitor.closing_at(now) {
            let outcome = self.state.close_boarding(flight, self.hold.room_for(flight));
            let f = &self.flights[flight.index()];
            debug!(
                flight = %f.number,
                interval = %now,
                missed = outcome.missed,
                safe = outcome.safe,
                "boarding closed"
            );
            observer.on_boarding_closed(f, now, outcome);
        }
    }

    fn serve_tickets(&mut self, now: Interval, step: &mut StepRecord) {
        for (counter, &rate) in self.ticket_rates.iter().enumerate() {
            let served = self.state.ticket.serve(counter, rate, &self.state.passengers);
            for p in served {
                let flight = self.state.passengers.flight_of(p);
                step.throughput[flight.index()].ticketed += 1;
                let line = self.state.checkpoint.shortest_queue_any().unwrap_or(0);
                let pax = self.state.passengers.get_mut(p);
                pax.ticket_completed = Some(now);
                pax.checkpoint_line = Some(line);

                let delay = self.router.ticket_to_checkpoint(counter, line);
                self.state.to_checkpoint.push(now + delay, p);
            }
        }
    }

    fn deliver_to_checkpoints(&mut self, now: Interval, step: &mut StepRecord) {
        let lines = self.checkpoint_rates.len();
        for p in self.state.to_checkpoint.drain(now) {
            if self.state.passengers.is_missed(p) {
                continue;
            }
            self.state.ticket.unstage(p);

            let flight = self.state.passengers.flight_of(p);
            let line = match self.state.passengers.get(p).checkpoint_line {
                Some(line) if line < lines => line,
                _ => self.state.checkpoint.shortest_queue_any().unwrap_or(0),
            };
            let pax = self.state.passengers.get_mut(p);
            pax.checkpoint_entered = Some(now);
            pax.checkpoint_line = Some(line);
            self.state.checkpoint.enqueue(line, p);
            step.throughput[flight.index()].arrived_to_checkpoint += 1;
            step.checkpoints[line].from_ticket.push(p);
        }
    }

    fn serve_checkpoints(&mut self, now: Interval, step: &mut StepRecord) {
        for (line, &rate) in self.checkpoint_rates.iter().enumerate() {
            let served = self.state.checkpoint.serve(line, rate, &self.state.passengers);
            for p in served {
                let flight = self.state.passengers.flight_of(p);
                step.throughput[flight.index()].passed_checkpoint += 1;
                let pax = self.state.passengers.get_mut(p);
                pax.checkpoint_completed = Some(now);
                let room = pax.assign_hold_room(self.hold.room_for(flight));

                let delay = self.router.checkpoint_to_hold(line, room, self.hold.walk_seconds(room));
                self.state.to_hold.push(now + delay, p);
            }
        }
    }

    fn deliver_to_hold_rooms(&mut self, now: Interval) {
        let last_room = self.state.hold_rooms.len().saturating_sub(1);
        for p in self.state.to_hold.drain(now) {
            if self.state.passengers.is_missed(p) {
                continue;
            }
            let flight = self.state.passengers.flight_of(p);
            if self.timeline.is_closed_at(flight, now) {
                self.state.mark_missed(p);
                continue;
            }
            self.state.checkpoint.unstage(p);

            let pax = self.state.passengers.get_mut(p);
            let room = pax.assign_hold_room(self.hold.room_for(flight)).min(last_room);
            let room_list = &mut self.state.hold_rooms[room];
            pax.hold_room_entered = Some(now);
            pax.hold_room_sequence = Some(room_list.len() as u32 + 1);
            room_list.push(p);
        }
    }

    fn depart_flights(&mut self, now: Interval) {
        for &flight in self.monitor.departing_at(now) {
            let boarded = self.state.depart(flight);
            debug!(
                flight = %self.flights[flight.index()].number,
                interval = %now,
                boarded,
                "flight departed"
            );
        }
    }
}

/// Queue totals for the metrics log.
pub(crate) fn measure(state: &EngineState) -> IntervalMetrics {
    let ticket_queued = state.ticket_queued();
    let checkpoint_queued = state.checkpoint_queued();
    IntervalMetrics {
        interval: state.interval,
        ticket_queued,
        checkpoint_queued,
        hold_room_total: state.hold_room_total(),
        held_ups: ticket_queued + checkpoint_queued,
    }
}
